// Fri Oct 16 2026 - Alex

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use sigscan::{
    config::{Config, OutputFormat},
    memory::{self, MappedFile},
    output::ScanReport,
    pattern::{NamedSignature, SignatureSet},
    utils::{self, LoggingUtils, ScopedTimer},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Find IDA-style byte signatures in binary files", long_about = None)]
struct Args {
    /// File to scan
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Signature to look for, as NAME=SIGNATURE (repeatable)
    #[arg(short, long = "signature", value_name = "NAME=SIGNATURE")]
    signatures: Vec<String>,

    /// JSON config file with signatures and defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only scan this section of an ELF, PE or Mach-O image
    #[arg(long)]
    section: Option<String>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    #[arg(long)]
    threads: Option<usize>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log level (error, warn, info, debug, trace, off); overrides -v
    #[arg(long)]
    log_level: Option<String>,

    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    no_prefetch: bool,

    #[arg(long)]
    no_progress: bool,
}

fn main() {
    let args = Args::parse();

    let level = LoggingUtils::resolve_level(args.log_level.as_deref(), args.verbose);
    match &args.log_file {
        Some(path) => {
            if let Err(e) = LoggingUtils::init_logger_with_file(level, path) {
                eprintln!("{} Failed to open log file {}: {}", "[!]".red(), path.display(), e);
                std::process::exit(1);
            }
        }
        None => LoggingUtils::init_from_env_or(level),
    }

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(input) = &args.input {
        config = config.with_input(input.clone());
    }
    if let Some(section) = &args.section {
        config = config.with_section(section.clone());
    }
    if let Some(output) = &args.output {
        config = config.with_output_file(output.clone());
    }
    if let Some(format) = args.format {
        config = config.with_output_format(format);
    }
    if let Some(threads) = args.threads {
        config = config.with_max_threads(threads);
    }
    if args.no_prefetch {
        config = config.with_prefetch(false);
    }
    if args.no_progress {
        config.enable_progress_bars = false;
    }
    for spec in &args.signatures {
        let sig = NamedSignature::parse(spec)
            .with_context(|| format!("Invalid --signature '{}'", spec))?;
        config = config.with_signature(sig);
    }

    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    let input = config.input.clone().context("no input file given")?;

    let start_time = Instant::now();
    let to_stderr = config.report_to_stdout();

    let signatures = {
        let _timer = ScopedTimer::new("compile signatures");
        SignatureSet::compile(&config.signatures)
            .context("Failed to compile signatures")?
            .with_prefetch(config.prefetch)
    };

    status(to_stderr, format!("{} Loading: {}", "[*]".blue(), input.display()));
    let mapped = MappedFile::open(&input)
        .with_context(|| format!("Failed to map {}", input.display()))?;

    let view = match &config.section {
        Some(section) => memory::section_view(mapped.view(), section)
            .with_context(|| format!("Failed to locate section {}", section))?,
        None => mapped.view(),
    };

    status(
        to_stderr,
        format!(
            "{} Scanning {} with {} signatures",
            "[*]".blue(),
            utils::format_bytes(view.len() as u64),
            signatures.len()
        ),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_threads)
        .build()
        .context("Failed to build thread pool")?;

    let progress = if config.enable_progress_bars {
        let pb = ProgressBar::new(signatures.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let scan_start = Instant::now();
    let hits = pool.install(|| {
        signatures.par_scan_with(view.data(), |hit| {
            if let Some(pb) = &progress {
                pb.set_message(hit.name.clone());
                pb.inc(1);
            }
        })
    });
    let scan_elapsed = scan_start.elapsed();

    if let Some(pb) = &progress {
        pb.finish_with_message("done");
    }

    let report = ScanReport::new(&input, config.section.as_deref(), &view, hits, scan_elapsed);
    print_summary(&report, to_stderr);

    if let Some(path) = &config.output_file {
        report
            .write(path, config.output_format)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("{} Report saved to: {}", "[+]".green(), path.display());
    } else if config.output_format == OutputFormat::Json {
        println!("{}", report.to_json()?);
    }

    info!(
        "Scanned {} signatures in {}",
        report.results.len(),
        utils::format_duration(start_time.elapsed())
    );
    Ok(())
}

/// Prints a user-facing line, on stderr when stdout carries the report.
fn status(to_stderr: bool, line: String) {
    if to_stderr {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

fn print_summary(report: &ScanReport, to_stderr: bool) {
    status(to_stderr, String::new());
    status(to_stderr, format!("{}", "Results".cyan().bold()));
    status(to_stderr, format!("{}", "-".repeat(40).cyan()));

    for entry in &report.results {
        match entry.offset {
            Some(offset) => status(
                to_stderr,
                format!(
                    "  {} {} {}",
                    "[+]".green(),
                    entry.name.cyan(),
                    format!("0x{:x}", offset).green()
                ),
            ),
            None => {
                warn!("Signature '{}' not found", entry.name);
                status(
                    to_stderr,
                    format!("  {} {} {}", "[-]".red(), entry.name.cyan(), "not found".red()),
                );
            }
        }
    }

    status(to_stderr, String::new());
    status(
        to_stderr,
        format!(
            "{} {}/{} signatures found in {:.2}ms",
            "[+]".green(),
            report.found_count(),
            report.results.len(),
            report.elapsed_ms
        ),
    );
}
