// Fri Oct 16 2026 - Alex

use crate::pattern::NamedSignature;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: Option<PathBuf>,
    /// Restrict scanning to one section of an ELF, PE or Mach-O image.
    pub section: Option<String>,
    pub signatures: Vec<NamedSignature>,
    pub output_file: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub max_threads: usize,
    pub prefetch: bool,
    pub enable_progress_bars: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            section: None,
            signatures: Vec::new(),
            output_file: None,
            output_format: OutputFormat::Json,
            max_threads: num_cpus::get(),
            prefetch: true,
            enable_progress_bars: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn with_input(mut self, input: PathBuf) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_section(mut self, section: String) -> Self {
        self.section = Some(section);
        self
    }

    pub fn with_signature(mut self, signature: NamedSignature) -> Self {
        self.signatures.push(signature);
        self
    }

    pub fn with_output_file(mut self, output: PathBuf) -> Self {
        self.output_file = Some(output);
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// True when the JSON report goes to stdout, so anything else printed
    /// for the user has to go to stderr to keep stdout parseable.
    pub fn report_to_stdout(&self) -> bool {
        self.output_file.is_none() && self.output_format == OutputFormat::Json
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.is_none() {
            return Err(ConfigError::Invalid("no input file given".to_string()));
        }
        if self.signatures.is_empty() {
            return Err(ConfigError::Invalid("no signatures given".to_string()));
        }
        if self.max_threads == 0 {
            return Err(ConfigError::Invalid("max_threads must be greater than 0".to_string()));
        }

        let mut seen = HashSet::new();
        for sig in &self.signatures {
            if !seen.insert(sig.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate signature name '{}'", sig.name)));
            }
        }
        Ok(())
    }
}
