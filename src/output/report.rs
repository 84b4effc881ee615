// Fri Oct 16 2026 - Alex

use crate::config::OutputFormat;
use crate::memory::BufferView;
use crate::pattern::ScanHit;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub name: String,
    pub signature: String,
    /// Offset from the start of the input file.
    pub offset: Option<usize>,
    pub offset_hex: Option<String>,
}

impl From<ScanHit> for ReportEntry {
    fn from(hit: ScanHit) -> Self {
        Self {
            offset_hex: hit.offset.map(|o| format!("0x{:x}", o)),
            name: hit.name,
            signature: hit.signature,
            offset: hit.offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub input: String,
    pub section: Option<String>,
    pub base_offset: usize,
    pub scanned_bytes: usize,
    pub elapsed_ms: f64,
    pub results: Vec<ReportEntry>,
}

impl ScanReport {
    /// `hits` carry offsets relative to `view`; the report stores them
    /// relative to the whole input.
    pub fn new(
        input: &Path,
        section: Option<&str>,
        view: &BufferView<'_>,
        hits: Vec<ScanHit>,
        elapsed: Duration,
    ) -> Self {
        Self {
            input: input.display().to_string(),
            section: section.map(str::to_string),
            base_offset: view.base_offset(),
            scanned_bytes: view.len(),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            results: hits
                .into_iter()
                .map(|hit| hit.rebased(view.base_offset()).into())
                .collect(),
        }
    }

    pub fn found_count(&self) -> usize {
        self.results.iter().filter(|r| r.offset.is_some()).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Signature Scan Report");
        let _ = writeln!(out, "=====================");
        let _ = writeln!(out, "Input: {}", self.input);
        if let Some(section) = &self.section {
            let _ = writeln!(out, "Section: {} (file offset 0x{:x})", section, self.base_offset);
        }
        let _ = writeln!(out, "Scanned: {} bytes in {:.2}ms", self.scanned_bytes, self.elapsed_ms);
        let _ = writeln!(out, "Found: {}/{}", self.found_count(), self.results.len());
        let _ = writeln!(out);

        for entry in &self.results {
            match &entry.offset_hex {
                Some(hex) => {
                    let _ = writeln!(out, "  {}: {} [{}]", entry.name, hex, entry.signature);
                }
                None => {
                    let _ = writeln!(out, "  {}: not found [{}]", entry.name, entry.signature);
                }
            }
        }

        out
    }

    pub fn write(&self, path: &Path, format: OutputFormat) -> std::io::Result<()> {
        let contents = match format {
            OutputFormat::Json => self
                .to_json()
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?,
            OutputFormat::Text => self.to_text(),
        };
        fs::write(path, contents)
    }
}
