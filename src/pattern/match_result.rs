// Fri Oct 16 2026 - Alex

use serde::{Deserialize, Serialize};

/// Outcome of running one named signature against one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHit {
    pub name: String,
    pub signature: String,
    /// Offset relative to the start of the scanned buffer.
    pub offset: Option<usize>,
}

impl ScanHit {
    pub fn new(name: &str, signature: String, offset: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            signature,
            offset,
        }
    }

    pub fn is_found(&self) -> bool {
        self.offset.is_some()
    }

    /// Shifts the offset so it is relative to whatever `base` is relative to.
    pub fn rebased(mut self, base: usize) -> Self {
        self.offset = self.offset.map(|o| o + base);
        self
    }
}
