// Fri Oct 16 2026 - Alex

use crate::pattern::pattern::WILDCARD_PLACEHOLDER;
use crate::pattern::{signature, CompiledPattern, PatternError};

/// Assembles a pattern slot by slot, for callers that build signatures from
/// code rather than text.
pub struct PatternBuilder {
    bytes: Vec<u8>,
    mask: Vec<bool>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            mask: Vec::new(),
        }
    }

    pub fn byte(mut self, b: u8) -> Self {
        self.bytes.push(b);
        self.mask.push(true);
        self
    }

    pub fn bytes(mut self, bs: &[u8]) -> Self {
        self.bytes.extend_from_slice(bs);
        self.mask.extend(std::iter::repeat(true).take(bs.len()));
        self
    }

    pub fn wildcard(self) -> Self {
        self.wildcards(1)
    }

    pub fn wildcards(mut self, count: usize) -> Self {
        self.bytes.extend(std::iter::repeat(WILDCARD_PLACEHOLDER).take(count));
        self.mask.extend(std::iter::repeat(false).take(count));
        self
    }

    /// Appends the slots of an IDA-style signature fragment.
    pub fn signature(mut self, fragment: &str) -> Result<Self, PatternError> {
        let compiled = signature::compile(fragment)?;
        self.bytes.extend_from_slice(compiled.bytes());
        self.mask.extend_from_slice(compiled.mask());
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn build(self) -> Result<CompiledPattern, PatternError> {
        CompiledPattern::new(self.bytes, self.mask)
    }
}

impl Default for PatternBuilder {
    fn default() -> Self {
        Self::new()
    }
}
