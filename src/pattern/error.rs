// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Malformed signature at position {position}: {reason}")]
    MalformedSignature { position: usize, reason: String },
    #[error("Buffer of {buffer_len} bytes is shorter than the {pattern_len} byte pattern")]
    InvalidBufferLength { buffer_len: usize, pattern_len: usize },
    #[error("Duplicate signature name: {0}")]
    DuplicateName(String),
}

impl PatternError {
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedSignature {
            position,
            reason: reason.into(),
        }
    }
}
