// Fri Oct 16 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Binary parse error: {0}")]
    BinaryParseError(String),
    #[error("Section not found: {0}")]
    SectionNotFound(String),
    #[error("Out of bounds: range 0x{start:x}..0x{end:x} exceeds {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("Not supported: {0}")]
    NotSupported(String),
}
