// Fri Oct 16 2026 - Alex

//! IDA-style byte signature scanning.
//!
//! ```
//! use sigscan::PatternMatcher;
//!
//! let matcher = PatternMatcher::from_signature("11 ?? 33").unwrap();
//! assert_eq!(matcher.search(&[0x00, 0x11, 0x99, 0x33, 0x00]), Some(1));
//! ```

pub mod config;
pub mod memory;
pub mod output;
pub mod pattern;
pub mod utils;

pub use config::Config;
pub use memory::{BufferView, MappedFile};
pub use output::ScanReport;
pub use pattern::{compile, AnchorMetadata, CompiledPattern, PatternError, PatternMatcher, SignatureSet};

#[doc(hidden)]
pub use once_cell;
