// Fri Oct 16 2026 - Alex

pub mod builder;
pub mod database;
pub mod error;
pub mod hex;
pub mod match_result;
pub mod matcher;
pub mod metadata;
pub mod pattern;
pub mod signature;

pub use builder::PatternBuilder;
pub use database::{NamedSignature, SignatureEntry, SignatureSet};
pub use error::PatternError;
pub use match_result::ScanHit;
pub use matcher::{search, PatternMatcher};
pub use metadata::{AnchorMetadata, AnchorRun, PresenceTable};
pub use pattern::CompiledPattern;
pub use signature::compile;

/// Compiles `signature` and returns the rightmost offset where it matches
/// `buffer`. Convenient for one-off searches; repeated searches should keep a
/// [`PatternMatcher`] around instead.
pub fn find(signature: &str, buffer: &[u8]) -> Result<Option<usize>, PatternError> {
    Ok(PatternMatcher::from_signature(signature)?.search(buffer))
}
