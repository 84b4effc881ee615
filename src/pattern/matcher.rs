// Fri Oct 16 2026 - Alex

//! Backward, skip accelerated pattern search.
//!
//! The scan walks a cursor from the end of the buffer towards its start. The
//! cursor always sits where the pattern's anchor run would begin for the
//! alignment under test. A byte that does not occur anywhere in the anchor
//! run rules out every alignment whose run covers it, so the cursor jumps by
//! the run length. A byte that occurs in the run but is not its first byte
//! only rules out the current alignment, so the cursor moves by one.
//!
//! The returned offset is the highest one at which the pattern matches.

use crate::pattern::{signature, AnchorMetadata, CompiledPattern, PatternError};
use log::trace;

/// How far below the cursor the read-ahead hint points.
const PREFETCH_DISTANCE: usize = 64;

/// Rightmost offset at which `pattern` matches `buffer`.
pub fn search(pattern: &CompiledPattern, metadata: &AnchorMetadata, buffer: &[u8]) -> Option<usize> {
    scan(pattern, metadata, buffer, true)
}

/// Rightmost match found by testing every alignment in turn. Used for
/// patterns without any exact byte.
pub fn linear_search(pattern: &CompiledPattern, buffer: &[u8]) -> Option<usize> {
    let last_start = buffer.len().checked_sub(pattern.len())?;
    (0..=last_start).rev().find(|&offset| pattern.matches_at(buffer, offset))
}

fn scan(
    pattern: &CompiledPattern,
    metadata: &AnchorMetadata,
    buffer: &[u8],
    use_prefetch: bool,
) -> Option<usize> {
    let pattern_len = pattern.len();
    if pattern_len == 0 || buffer.len() < pattern_len {
        return None;
    }

    // Anchors that are empty or reach past the pattern cannot bound the
    // cursor; metadata built for this pattern only falls here when it has
    // no exact byte.
    let first_byte = match metadata.first_byte() {
        Some(b) if metadata.fits(pattern) => b,
        _ => return linear_search(pattern, buffer),
    };

    let anchor = metadata.anchor();
    let presence = metadata.presence();
    let mut cursor = buffer.len() - pattern_len + anchor.start();

    loop {
        if use_prefetch {
            prefetch(buffer, cursor.saturating_sub(PREFETCH_DISTANCE));
        }

        let c = buffer[cursor];

        let step = if !presence.contains(c) {
            anchor.len()
        } else if c != first_byte {
            1
        } else {
            // Past either edge no alignment further down can fit.
            let delta = match cursor.checked_sub(anchor.start()) {
                Some(delta) if delta + pattern_len <= buffer.len() => delta,
                _ => return None,
            };

            if pattern.matches_at(buffer, delta) {
                trace!("Pattern '{}' matched at offset 0x{:x}", pattern, delta);
                return Some(delta);
            }

            1
        };

        cursor = match cursor.checked_sub(step) {
            Some(next) if next >= anchor.start() => next,
            _ => return None,
        };
    }
}

#[inline(always)]
fn prefetch(buffer: &[u8], offset: usize) {
    debug_assert!(offset < buffer.len());

    #[cfg(all(target_arch = "x86_64", target_feature = "sse"))]
    unsafe {
        use core::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
        _mm_prefetch::<_MM_HINT_T0>(buffer.as_ptr().add(offset) as *const i8);
    }

    #[cfg(all(target_arch = "x86", target_feature = "sse"))]
    unsafe {
        use core::arch::x86::{_mm_prefetch, _MM_HINT_T0};
        _mm_prefetch::<_MM_HINT_T0>(buffer.as_ptr().add(offset) as *const i8);
    }

    #[cfg(not(all(any(target_arch = "x86_64", target_arch = "x86"), target_feature = "sse")))]
    let _ = (buffer, offset);
}

/// A compiled pattern together with its search metadata, ready to be run
/// against any number of buffers.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: CompiledPattern,
    metadata: AnchorMetadata,
    prefetch: bool,
}

impl PatternMatcher {
    pub fn new(pattern: CompiledPattern) -> Self {
        let metadata = AnchorMetadata::build(&pattern);
        Self {
            pattern,
            metadata,
            prefetch: true,
        }
    }

    pub fn from_signature(signature: &str) -> Result<Self, PatternError> {
        Ok(Self::new(signature::compile(signature)?))
    }

    pub fn with_prefetch(mut self, prefetch: bool) -> Self {
        self.prefetch = prefetch;
        self
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    pub fn metadata(&self) -> &AnchorMetadata {
        &self.metadata
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn search(&self, buffer: &[u8]) -> Option<usize> {
        scan(&self.pattern, &self.metadata, buffer, self.prefetch)
    }

    /// Like [`search`](Self::search) but reports a buffer shorter than the
    /// pattern as an error instead of a miss.
    pub fn try_search(&self, buffer: &[u8]) -> Result<Option<usize>, PatternError> {
        if buffer.len() < self.pattern.len() {
            return Err(PatternError::InvalidBufferLength {
                buffer_len: buffer.len(),
                pattern_len: self.pattern.len(),
            });
        }
        Ok(self.search(buffer))
    }
}
