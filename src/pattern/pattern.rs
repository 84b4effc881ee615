// Fri Oct 16 2026 - Alex

use crate::pattern::{signature, PatternError};
use std::fmt;
use std::str::FromStr;

/// Value stored in wildcard slots. Never compared against input.
pub const WILDCARD_PLACEHOLDER: u8 = 0xAA;

/// Byte/mask pair produced from a signature. `mask[i]` is `true` for an exact
/// byte and `false` for a wildcard; both arrays always have the same length.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    bytes: Vec<u8>,
    mask: Vec<bool>,
}

impl CompiledPattern {
    pub(crate) fn from_parts(bytes: Vec<u8>, mask: Vec<bool>) -> Self {
        debug_assert_eq!(bytes.len(), mask.len());
        let bytes = bytes
            .into_iter()
            .zip(mask.iter())
            .map(|(b, &exact)| if exact { b } else { WILDCARD_PLACEHOLDER })
            .collect();
        Self { bytes, mask }
    }

    pub fn new(bytes: Vec<u8>, mask: Vec<bool>) -> Result<Self, PatternError> {
        if bytes.len() != mask.len() {
            return Err(PatternError::malformed(
                bytes.len().min(mask.len()),
                format!("{} bytes but {} mask entries", bytes.len(), mask.len()),
            ));
        }
        if bytes.is_empty() {
            return Err(PatternError::malformed(0, "pattern is empty"));
        }
        Ok(Self::from_parts(bytes, mask))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PatternError> {
        Self::new(bytes.to_vec(), vec![true; bytes.len()])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    pub fn is_exact(&self, index: usize) -> bool {
        self.mask[index]
    }

    /// Checks the pattern against `data` at `offset`, wildcards always passing.
    pub fn matches_at(&self, data: &[u8], offset: usize) -> bool {
        let end = match offset.checked_add(self.len()) {
            Some(end) if end <= data.len() => end,
            _ => return false,
        };

        self.bytes
            .iter()
            .zip(self.mask.iter())
            .zip(data[offset..end].iter())
            .all(|((pattern_byte, &exact), &data_byte)| !exact || *pattern_byte == data_byte)
    }

    pub fn exact_byte_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    pub fn wildcard_byte_count(&self) -> usize {
        self.mask.iter().filter(|&&m| !m).count()
    }

    /// Canonical signature text, e.g. `48 8B ?? C3`.
    pub fn to_signature(&self) -> String {
        self.bytes
            .iter()
            .zip(self.mask.iter())
            .map(|(b, &m)| {
                if m {
                    format!("{:02X}", b)
                } else {
                    "??".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_signature())
    }
}

impl FromStr for CompiledPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        signature::compile(s)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes && self.mask == other.mask
    }
}

impl Eq for CompiledPattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_slots_hold_placeholder() {
        let pattern = CompiledPattern::new(vec![0x48, 0x00, 0xC3], vec![true, false, true]).unwrap();
        assert_eq!(pattern.bytes(), &[0x48, WILDCARD_PLACEHOLDER, 0xC3]);
        assert_eq!(pattern.exact_byte_count(), 2);
        assert_eq!(pattern.wildcard_byte_count(), 1);
    }

    #[test]
    fn test_rejects_mismatched_or_empty() {
        assert!(CompiledPattern::new(vec![1, 2], vec![true]).is_err());
        assert!(CompiledPattern::new(Vec::new(), Vec::new()).is_err());
        assert!(CompiledPattern::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_matches_at() {
        let pattern = CompiledPattern::new(vec![0x11, 0, 0x33], vec![true, false, true]).unwrap();
        let data = [0x00, 0x11, 0x99, 0x33, 0x00];
        assert!(pattern.matches_at(&data, 1));
        assert!(!pattern.matches_at(&data, 0));
        assert!(!pattern.matches_at(&data, 3));
        assert!(!pattern.matches_at(&data, usize::MAX));
    }

    #[test]
    fn test_to_signature_and_display() {
        let pattern = CompiledPattern::new(vec![0x48, 0, 0x0F], vec![true, false, true]).unwrap();
        assert_eq!(pattern.to_signature(), "48 ?? 0F");
        assert_eq!(pattern.to_string(), "48 ?? 0F");
    }

    #[test]
    fn test_from_str() {
        let pattern: CompiledPattern = "E8 ? ? ? ? 90".parse().unwrap();
        assert_eq!(pattern.len(), 6);
        assert_eq!(pattern.to_signature(), "E8 ?? ?? ?? ?? 90");
    }
}
