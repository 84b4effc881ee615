// Fri Oct 16 2026 - Alex

use crate::pattern::CompiledPattern;
use log::debug;

/// Longest contiguous span of exact bytes in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorRun {
    start: usize,
    len: usize,
}

impl AnchorRun {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Finds the longest run of exact slots. On ties the earliest run wins.
    /// A pattern made only of wildcards yields `len == 0`.
    pub fn find(mask: &[bool]) -> Self {
        let mut best = AnchorRun::default();
        let mut i = 0;

        while i < mask.len() {
            if !mask[i] {
                i += 1;
                continue;
            }

            let run_start = i;
            while i < mask.len() && mask[i] {
                i += 1;
            }

            let run_len = i - run_start;
            if run_len > best.len {
                best = AnchorRun {
                    start: run_start,
                    len: run_len,
                };
            }
        }

        best
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Which byte values occur inside the anchor run.
#[derive(Clone, PartialEq, Eq)]
pub struct PresenceTable([bool; 256]);

impl PresenceTable {
    pub fn empty() -> Self {
        Self([false; 256])
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::empty();
        for &b in bytes {
            table.0[b as usize] = true;
        }
        table
    }

    #[inline(always)]
    pub fn contains(&self, byte: u8) -> bool {
        self.0[byte as usize]
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&present| present).count()
    }
}

impl std::fmt::Debug for PresenceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let present: Vec<String> = (0..=255u8)
            .filter(|&b| self.contains(b))
            .map(|b| format!("{:02X}", b))
            .collect();
        f.debug_tuple("PresenceTable").field(&present).finish()
    }
}

/// Search acceleration data derived once per pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMetadata {
    anchor: AnchorRun,
    /// `None` only when the pattern has no exact byte.
    first_byte: Option<u8>,
    presence: PresenceTable,
}

impl AnchorMetadata {
    pub fn anchor(&self) -> AnchorRun {
        self.anchor
    }

    pub fn first_byte(&self) -> Option<u8> {
        self.first_byte
    }

    pub fn presence(&self) -> &PresenceTable {
        &self.presence
    }

    /// True when these anchors can drive a search for `pattern`: the run has
    /// at least one byte and lies inside the pattern.
    pub fn fits(&self, pattern: &CompiledPattern) -> bool {
        self.first_byte.is_some() && !self.anchor.is_empty() && self.anchor.end() <= pattern.len()
    }

    pub fn build(pattern: &CompiledPattern) -> Self {
        let anchor = AnchorRun::find(pattern.mask());

        if anchor.is_empty() {
            debug!("Pattern '{}' has no exact bytes, searches fall back to a linear scan", pattern);
            return Self {
                anchor,
                first_byte: None,
                presence: PresenceTable::empty(),
            };
        }

        let run = &pattern.bytes()[anchor.start..anchor.end()];
        let presence = PresenceTable::from_bytes(run);

        debug!(
            "Anchor run for '{}': start {} len {} ({} distinct bytes)",
            pattern,
            anchor.start,
            anchor.len,
            presence.count()
        );

        Self {
            anchor,
            first_byte: Some(run[0]),
            presence,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.anchor.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::matcher::search;
    use crate::pattern::signature::compile;

    #[test]
    fn test_longest_run_wins() {
        let pattern = compile("48 ?? 8B 05 C3 ?? 90 90").unwrap();
        let meta = AnchorMetadata::build(&pattern);
        assert_eq!(meta.anchor, AnchorRun { start: 2, len: 3 });
        assert_eq!(meta.first_byte, Some(0x8B));
        assert!(meta.presence.contains(0x8B));
        assert!(meta.presence.contains(0x05));
        assert!(meta.presence.contains(0xC3));
        assert!(!meta.presence.contains(0x48));
        assert!(!meta.presence.contains(0x90));
        assert_eq!(meta.presence.count(), 3);
    }

    #[test]
    fn test_ties_go_to_earliest_run() {
        let pattern = compile("11 22 ?? 33 44 ?? 55 66").unwrap();
        let meta = AnchorMetadata::build(&pattern);
        assert_eq!(meta.anchor, AnchorRun { start: 0, len: 2 });
        assert_eq!(meta.first_byte, Some(0x11));
    }

    #[test]
    fn test_run_at_tail() {
        let pattern = compile("?? ?? 0F 1F 44").unwrap();
        let meta = AnchorMetadata::build(&pattern);
        assert_eq!(meta.anchor, AnchorRun { start: 2, len: 3 });
        assert_eq!(meta.anchor.end(), 5);
    }

    #[test]
    fn test_repeated_bytes_in_run() {
        let pattern = compile("90 90 ?? 90").unwrap();
        let meta = AnchorMetadata::build(&pattern);
        assert_eq!(meta.anchor, AnchorRun { start: 0, len: 2 });
        assert_eq!(meta.presence.count(), 1);
    }

    #[test]
    fn test_all_wildcards_is_degenerate() {
        let pattern = compile("?? ? ??").unwrap();
        let meta = AnchorMetadata::build(&pattern);
        assert!(meta.is_degenerate());
        assert_eq!(meta.first_byte, None);
        assert_eq!(meta.presence.count(), 0);
    }

    #[test]
    fn test_presence_ignores_wildcard_placeholder() {
        // Wildcards hold 0xAA internally; it must not leak into the table.
        let pattern = compile("?? 10 20 ??").unwrap();
        let meta = AnchorMetadata::build(&pattern);
        assert!(!meta.presence.contains(0xAA));
    }

    #[test]
    fn test_fits_own_pattern_only() {
        let short = compile("AA").unwrap();
        let long = compile("?? ?? ?? AA").unwrap();
        assert!(AnchorMetadata::build(&short).fits(&short));
        assert!(AnchorMetadata::build(&long).fits(&long));
        assert!(!AnchorMetadata::build(&long).fits(&short));
        assert!(!AnchorMetadata::build(&compile("?? ??").unwrap()).fits(&short));
    }

    #[test]
    fn test_search_with_metadata_from_longer_pattern() {
        let short = compile("AA").unwrap();
        let foreign = AnchorMetadata::build(&compile("?? ?? ?? AA").unwrap());
        assert_eq!(search(&short, &foreign, &[0xAA]), Some(0));
        assert_eq!(search(&short, &foreign, &[0xAA, 0x00, 0xAA, 0x01]), Some(2));
        assert_eq!(search(&short, &foreign, &[0x00, 0x01]), None);
    }

    #[test]
    fn test_search_with_empty_run_and_first_byte_terminates() {
        let pattern = compile("AA").unwrap();
        let inconsistent = AnchorMetadata {
            anchor: AnchorRun { start: 0, len: 0 },
            first_byte: Some(0xAA),
            presence: PresenceTable::empty(),
        };
        assert_eq!(search(&pattern, &inconsistent, &[0x00, 0x00]), None);
        assert_eq!(search(&pattern, &inconsistent, &[0xAA, 0x00]), Some(0));
    }
}
