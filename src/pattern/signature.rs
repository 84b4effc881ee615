// Fri Oct 16 2026 - Alex

//! IDA-style signature compiler.
//!
//! A signature is a list of whitespace separated tokens. Each token is one or
//! two hex digits (an exact byte, optionally written with a `0x` prefix) or
//! `?`/`??` (a single wildcard byte).

use crate::pattern::hex;
use crate::pattern::pattern::WILDCARD_PLACEHOLDER;
use crate::pattern::{CompiledPattern, PatternError};
use log::debug;

/// Counts the slots `signature` will compile to without allocating.
///
/// Applies the same whitespace skipping and `??` coalescing as [`compile`].
/// Characters the compiler would reject are stepped over and not counted.
pub fn count_slots(signature: &str) -> usize {
    let s = signature.as_bytes();
    let mut slots = 0;
    let mut i = 0;

    while i < s.len() {
        let c = s[i];

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if c == b'?' {
            i += if s.get(i + 1) == Some(&b'?') { 2 } else { 1 };
            slots += 1;
            continue;
        }

        match hex::parse_prefix(&s[i..]).consumed {
            0 => i += 1,
            n => {
                i += n;
                slots += 1;
            }
        }
    }

    slots
}

/// Compiles a signature into its byte/mask representation.
pub fn compile(signature: &str) -> Result<CompiledPattern, PatternError> {
    if signature.trim().is_empty() {
        return Err(PatternError::malformed(0, "signature is empty"));
    }

    let expected = count_slots(signature);
    let s = signature.as_bytes();
    let mut bytes = Vec::with_capacity(expected);
    let mut mask = Vec::with_capacity(expected);
    let mut i = 0;

    while i < s.len() {
        let c = s[i];

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if c == b'?' {
            bytes.push(WILDCARD_PLACEHOLDER);
            mask.push(false);
            i += if s.get(i + 1) == Some(&b'?') { 2 } else { 1 };
            continue;
        }

        let prefix = hex::parse_prefix(&s[i..]);
        if prefix.consumed == 0 {
            let found = signature[i..].chars().next().unwrap_or_default();
            return Err(PatternError::malformed(
                i,
                format!("unexpected character {:?}", found),
            ));
        }
        if prefix.digits > 2 {
            return Err(PatternError::malformed(
                i,
                format!("byte token has {} hex digits", prefix.digits),
            ));
        }

        bytes.push(prefix.value as u8);
        mask.push(true);
        i += prefix.consumed;
    }

    debug_assert_eq!(bytes.len(), expected);

    let pattern = CompiledPattern::from_parts(bytes, mask);
    debug!(
        "Compiled signature '{}' into {} slots ({} exact)",
        signature.trim(),
        pattern.len(),
        pattern.exact_byte_count()
    );
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_reference_signature() {
        let pattern = compile("48 8B ?? ?? 05 ?? ?? ?? ?? C3").unwrap();
        assert_eq!(pattern.len(), 10);
        assert_eq!(pattern.bytes()[0], 0x48);
        assert_eq!(pattern.bytes()[1], 0x8B);
        assert_eq!(pattern.bytes()[4], 0x05);
        assert_eq!(pattern.bytes()[9], 0xC3);
        assert_eq!(
            pattern.mask(),
            &[true, true, false, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_single_and_double_wildcard_coalesce() {
        let single = compile("?").unwrap();
        let double = compile("??").unwrap();
        assert_eq!(single, double);
        assert_eq!(single.len(), 1);
        assert_eq!(single.mask(), &[false]);
    }

    #[test]
    fn test_triple_question_mark_is_two_slots() {
        let pattern = compile("???").unwrap();
        assert_eq!(pattern.len(), 2);
        assert_eq!(count_slots("???"), 2);
    }

    #[test]
    fn test_wildcard_needs_no_separator() {
        let pattern = compile("??48?8B").unwrap();
        assert_eq!(pattern.to_signature(), "?? 48 ?? 8B");
    }

    #[test]
    fn test_tabs_and_newlines_are_whitespace() {
        let pattern = compile("\t48\n8b  \r\n ?? c3 ").unwrap();
        assert_eq!(pattern.to_signature(), "48 8B ?? C3");
    }

    #[test]
    fn test_hex_prefix_and_single_digit() {
        let pattern = compile("0x48 0XFF 5").unwrap();
        assert_eq!(pattern.bytes(), &[0x48, 0xFF, 0x05]);
    }

    #[test]
    fn test_count_matches_compiled_length() {
        for sig in ["48 8B ?? ?? 05", "?", "?? ??", "E8 ? ? ? ? 90", "0x10 ?? 20"] {
            assert_eq!(count_slots(sig), compile(sig).unwrap().len(), "{}", sig);
        }
    }

    #[test]
    fn test_empty_signature_is_malformed() {
        assert!(matches!(compile(""), Err(PatternError::MalformedSignature { .. })));
        assert!(matches!(compile("  \t "), Err(PatternError::MalformedSignature { .. })));
    }

    #[test]
    fn test_stray_character_is_malformed() {
        match compile("48 ZZ 8B") {
            Err(PatternError::MalformedSignature { position, .. }) => assert_eq!(position, 3),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(compile("48 8G").is_err());
        assert!(compile("48 * 8B").is_err());
        assert!(compile("48 é").is_err());
        assert!(compile("0x").is_err());
    }

    #[test]
    fn test_overlong_token_is_malformed() {
        assert!(compile("488B").is_err());
        assert!(compile("48 100").is_err());
    }
}
