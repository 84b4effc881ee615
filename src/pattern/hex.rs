// Fri Oct 16 2026 - Alex

/// Result of reading a hexadecimal number from the front of a byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexPrefix {
    pub value: u32,
    /// Hex digits read, not counting the `0x` prefix or leading blanks.
    pub digits: usize,
    /// Bytes of input covered by the number. Zero when no digit was read,
    /// so a caller resuming at `consumed` never moves past garbage.
    pub consumed: usize,
}

/// Reads an unsigned hexadecimal number the way `strtoul(s, &end, 16)` does:
/// leading spaces and tabs are skipped, an optional `0x`/`0X` prefix is
/// accepted and reading stops at the first non-hex character.
pub fn parse_prefix(input: &[u8]) -> HexPrefix {
    let mut i = 0;

    while i < input.len() && (input[i] == b' ' || input[i] == b'\t') {
        i += 1;
    }

    if i + 1 < input.len() && input[i] == b'0' && (input[i + 1] == b'x' || input[i + 1] == b'X') {
        i += 2;
    }

    let mut value: u32 = 0;
    let mut digits = 0;

    while let Some(digit) = input.get(i).and_then(|&c| hex_digit(c)) {
        value = value.saturating_mul(16).saturating_add(digit as u32);
        digits += 1;
        i += 1;
    }

    HexPrefix {
        value,
        digits,
        consumed: if digits == 0 { 0 } else { i },
    }
}

pub fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
