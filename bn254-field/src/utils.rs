use alloc::string::String;
use core::fmt::Write;

use thiserror::Error;

/// Renders an array of bytes as hex into a String.
pub fn bytes_to_hex_string<const N: usize>(data: [u8; N]) -> String {
    let mut s = String::with_capacity(2 * N + 2);

    s.push_str("0x");
    for byte in data.iter() {
        write!(s, "{byte:02x}").expect("formatting hex failed");
    }

    s
}

/// Defines errors which can occur during parsing of hexadecimal strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexParseError {
    #[error("expected at most {max} hex digits after the 0x prefix, found {actual}")]
    TooLong { max: usize, actual: usize },
    #[error("hex encoded data must start with 0x prefix")]
    MissingPrefix,
    #[error("hex encoded data must contain at least one digit")]
    Empty,
    #[error("hex encoded data must contain only characters [0-9a-fA-F]")]
    InvalidChar,
}

/// Parses a `0x`-prefixed hex string of up to `2 * N` digits into a big-endian byte array of
/// size `N`. Shorter inputs are left-padded with zeros.
pub fn hex_to_bytes<const N: usize>(value: &str) -> Result<[u8; N], HexParseError> {
    let digits = value.strip_prefix("0x").ok_or(HexParseError::MissingPrefix)?;
    if digits.is_empty() {
        return Err(HexParseError::Empty);
    }
    if digits.len() > 2 * N {
        return Err(HexParseError::TooLong { max: 2 * N, actual: digits.len() });
    }

    let mut decoded = [0u8; N];
    // walk from the least significant digit so that short inputs are left-padded
    for (i, digit) in digits.bytes().rev().enumerate() {
        let nibble = match digit {
            b'0'..=b'9' => digit - b'0',
            b'a'..=b'f' => digit - b'a' + 10,
            b'A'..=b'F' => digit - b'A' + 10,
            _ => return Err(HexParseError::InvalidChar),
        };
        let byte = &mut decoded[N - 1 - i / 2];
        if i % 2 == 0 {
            *byte |= nibble;
        } else {
            *byte |= nibble << 4;
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_padding() {
        let bytes: [u8; 4] = hex_to_bytes("0xdeadbeef").unwrap();
        assert_eq!(bytes, [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(bytes_to_hex_string(bytes), "0xdeadbeef");

        let padded: [u8; 4] = hex_to_bytes("0x1Ab").unwrap();
        assert_eq!(padded, [0, 0, 0x01, 0xab]);
    }

    #[test]
    fn hex_rejects_malformed_input() {
        assert_eq!(hex_to_bytes::<4>("deadbeef"), Err(HexParseError::MissingPrefix));
        assert_eq!(hex_to_bytes::<4>("0x"), Err(HexParseError::Empty));
        assert_eq!(hex_to_bytes::<4>("0x0g"), Err(HexParseError::InvalidChar));
        assert_eq!(
            hex_to_bytes::<2>("0x12345"),
            Err(HexParseError::TooLong { max: 4, actual: 5 })
        );
    }
}
