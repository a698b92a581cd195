//! Utilities used in this crate which can also be generally useful downstream.

use alloc::string::String;

pub use bn254_field::utils::{HexParseError, bytes_to_hex_string, hex_to_bytes};
use num::BigUint;
use thiserror::Error;
#[cfg(feature = "std")]
pub use winter_utils::ReadAdapter;
pub use winter_utils::{
    ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable, SliceReader,
};

use crate::abi::Uint256;

// WORD ENCODING
// ================================================================================================

/// Defines errors which can occur when parsing textual 256-bit words.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordParseError {
    #[error("invalid hex word")]
    InvalidHex(#[from] HexParseError),
    #[error("`{0}` is not a decimal number")]
    InvalidDecimal(String),
    #[error("`{0}` does not fit into 256 bits")]
    TooLarge(String),
}

/// Parses a `0x`-prefixed hex string or a decimal string into a big-endian 256-bit word.
///
/// The value is not reduced; any integer below 2^256 is accepted.
pub fn parse_word(value: &str) -> Result<Uint256, WordParseError> {
    if value.starts_with("0x") {
        return Ok(hex_to_bytes::<32>(value)?);
    }

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WordParseError::InvalidDecimal(value.into()));
    }
    let number = BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| WordParseError::InvalidDecimal(value.into()))?;

    let bytes = number.to_bytes_be();
    if bytes.len() > 32 {
        return Err(WordParseError::TooLarge(value.into()));
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

/// Renders a 256-bit word as `0x` followed by 64 hex digits.
pub fn word_to_hex(word: &Uint256) -> String {
    bytes_to_hex_string(*word)
}
