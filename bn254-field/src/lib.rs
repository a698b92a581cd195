//! Arithmetic in the scalar field of the BN254 (alt_bn128) curve.
//!
//! This crate provides a single `Felt` type: an element of the prime field of order
//! p = 21888242871839275222246405745257275088548364400416034343698204186575808495617, stored in
//! Montgomery form over four 64-bit limbs. Every value of the type is fully reduced.

#![no_std]

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use alloc::string::String;

use thiserror::Error;

mod arith;

mod felt;
pub use felt::Felt;

pub mod utils;
use utils::HexParseError;

// ERRORS
// ================================================================================================

/// Errors which can occur when constructing a [Felt] from untrusted input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("integer is not smaller than the field modulus")]
    OutOfRange,
    #[error("invalid hex encoded field element")]
    InvalidHex(#[from] HexParseError),
    #[error("`{0}` is not a valid decimal integer")]
    InvalidDecimal(String),
}
