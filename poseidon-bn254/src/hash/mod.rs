//! Poseidon hash function over the BN254 scalar field.

use thiserror::Error;

use super::Felt;

pub mod poseidon;
pub use poseidon::Poseidon;

// CONSTANTS
// ================================================================================================

const ZERO: Felt = Felt::ZERO;

// HASH ERROR
// ================================================================================================

/// Errors that can occur when hashing batches of field elements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The two input sequences of a batch hash have different lengths.
    #[error("batch inputs have different lengths: {left} left elements and {right} right elements")]
    LengthMismatch {
        /// Number of elements in the left sequence.
        left: usize,
        /// Number of elements in the right sequence.
        right: usize,
    },
}
