//! Hashing and path verification over raw 256-bit words.
//!
//! Words are 32-byte big-endian unsigned integers, the layout of a `uint256` in the EVM ABI.
//! Every entry point decodes its words according to an [InputPolicy] and encodes its results
//! back into words, so results computed here can be compared directly with results computed
//! by any other host of the same hash function.

use alloc::vec::Vec;

use thiserror::Error;

use crate::{
    Felt, FieldError,
    hash::{HashError, Poseidon},
    merkle::{MerkleError, MerkleProof},
};

/// A 256-bit unsigned integer in big-endian byte order.
pub type Uint256 = [u8; 32];

// INPUT POLICY
// ================================================================================================

/// Determines how words that are not smaller than the field modulus are treated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum InputPolicy {
    /// Words are reduced modulo the field modulus.
    #[default]
    Reduce,
    /// Words not smaller than the field modulus are rejected with [FieldError::OutOfRange].
    Reject,
}

/// Errors that can occur at the word interface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

// ABI
// ================================================================================================

/// The word interface of the hash function and the path verifier.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Abi {
    pub policy: InputPolicy,
}

impl Abi {
    pub const fn new(policy: InputPolicy) -> Self {
        Self { policy }
    }

    /// Decodes a word into a field element according to the input policy.
    pub fn decode(&self, word: &Uint256) -> Result<Felt, FieldError> {
        match self.policy {
            InputPolicy::Reduce => Ok(Felt::from_be_bytes_reduced(word)),
            InputPolicy::Reject => Felt::from_be_bytes(word),
        }
    }

    fn decode_all(&self, words: &[Uint256]) -> Result<Vec<Felt>, FieldError> {
        words.iter().map(|word| self.decode(word)).collect()
    }

    /// Returns the Poseidon hash of two words.
    pub fn poseidon_hash(&self, a: &Uint256, b: &Uint256) -> Result<Uint256, AbiError> {
        let digest = Poseidon::hash2(self.decode(a)?, self.decode(b)?);
        Ok(digest.to_be_bytes())
    }

    /// Hashes the pairs `(a[i], b[i])`.
    ///
    /// # Errors
    /// Returns an error if the sequences differ in length, which is checked before any word is
    /// decoded, or if a word is rejected by the input policy.
    pub fn batch_poseidon(&self, a: &[Uint256], b: &[Uint256]) -> Result<Vec<Uint256>, AbiError> {
        if a.len() != b.len() {
            return Err(HashError::LengthMismatch { left: a.len(), right: b.len() }.into());
        }

        let digests = Poseidon::batch_hash2(&self.decode_all(a)?, &self.decode_all(b)?)?;
        Ok(digests.iter().map(Felt::to_be_bytes).collect())
    }

    /// Returns true if the path given by `siblings` and `flags` opens `leaf` to `root`.
    ///
    /// Only the words which are hashed (`leaf` and `siblings`) are decoded into field elements.
    /// The encoded result is compared with `root` as a raw word, so an unreduced root never
    /// verifies, and a path of depth zero verifies only if `leaf` and `root` are the same word.
    ///
    /// # Errors
    /// Returns an error if `siblings` and `flags` differ in length, which is checked before any
    /// word is decoded, or if a word is rejected by the input policy.
    pub fn verify_merkle_path(
        &self,
        root: &Uint256,
        leaf: &Uint256,
        siblings: &[Uint256],
        flags: &[bool],
    ) -> Result<bool, AbiError> {
        if siblings.len() != flags.len() {
            return Err(MerkleError::LengthMismatch {
                siblings: siblings.len(),
                flags: flags.len(),
            }
            .into());
        }
        if self.policy == InputPolicy::Reject {
            self.decode(root)?;
        }

        let leaf_felt = self.decode(leaf)?;
        let proof = MerkleProof::from_parts(&self.decode_all(siblings)?, flags)?;
        if proof.depth() == 0 {
            return Ok(leaf == root);
        }
        Ok(proof.compute_root(leaf_felt).to_be_bytes() == *root)
    }

    /// Computes a chain of `iterations` dependent hashes, see [Poseidon::hash_chain].
    pub fn benchmark_hash(
        &self,
        iterations: u32,
        seed_a: &Uint256,
        seed_b: &Uint256,
    ) -> Result<Uint256, AbiError> {
        let digest = Poseidon::hash_chain(iterations, self.decode(seed_a)?, self.decode(seed_b)?);
        Ok(digest.to_be_bytes())
    }
}

// TESTS
// ================================================================================================
