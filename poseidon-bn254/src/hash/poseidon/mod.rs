use alloc::vec::Vec;

#[cfg(feature = "concurrent")]
use rayon::prelude::*;

use super::{Felt, HashError, ZERO};

mod constants;
use constants::{MDS, NUM_FULL_ROUNDS_HALF, NUM_PARTIAL_ROUNDS, ROUND_CONSTANTS};

#[cfg(test)]
mod tests;

// CONSTANTS
// ================================================================================================

/// Sponge state is set to 3 field elements: one capacity element followed by two rate elements.
const STATE_WIDTH: usize = 3;

/// Total number of rounds: 4 full, 57 partial, 4 full.
const NUM_ROUNDS: usize = 2 * NUM_FULL_ROUNDS_HALF + NUM_PARTIAL_ROUNDS;

/// Index of the capacity element; it is zero when a hash call starts.
const CAPACITY_IDX: usize = 0;

/// Index of the state element returned as the hash output.
const DIGEST_IDX: usize = 0;

// POSEIDON
// ================================================================================================

/// Implementation of the Poseidon hash function over the BN254 scalar field.
///
/// The instance is the one used by circomlib and its ports for 2-to-1 hashing, so digests are
/// interchangeable with any other implementation of that instance:
/// * Field: the BN254 scalar field, see [Felt].
/// * State width: 3 field elements; element 0 is the capacity, elements 1 and 2 take the inputs.
/// * S-Box: x^5.
/// * Rounds: 65 rounds, each `add_constants` → `apply_sbox` → `apply_mds`, structured as
/// - Initial full rounds (4): the S-box is applied to every state element.
/// - Partial rounds (57): the S-box is applied to the first state element only.
/// - Terminal full rounds (4): identical in shape to the initial full rounds.
///
/// The digest is the first state element after the last round. Changing the round counts, the
/// S-box placement, or the order of the constants yields a different hash function.
///
/// All functions are pure; concurrent calls never share state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Poseidon();

impl Poseidon {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// Number of field elements in the permutation state.
    pub const STATE_WIDTH: usize = STATE_WIDTH;

    /// Number of initial or terminal full rounds.
    pub const NUM_FULL_ROUNDS_HALF: usize = NUM_FULL_ROUNDS_HALF;

    /// Number of partial rounds.
    pub const NUM_PARTIAL_ROUNDS: usize = NUM_PARTIAL_ROUNDS;

    /// Total number of rounds.
    pub const NUM_ROUNDS: usize = NUM_ROUNDS;

    /// Index of the capacity element; it is zero when a hash call starts.
    pub const CAPACITY_IDX: usize = CAPACITY_IDX;

    /// Index of the state element returned as the hash output.
    pub const DIGEST_IDX: usize = DIGEST_IDX;

    /// Matrix used for the linear layer of every round.
    pub const MDS: [[Felt; STATE_WIDTH]; STATE_WIDTH] = MDS;

    /// Round constants added to the hasher state, one row per round.
    pub const ROUND_CONSTANTS: [[Felt; STATE_WIDTH]; NUM_ROUNDS] = ROUND_CONSTANTS;

    // HASH FUNCTIONS
    // --------------------------------------------------------------------------------------------

    /// Returns the hash of two field elements.
    ///
    /// The state is initialized to `[0, a, b]`, permuted, and its first element is returned.
    #[inline]
    pub fn hash2(a: Felt, b: Felt) -> Felt {
        let mut state: [Felt; STATE_WIDTH] = [ZERO, a, b];

        Self::apply_permutation(&mut state);
        state[DIGEST_IDX]
    }

    /// Returns a hash of two nodes. This is the same function as [Self::hash2()], intended for
    /// use in construction of Merkle trees and verification of Merkle paths.
    #[inline(always)]
    pub fn merge(values: &[Felt; 2]) -> Felt {
        Self::hash2(values[0], values[1])
    }

    /// Hashes the pairs `(a[i], b[i])` and returns the digests in input order.
    ///
    /// When the `concurrent` feature is enabled the pairs are hashed in parallel.
    ///
    /// # Errors
    /// Returns an error if `a` and `b` have different lengths; nothing is hashed in that case.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(len = a.len()))
    )]
    pub fn batch_hash2(a: &[Felt], b: &[Felt]) -> Result<Vec<Felt>, HashError> {
        if a.len() != b.len() {
            #[cfg(feature = "tracing")]
            tracing::debug!(left = a.len(), right = b.len(), "batch inputs differ in length");
            return Err(HashError::LengthMismatch { left: a.len(), right: b.len() });
        }

        #[cfg(feature = "concurrent")]
        let digests = a.par_iter().zip(b.par_iter()).map(|(&x, &y)| Self::hash2(x, y)).collect();

        #[cfg(not(feature = "concurrent"))]
        let digests = a.iter().zip(b.iter()).map(|(&x, &y)| Self::hash2(x, y)).collect();

        Ok(digests)
    }

    /// Computes a chain of dependent hashes: `hash2(seed_a, seed_b)` followed by
    /// `iterations - 1` applications of `r = hash2(r, seed_b)`.
    ///
    /// This measures sequential hashing cost; with `iterations` of 0 or 1 a single hash is
    /// computed.
    pub fn hash_chain(iterations: u32, seed_a: Felt, seed_b: Felt) -> Felt {
        let mut result = Self::hash2(seed_a, seed_b);
        for _ in 1..iterations {
            result = Self::hash2(result, seed_b);
        }
        result
    }

    // POSEIDON PERMUTATION
    // --------------------------------------------------------------------------------------------

    /// Applies the Poseidon permutation to the provided state.
    pub fn apply_permutation(state: &mut [Felt; STATE_WIDTH]) {
        Self::initial_full_rounds(state);
        Self::partial_rounds(state);
        Self::terminal_full_rounds(state);
    }

    /// Applies the initial full rounds of the permutation.
    #[inline(always)]
    fn initial_full_rounds(state: &mut [Felt; STATE_WIDTH]) {
        for ark in ROUND_CONSTANTS[..NUM_FULL_ROUNDS_HALF].iter() {
            Self::add_rc(state, ark);
            Self::apply_sbox(state);
            Self::apply_mds(state);
        }
    }

    /// Applies the partial rounds of the permutation.
    #[inline(always)]
    fn partial_rounds(state: &mut [Felt; STATE_WIDTH]) {
        let start = NUM_FULL_ROUNDS_HALF;
        for ark in ROUND_CONSTANTS[start..start + NUM_PARTIAL_ROUNDS].iter() {
            Self::add_rc(state, ark);
            state[0] = state[0].exp5();
            Self::apply_mds(state);
        }
    }

    /// Applies the terminal full rounds of the permutation.
    #[inline(always)]
    fn terminal_full_rounds(state: &mut [Felt; STATE_WIDTH]) {
        for ark in ROUND_CONSTANTS[NUM_FULL_ROUNDS_HALF + NUM_PARTIAL_ROUNDS..].iter() {
            Self::add_rc(state, ark);
            Self::apply_sbox(state);
            Self::apply_mds(state);
        }
    }

    /// Adds the round constants to the state.
    #[inline(always)]
    fn add_rc(state: &mut [Felt; STATE_WIDTH], ark: &[Felt; STATE_WIDTH]) {
        state.iter_mut().zip(ark).for_each(|(s, &k)| *s += k);
    }

    /// Applies the sbox entry-wise to the state.
    #[inline(always)]
    fn apply_sbox(state: &mut [Felt; STATE_WIDTH]) {
        state[0] = state[0].exp5();
        state[1] = state[1].exp5();
        state[2] = state[2].exp5();
    }

    /// Multiplies the state by the MDS matrix.
    #[inline(always)]
    fn apply_mds(state: &mut [Felt; STATE_WIDTH]) {
        let mut result = [ZERO; STATE_WIDTH];
        for (r, row) in result.iter_mut().zip(MDS.iter()) {
            *r = row.iter().zip(state.iter()).map(|(&m, &s)| m * s).sum();
        }
        *state = result;
    }
}
