//! Data generation utilities for consistent benchmark inputs.

#![allow(dead_code)]

use poseidon_bn254::Felt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seed shared by all benchmarks so that every run hashes the same inputs.
const SEED: u64 = 0x5eed;

/// Generate field element array with sequential values starting at 1.
pub fn generate_felt_array_sequential(size: usize) -> Vec<Felt> {
    (1..=size as u64).map(Felt::from_u64).collect()
}

/// Generate field element array with uniformly random values.
pub fn generate_felt_array_random(size: usize) -> Vec<Felt> {
    let mut rng = ChaCha20Rng::seed_from_u64(SEED ^ size as u64);
    (0..size).map(|_| rng.random()).collect()
}

/// Generate a random path of the given depth as position-paired siblings and flags.
pub fn generate_path(depth: usize) -> (Vec<Felt>, Vec<bool>) {
    let mut rng = ChaCha20Rng::seed_from_u64(SEED ^ depth as u64);
    (0..depth).map(|_| (rng.random::<Felt>(), rng.random::<bool>())).unzip()
}
