use alloc::vec::Vec;

use assert_matches::assert_matches;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::{Felt, HashError, Poseidon, STATE_WIDTH, ZERO};

fn felt(hex: &str) -> Felt {
    hex.parse().unwrap()
}

/// Field elements drawn from the full range of the field.
fn any_felt() -> impl Strategy<Value = Felt> {
    any::<[u64; 4]>().prop_map(Felt::from_raw)
}

const HASH_1_2: &str = "0x115cc0f5e7d690413df64c6b9662e9cf2a3617f2743245519e19607a4417189a";

// TEST VECTORS
// ================================================================================================

#[test]
fn hash2_matches_circomlib_vector() {
    // poseidon([1, 2]) as computed by circomlibjs
    let digest = Poseidon::hash2(Felt::from_u64(1), Felt::from_u64(2));
    assert_eq!(digest, felt(HASH_1_2));
}

#[test]
fn permutation_test_vector() {
    let mut state = [ZERO, Felt::from_u64(1), Felt::from_u64(2)];
    Poseidon::apply_permutation(&mut state);

    assert_eq!(state[0], felt(HASH_1_2));
    assert_eq!(
        state[1],
        felt("0x0fca49b798923ab0239de1c9e7a4a9a2210312b6a2f616d18b5a87f9b628ae29")
    );
    assert_eq!(
        state[2],
        felt("0x0e7ae82e40091e63cbd4f16a6d16310b3729d4b6e138fcf54110e2867045a30c")
    );
}

#[test]
fn hash2_of_zeros_is_not_zero() {
    let digest = Poseidon::hash2(ZERO, ZERO);
    assert_eq!(digest, felt("0x2098f5fb9e239eab3ceac3f27b81e481dc3124d55ffed523a839ee8446b64864"));
    assert_ne!(digest, ZERO);
}

#[test]
fn hash2_is_order_sensitive() {
    let digest = Poseidon::hash2(Felt::from_u64(2), Felt::from_u64(1));
    assert_eq!(digest, felt("0x1576c555b70c9b778666e91d600fdc6d73f30aeed2f6adc5360d6a052259775a"));
    assert_ne!(digest, felt(HASH_1_2));
}

#[test]
fn hash2_of_largest_elements() {
    let max = -Felt::ONE;
    assert_eq!(
        Poseidon::hash2(max, max),
        felt("0x2c6bd813a6338781378d8706cb82fd4216ab52b752ccd41564d7b98756a6e0fb")
    );
}

#[test]
fn merge_is_hash2() {
    let (a, b) = (Felt::from_u64(1), Felt::from_u64(2));
    assert_eq!(Poseidon::merge(&[a, b]), Poseidon::hash2(a, b));
}

#[test]
fn round_structure() {
    assert_eq!(Poseidon::STATE_WIDTH, 3);
    assert_eq!(Poseidon::NUM_ROUNDS, 65);
    assert_eq!(2 * Poseidon::NUM_FULL_ROUNDS_HALF + Poseidon::NUM_PARTIAL_ROUNDS, 65);
    assert_eq!(Poseidon::ROUND_CONSTANTS.len(), Poseidon::NUM_ROUNDS);
    assert_eq!(
        Poseidon::ROUND_CONSTANTS[0][0],
        felt("0x0ee9a592ba9a9518d05986d656f40c2114c4993c11bb29938d21d47304cd8e6e")
    );
    assert_eq!(
        Poseidon::MDS[0][0],
        felt("0x109b7f411ba0e4c9b2b70caf5c36a7b194be7c11ad24378bfedb68592ba8118b")
    );
}

// DETERMINISM AND SENSITIVITY
// ================================================================================================

#[test]
fn hash2_is_deterministic() {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    for _ in 0..8 {
        let (a, b): (Felt, Felt) = (rng.random(), rng.random());
        assert_eq!(Poseidon::hash2(a, b), Poseidon::hash2(a, b));
    }
}

#[test]
fn hash2_permutes_a_zero_capacity_state() {
    let (a, b) = (felt(HASH_1_2), Felt::from_u64(5));
    let mut state = [a; STATE_WIDTH];
    state[Poseidon::CAPACITY_IDX] = ZERO;
    state[2] = b;

    Poseidon::apply_permutation(&mut state);
    assert_eq!(Poseidon::hash2(a, b), state[Poseidon::DIGEST_IDX]);
}

#[test]
fn permutation_does_not_fix_zero_state() {
    let mut state = [ZERO; STATE_WIDTH];
    Poseidon::apply_permutation(&mut state);
    assert_ne!(state, [ZERO; STATE_WIDTH]);
}

proptest! {
    #[test]
    fn changing_one_input_changes_the_digest(
        a in any_felt(),
        b in any_felt(),
        delta in any_felt().prop_filter("delta must be non-zero", |d| *d != ZERO),
    ) {
        let digest = Poseidon::hash2(a, b);

        prop_assert_ne!(digest, Poseidon::hash2(a + delta, b));
        prop_assert_ne!(digest, Poseidon::hash2(a, b + delta));
    }

    #[test]
    fn batch_hash2_matches_individual_hashes(
        values in prop::collection::vec((any_felt(), any_felt()), 0..32)
    ) {
        let (a, b): (Vec<Felt>, Vec<Felt>) = values.into_iter().unzip();

        let digests = Poseidon::batch_hash2(&a, &b).unwrap();
        prop_assert_eq!(digests.len(), a.len());
        for (i, digest) in digests.iter().enumerate() {
            prop_assert_eq!(*digest, Poseidon::hash2(a[i], b[i]));
        }
    }
}

// BATCH AND CHAIN
// ================================================================================================

#[test]
fn batch_hash2_of_empty_inputs() {
    assert_eq!(Poseidon::batch_hash2(&[], &[]), Ok(Vec::new()));
}

#[test]
fn batch_hash2_rejects_length_mismatch() {
    let a = [Felt::from_u64(1), Felt::from_u64(2)];
    let b = [Felt::from_u64(3)];
    assert_matches!(
        Poseidon::batch_hash2(&a, &b),
        Err(HashError::LengthMismatch { left: 2, right: 1 })
    );
}

#[test]
fn hash_chain_iterates_on_the_previous_digest() {
    let (a, b) = (Felt::from_u64(1), Felt::from_u64(2));
    assert_eq!(Poseidon::hash_chain(1, a, b), felt(HASH_1_2));
    assert_eq!(Poseidon::hash_chain(0, a, b), Poseidon::hash_chain(1, a, b));
    assert_eq!(Poseidon::hash_chain(2, a, b), Poseidon::hash2(felt(HASH_1_2), b));
    assert_eq!(
        Poseidon::hash_chain(10, a, b),
        felt("0x2a1704fc1f4af605389e99977af307603aae57405f9922737d6ebcc38a1e6304")
    );
}
