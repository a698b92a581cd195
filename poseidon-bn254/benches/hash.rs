//! Poseidon hash benchmarks
//!
//! Covers the three ways the hash is used:
//! - `hash2` - a single 2-to-1 hash (one permutation)
//! - `batch_hash2` - independent pairs, parallel when the `concurrent` feature is enabled
//! - `hash_chain` - dependent hashes, each consuming the previous digest

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use poseidon_bn254::{Felt, hash::Poseidon};

mod common;
use common::data::{generate_felt_array_random, generate_felt_array_sequential};

const BATCH_SIZES: [usize; 4] = [16, 256, 1024, 4096];
const CHAIN_LENGTHS: [u32; 3] = [10, 100, 1000];

// SINGLE HASH
// ================================================================================================

fn hash_poseidon_hash2(c: &mut Criterion) {
    let a = Felt::from_u64(1);
    let b = Felt::from_u64(2);

    c.bench_function("poseidon-hash2", |bench| {
        bench.iter(|| Poseidon::hash2(black_box(a), black_box(b)))
    });
}

fn hash_poseidon_permutation(c: &mut Criterion) {
    let state = [Felt::ZERO, Felt::from_u64(1), Felt::from_u64(2)];

    c.bench_function("poseidon-permutation", |bench| {
        bench.iter(|| {
            let mut state = black_box(state);
            Poseidon::apply_permutation(&mut state);
            state
        })
    });
}

// BATCH HASH
// ================================================================================================

fn hash_poseidon_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("poseidon-batch-hash2");

    for size in BATCH_SIZES {
        let a = generate_felt_array_random(size);
        let b = generate_felt_array_sequential(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bench, _| {
            bench.iter(|| Poseidon::batch_hash2(black_box(&a), black_box(&b)).unwrap())
        });
    }

    group.finish();
}

// HASH CHAIN
// ================================================================================================

fn hash_poseidon_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("poseidon-hash-chain");
    let (seed_a, seed_b) = (Felt::from_u64(1), Felt::from_u64(2));

    for iterations in CHAIN_LENGTHS {
        group.throughput(Throughput::Elements(iterations.into()));
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |bench, &iterations| {
                bench.iter(|| Poseidon::hash_chain(black_box(iterations), seed_a, seed_b))
            },
        );
    }

    group.finish();
}

criterion_group!(
    hash_group,
    hash_poseidon_hash2,
    hash_poseidon_permutation,
    hash_poseidon_batch,
    hash_poseidon_chain,
);
criterion_main!(hash_group);
