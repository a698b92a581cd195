//! Multi-precision helpers over four little-endian 64-bit limbs.
//!
//! Every function here is `const` so that field constants (round constants, MDS entries) can be
//! converted into Montgomery form at compile time.

// CONSTANTS
// ================================================================================================

/// The BN254 scalar field modulus
/// p = 21888242871839275222246405745257275088548364400416034343698204186575808495617.
pub(crate) const MODULUS: [u64; 4] = [
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
];

/// -p^{-1} mod 2^64.
const INV: u64 = 0xc2e1f593efffffff;

/// R = 2^256 mod p, i.e. ONE in Montgomery form.
pub(crate) const R: [u64; 4] = [
    0xac96341c4ffffffb,
    0x36fc76959f60cd29,
    0x666ea36f7879462e,
    0x0e0a77c19a07df2f,
];

/// R^2 = 2^512 mod p, used to move integers into Montgomery form.
pub(crate) const R2: [u64; 4] = [
    0x1bb8e645ae216da7,
    0x53fe3ab1e35c59e3,
    0x8c49833d53bb8085,
    0x0216d0b17f4e44a5,
];

// LIMB PRIMITIVES
// ================================================================================================

/// Computes a + b + carry, returning the low word and the carry.
#[inline(always)]
const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes a - b - borrow, returning the low word and the borrow (0 or 1).
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let (d1, o1) = a.overflowing_sub(b);
    let (d2, o2) = d1.overflowing_sub(borrow);
    (d2, (o1 | o2) as u64)
}

/// Computes a + b * c + carry, returning the low word and the high word.
///
/// The result always fits into 128 bits: (2^64 - 1) + (2^64 - 1)^2 + (2^64 - 1) = 2^128 - 1.
#[inline(always)]
const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

// MODULAR OPERATIONS
// ================================================================================================

/// Subtracts the modulus from `a` if `a >= p`. Requires `a < 2p`.
#[inline(always)]
const fn sub_modulus_if_needed(a: [u64; 4]) -> [u64; 4] {
    let (d0, borrow) = sbb(a[0], MODULUS[0], 0);
    let (d1, borrow) = sbb(a[1], MODULUS[1], borrow);
    let (d2, borrow) = sbb(a[2], MODULUS[2], borrow);
    let (d3, borrow) = sbb(a[3], MODULUS[3], borrow);

    // keep `a` when the subtraction underflowed
    let keep = 0u64.wrapping_sub(borrow);
    [
        (a[0] & keep) | (d0 & !keep),
        (a[1] & keep) | (d1 & !keep),
        (a[2] & keep) | (d2 & !keep),
        (a[3] & keep) | (d3 & !keep),
    ]
}

/// Returns (a + b) mod p for reduced inputs.
#[inline(always)]
pub(crate) const fn add(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    // a + b < 2p < 2^255, so the final carry is always zero
    let (s0, carry) = adc(a[0], b[0], 0);
    let (s1, carry) = adc(a[1], b[1], carry);
    let (s2, carry) = adc(a[2], b[2], carry);
    let (s3, _) = adc(a[3], b[3], carry);
    sub_modulus_if_needed([s0, s1, s2, s3])
}

/// Returns (a - b) mod p for reduced inputs.
#[inline(always)]
pub(crate) const fn sub(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let (d0, borrow) = sbb(a[0], b[0], 0);
    let (d1, borrow) = sbb(a[1], b[1], borrow);
    let (d2, borrow) = sbb(a[2], b[2], borrow);
    let (d3, borrow) = sbb(a[3], b[3], borrow);

    // add the modulus back if the subtraction underflowed
    let mask = 0u64.wrapping_sub(borrow);
    let (d0, carry) = adc(d0, MODULUS[0] & mask, 0);
    let (d1, carry) = adc(d1, MODULUS[1] & mask, carry);
    let (d2, carry) = adc(d2, MODULUS[2] & mask, carry);
    let (d3, _) = adc(d3, MODULUS[3] & mask, carry);
    [d0, d1, d2, d3]
}

/// Returns a * b * R^{-1} mod p.
///
/// The full 512-bit product is computed first and then Montgomery-reduced. The result is fully
/// reduced whenever a * b < p * 2^256, which holds if at least one operand is reduced.
#[inline(always)]
pub(crate) const fn mont_mul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    let mut t = [0u64; 8];

    let mut i = 0;
    while i < 4 {
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (lo, hi) = mac(t[i + j], a[i], b[j], carry);
            t[i + j] = lo;
            carry = hi;
            j += 1;
        }
        t[i + 4] = carry;
        i += 1;
    }

    mont_reduce(t)
}

/// Montgomery reduction of a 512-bit value: returns t * R^{-1} mod p for t < p * 2^256.
#[inline(always)]
pub(crate) const fn mont_reduce(mut t: [u64; 8]) -> [u64; 4] {
    let mut outer_carry = 0;

    let mut i = 0;
    while i < 4 {
        let k = t[i].wrapping_mul(INV);
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (lo, hi) = mac(t[i + j], k, MODULUS[j], carry);
            t[i + j] = lo;
            carry = hi;
            j += 1;
        }
        let (lo, hi) = adc(t[i + 4], carry, outer_carry);
        t[i + 4] = lo;
        outer_carry = hi;
        i += 1;
    }

    sub_modulus_if_needed([t[4], t[5], t[6], t[7]])
}

/// Returns true if the limbs encode an integer smaller than the modulus.
#[inline]
pub(crate) const fn is_canonical(a: &[u64; 4]) -> bool {
    let (_, borrow) = sbb(a[0], MODULUS[0], 0);
    let (_, borrow) = sbb(a[1], MODULUS[1], borrow);
    let (_, borrow) = sbb(a[2], MODULUS[2], borrow);
    let (_, borrow) = sbb(a[3], MODULUS[3], borrow);
    borrow == 1
}
