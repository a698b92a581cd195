//! Off-chain implementation of [`crate::Felt`].

use alloc::string::{String, ToString};
use core::{
    fmt,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use num::BigUint;
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use winter_utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

use crate::{
    FieldError,
    arith::{self, MODULUS},
    utils::{bytes_to_hex_string, hex_to_bytes},
};

#[cfg(test)]
mod tests;

// FELT
// ================================================================================================

/// An element of the BN254 scalar field, i.e. an integer modulo
/// p = 21888242871839275222246405745257275088548364400416034343698204186575808495617.
///
/// The value is kept in Montgomery form; every constructor reduces its input (or rejects it), so
/// a `Felt` is always a canonical field element and equality is equality of field elements.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Felt([u64; 4]);

impl Felt {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// The additive identity.
    pub const ZERO: Self = Self([0; 4]);

    /// The multiplicative identity.
    pub const ONE: Self = Self(arith::R);

    /// The field modulus as little-endian 64-bit limbs.
    pub const MODULUS: [u64; 4] = MODULUS;

    /// Number of bits needed to represent the modulus.
    pub const NUM_BITS: u32 = 254;

    /// Number of bytes in the canonical encoding of an element.
    pub const ELEMENT_BYTES: usize = 32;

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Creates a field element from any 256-bit integer given as little-endian limbs, reducing
    /// it modulo p.
    #[inline]
    pub const fn from_raw(limbs: [u64; 4]) -> Self {
        Self(arith::mont_mul(&limbs, &arith::R2))
    }

    /// Creates a field element from a `u64`.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self::from_raw([value, 0, 0, 0])
    }

    /// Creates a field element from little-endian limbs, failing if the integer is not smaller
    /// than the modulus.
    pub fn from_canonical_limbs(limbs: [u64; 4]) -> Result<Self, FieldError> {
        if arith::is_canonical(&limbs) {
            Ok(Self::from_raw(limbs))
        } else {
            Err(FieldError::OutOfRange)
        }
    }

    /// Creates a field element from a 32-byte big-endian integer, reducing it modulo p.
    pub fn from_be_bytes_reduced(bytes: &[u8; 32]) -> Self {
        Self::from_raw(be_bytes_to_limbs(bytes))
    }

    /// Creates a field element from a 32-byte big-endian integer, failing if the integer is not
    /// smaller than the modulus.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Result<Self, FieldError> {
        Self::from_canonical_limbs(be_bytes_to_limbs(bytes))
    }

    /// Creates a field element from a big integer, failing if it is not smaller than the
    /// modulus.
    pub fn from_biguint(value: &BigUint) -> Result<Self, FieldError> {
        let digits = value.to_u64_digits();
        if digits.len() > 4 {
            return Err(FieldError::OutOfRange);
        }
        let mut limbs = [0u64; 4];
        limbs[..digits.len()].copy_from_slice(&digits);
        Self::from_canonical_limbs(limbs)
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the canonical integer representation as little-endian limbs.
    #[inline]
    pub const fn to_canonical_limbs(&self) -> [u64; 4] {
        let a = self.0;
        arith::mont_reduce([a[0], a[1], a[2], a[3], 0, 0, 0, 0])
    }

    /// Returns the canonical integer representation as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let limbs = self.to_canonical_limbs();
        let mut bytes = [0u8; 32];
        for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs.iter().rev()) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }
        bytes
    }

    /// Returns the canonical integer representation as a big integer.
    pub fn as_canonical_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_be_bytes())
    }

    /// Returns true if this element is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    // ARITHMETIC
    // --------------------------------------------------------------------------------------------

    /// Returns 2 * self.
    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Returns self^2.
    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Returns self^5, computed as (self^2)^2 * self.
    ///
    /// Since gcd(5, p - 1) = 1 this map is a permutation of the field.
    #[inline(always)]
    pub fn exp5(&self) -> Self {
        let x2 = self.square();
        let x4 = x2.square();
        x4 * *self
    }

    /// Returns self^power using left-to-right square-and-multiply.
    pub fn exp_u64(&self, power: u64) -> Self {
        let mut result = Self::ONE;
        for i in (0..u64::BITS - power.leading_zeros()).rev() {
            result = result.square();
            if (power >> i) & 1 == 1 {
                result *= *self;
            }
        }
        result
    }
}

/// Interprets 32 big-endian bytes as little-endian 64-bit limbs.
fn be_bytes_to_limbs(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().rev().zip(bytes.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

// ARITHMETIC OPERATORS
// ================================================================================================

impl Add for Felt {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(arith::add(&self.0, &rhs.0))
    }
}

impl AddAssign for Felt {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Felt {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(arith::sub(&self.0, &rhs.0))
    }
}

impl SubAssign for Felt {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for Felt {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(arith::mont_mul(&self.0, &rhs.0))
    }
}

impl MulAssign for Felt {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for Felt {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl Sum for Felt {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for Felt {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

// CONVERSIONS
// ================================================================================================

impl From<u64> for Felt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<u32> for Felt {
    fn from(value: u32) -> Self {
        Self::from_u64(value.into())
    }
}

impl From<bool> for Felt {
    fn from(value: bool) -> Self {
        Self::from_u64(value.into())
    }
}

impl From<Felt> for [u8; 32] {
    fn from(value: Felt) -> Self {
        value.to_be_bytes()
    }
}

impl TryFrom<[u8; 32]> for Felt {
    type Error = FieldError;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Self::Error> {
        Self::from_be_bytes(&bytes)
    }
}

impl From<Felt> for String {
    fn from(value: Felt) -> Self {
        value.to_string()
    }
}

impl FromStr for Felt {
    type Err = FieldError;

    /// Parses a `0x`-prefixed hex string or a decimal string. Values not smaller than the
    /// modulus are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") {
            let bytes = hex_to_bytes::<32>(s)?;
            return Self::from_be_bytes(&bytes);
        }

        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::InvalidDecimal(s.into()));
        }
        let value = BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| FieldError::InvalidDecimal(s.into()))?;
        Self::from_biguint(&value)
    }
}

impl TryFrom<&str> for Felt {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Felt {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// FORMATTING
// ================================================================================================

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bytes_to_hex_string(self.to_be_bytes()))
    }
}

impl fmt::Debug for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// RANDOMNESS
// ================================================================================================

impl Distribution<Felt> for StandardUniform {
    /// Samples uniformly from [0, p) by rejection sampling 254-bit candidates.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Felt {
        loop {
            let mut limbs: [u64; 4] = [rng.random(), rng.random(), rng.random(), rng.random()];
            limbs[3] &= u64::MAX >> 2;
            if let Ok(value) = Felt::from_canonical_limbs(limbs) {
                return value;
            }
        }
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for Felt {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_bytes(&self.to_be_bytes());
    }

    fn get_size_hint(&self) -> usize {
        Self::ELEMENT_BYTES
    }
}

impl Deserializable for Felt {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let bytes = source.read_array::<32>()?;
        Self::from_be_bytes(&bytes).map_err(|_| {
            DeserializationError::InvalidValue(format!(
                "{} is not a valid field element",
                bytes_to_hex_string(bytes)
            ))
        })
    }
}
