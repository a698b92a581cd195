#![no_std]

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod abi;
pub mod hash;
pub mod merkle;
pub mod utils;
pub mod verifier;

// RE-EXPORTS
// ================================================================================================

pub use bn254_field::{Felt, FieldError};
