//! # ML-KEM-1024 (FIPS 203)
//!
//! Implementation of the Module-Lattice-Based Key Encapsulation Mechanism
//! as specified in [FIPS 203](https://csrc.nist.gov/pubs/fips/203/final),
//! parameter set ML-KEM-1024 (NIST Security Level 5).
//!
//! | Object | Size |
//! |-----------------|------------|
//! | Encapsulation key | 1568 bytes |
//! | Decapsulation key | 3168 bytes |
//! | Ciphertext | 1568 bytes |
//! | Shared secret | 32 bytes |
//!
//! ## Example
//!
//! ```ignore
//! use krater_ml_kem::{MlKem1024, Kem};
//! use rand::rngs::OsRng;
//!
//! let (dk, ek) = MlKem1024::keygen(&mut OsRng)?;
//! let (ct, ss_sender) = MlKem1024::encaps(&ek, &mut OsRng)?;
//! let ss_receiver = MlKem1024::decaps(&dk, &ct)?;
//!
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```
//!
//! Decapsulation never reports failure: a malformed ciphertext produces a
//! pseudorandom shared secret through implicit rejection, which is what
//! makes the scheme IND-CCA2 secure.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod encode;
mod hash;
mod k_pke;
mod matrix;
mod ntt;
mod params;
mod poly;
mod polyvec;
mod reduce;
mod sample;

pub mod kem;
pub mod ml_kem_1024;

#[cfg(test)]
mod kat;

pub use krater_core::Kem;
pub use ml_kem_1024::{Ciphertext, DecapsulationKey, EncapsulationKey, MlKem1024, SharedSecret};
