//! # Krater Core
//!
//! Core traits and utilities for the krater post-quantum cryptography
//! library.
//!
//! This crate provides:
//! - Common error types
//! - The [`Kem`] trait implemented by key encapsulation mechanisms
//! - Secure memory handling with zeroize integration

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, Result};
pub use traits::Kem;

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;
