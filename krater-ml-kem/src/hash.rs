//! FIPS 203 hash functions for ML-KEM.
//!
//! This module provides the fixed-shape wrappers over the SHA-3 family
//! used in ML-KEM:
//! - H = SHA3-256: hash the encapsulation key
//! - G = SHA3-512: derive seeds and keys
//! - J = SHAKE256: implicit rejection PRF
//! - XOF = SHAKE128: sample the matrix A
//! - PRF = SHAKE256: sample noise polynomials

use crate::params::ml_kem_1024::ETA1;
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Sha3_256, Sha3_512, Shake128, Shake256,
};

/// PRF output length: 64 * eta bytes of SHAKE256 per noise polynomial.
pub const PRF_OUTPUT_SIZE: usize = 64 * ETA1;

/// H function: SHA3-256, 32-byte output.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; 32] {
    use sha3::Digest;
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, input);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// G function: SHA3-512, 64-byte output.
///
/// Used as G(d || k) -> (rho, sigma) in K-PKE.KeyGen and
/// G(m || H(ek)) -> (K, r) in Encaps/Decaps; callers split the output
/// into two 32-byte halves.
#[inline]
pub fn hash_g(input: &[u8]) -> [u8; 64] {
    use sha3::Digest;
    let mut hasher = Sha3_512::new();
    Digest::update(&mut hasher, input);
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// J function: SHAKE256 with 32-byte output, for implicit rejection.
///
/// J(z || c) derives the pseudorandom shared secret returned when
/// ciphertext re-encryption fails to match, providing CCA security.
#[inline]
pub fn hash_j(z: &[u8; 32], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(z);
    hasher.update(ciphertext);
    let mut reader = hasher.finalize_xof();
    let mut output = [0u8; 32];
    reader.read(&mut output);
    output
}

/// PRF function: SHAKE256(sigma || nonce) squeezing 64 * eta bytes for
/// CBD sampling.
#[inline]
pub fn prf(sigma: &[u8; 32], nonce: u8) -> [u8; PRF_OUTPUT_SIZE] {
    let mut hasher = Shake256::default();
    hasher.update(sigma);
    hasher.update(&[nonce]);
    let mut reader = hasher.finalize_xof();
    let mut output = [0u8; PRF_OUTPUT_SIZE];
    reader.read(&mut output);
    output
}

/// XOF (extendable output function) for sampling the matrix A.
///
/// SHAKE128 initialized with rho || j || i for the entry A\[i\]\[j\]:
/// FIPS 203 feeds the column index first, then the row index. Both
/// K-PKE.KeyGen and K-PKE.Encrypt must use the same ordering for A to be
/// reproducible.
pub struct Xof {
    reader: sha3::Shake128Reader,
}

impl Xof {
    /// Create a new XOF for sampling A\[i\]\[j\].
    pub fn new(rho: &[u8; 32], i: u8, j: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[j, i]);
        let reader = hasher.finalize_xof();
        Self { reader }
    }

    /// Squeeze the next `out.len()` bytes from the XOF stream.
    #[inline]
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_h_deterministic() {
        let h1 = hash_h(b"test input");
        let h2 = hash_h(b"test input");
        assert_eq!(h1, h2);
        assert_ne!(hash_h(b"input1"), hash_h(b"input2"));
    }

    #[test]
    fn test_hash_h_empty_vector() {
        // SHA3-256 of the empty string, FIPS 202 reference value.
        let expected = [
            0xa7, 0xff, 0xc6, 0xf8, 0xbf, 0x1e, 0xd7, 0x66, 0x51, 0xc1, 0x47, 0x56, 0xa0, 0x61,
            0xd6, 0x62, 0xf5, 0x80, 0xff, 0x4d, 0xe4, 0x3b, 0x49, 0xfa, 0x82, 0xd8, 0x0a, 0x4b,
            0x80, 0xf8, 0x43, 0x4a,
        ];
        assert_eq!(hash_h(b""), expected);
    }

    #[test]
    fn test_hash_g_splits() {
        let g = hash_g(b"test");
        assert_eq!(g.len(), 64);
        let (rho, sigma) = g.split_at(32);
        assert_ne!(rho, sigma);
    }

    #[test]
    fn test_hash_j_deterministic() {
        let z = [0x42u8; 32];
        let ct = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(hash_j(&z, &ct), hash_j(&z, &ct));
        assert_ne!(hash_j(&[0x00u8; 32], &ct), hash_j(&[0x01u8; 32], &ct));
    }

    #[test]
    fn test_prf_nonce_separation() {
        let sigma = [0x42u8; 32];
        assert_eq!(prf(&sigma, 0), prf(&sigma, 0));
        assert_ne!(prf(&sigma, 0), prf(&sigma, 1));
    }

    #[test]
    fn test_xof_deterministic() {
        let rho = [0x42u8; 32];
        let mut xof1 = Xof::new(&rho, 0, 0);
        let mut xof2 = Xof::new(&rho, 0, 0);
        let mut out1 = [0u8; 100];
        let mut out2 = [0u8; 100];
        xof1.squeeze(&mut out1);
        xof2.squeeze(&mut out2);
        assert_eq!(out1, out2);
    }

    #[test]
    fn test_xof_incremental_squeeze_matches_bulk() {
        let rho = [0x37u8; 32];
        let mut bulk = [0u8; 96];
        Xof::new(&rho, 1, 2).squeeze(&mut bulk);

        let mut xof = Xof::new(&rho, 1, 2);
        let mut chunked = [0u8; 96];
        for chunk in chunked.chunks_exact_mut(3) {
            xof.squeeze(chunk);
        }
        assert_eq!(bulk, chunked);
    }

    #[test]
    fn test_xof_index_ordering_matters() {
        // (i, j) and (j, i) feed different bytes into SHAKE128 and must
        // produce different streams for i != j.
        let rho = [0x42u8; 32];
        let mut out1 = [0u8; 64];
        let mut out2 = [0u8; 64];
        Xof::new(&rho, 0, 1).squeeze(&mut out1);
        Xof::new(&rho, 1, 0).squeeze(&mut out2);
        assert_ne!(out1, out2);
    }
}
