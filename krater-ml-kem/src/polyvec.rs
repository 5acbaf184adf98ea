//! Vectors of K polynomials.
//!
//! `PolyVec` represents the vectors s, e, r, t and u of ML-KEM-1024.
//! All buffers are fixed-size and live on the stack; serialization
//! produces caller-owned arrays.

use crate::encode::{poly_from_bytes, poly_to_bytes};
use crate::ntt::{inv_ntt, ntt};
use crate::params::ml_kem_1024::{C1_SIZE, DU, K, PKE_SECRET_KEY_SIZE};
use crate::poly::{poly_add_assign, poly_basemul_acc, poly_compress, poly_decompress, Poly};
use zeroize::Zeroize;

/// A vector of K = 4 polynomials.
#[derive(Clone)]
pub struct PolyVec {
    /// The K polynomials in the vector.
    pub polys: [Poly; K],
}

impl Default for PolyVec {
    fn default() -> Self {
        Self::new()
    }
}

impl Zeroize for PolyVec {
    fn zeroize(&mut self) {
        for poly in &mut self.polys {
            poly.zeroize();
        }
    }
}

impl PolyVec {
    /// Create a new zero polynomial vector.
    pub fn new() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::new()),
        }
    }

    /// Apply the forward NTT to every polynomial in the vector.
    pub fn ntt(&mut self) {
        for poly in &mut self.polys {
            ntt(poly);
        }
    }

    /// Apply the inverse NTT to every polynomial in the vector.
    pub fn inv_ntt(&mut self) {
        for poly in &mut self.polys {
            inv_ntt(poly);
        }
    }

    /// Add another polynomial vector to self in place (mod q).
    pub fn add_assign(&mut self, other: &Self) {
        for i in 0..K {
            poly_add_assign(&mut self.polys[i], &other.polys[i]);
        }
    }

    /// Inner product of two vectors in NTT domain:
    /// sum_i self\[i\] * other\[i\]. The result is in NTT domain.
    pub fn inner_product(&self, other: &Self) -> Poly {
        let mut result = Poly::new();
        for i in 0..K {
            poly_basemul_acc(&mut result, &self.polys[i], &other.polys[i]);
        }
        result
    }

    /// Encode the vector at 12 bits per coefficient (K * 384 bytes).
    pub fn to_bytes(&self) -> [u8; PKE_SECRET_KEY_SIZE] {
        let mut bytes = [0u8; PKE_SECRET_KEY_SIZE];
        for i in 0..K {
            bytes[i * 384..(i + 1) * 384].copy_from_slice(&poly_to_bytes(&self.polys[i]));
        }
        bytes
    }

    /// Decode a vector from K * 384 bytes at 12 bits per coefficient.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut result = Self::new();
        for i in 0..K {
            result.polys[i] = poly_from_bytes(&bytes[i * 384..(i + 1) * 384]);
        }
        result
    }

    /// Compress the vector at du = 11 bits per coefficient and pack it
    /// into the c1 ciphertext component (K * 352 bytes).
    pub fn compress(&self) -> [u8; C1_SIZE] {
        let mut bytes = [0u8; C1_SIZE];
        for i in 0..K {
            poly_compress(
                &self.polys[i],
                DU as u32,
                &mut bytes[i * 32 * DU..(i + 1) * 32 * DU],
            );
        }
        bytes
    }

    /// Unpack and decompress a vector from the c1 ciphertext component.
    pub fn decompress(bytes: &[u8]) -> Self {
        let mut result = Self::new();
        for i in 0..K {
            result.polys[i] = poly_decompress(&bytes[i * 32 * DU..(i + 1) * 32 * DU], DU as u32);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::common::{N, Q};

    fn pattern_vec(offset: usize) -> PolyVec {
        let mut pv = PolyVec::new();
        for (i, poly) in pv.polys.iter_mut().enumerate() {
            for j in 0..N {
                poly.coeffs[j] = (((i * N + j) * 13 + offset) % Q as usize) as u16;
            }
        }
        pv
    }

    #[test]
    fn test_polyvec_to_bytes_from_bytes_roundtrip() {
        let pv = pattern_vec(5);

        let bytes = pv.to_bytes();
        assert_eq!(bytes.len(), 1536);

        let recovered = PolyVec::from_bytes(&bytes);
        for i in 0..K {
            assert_eq!(pv.polys[i].coeffs, recovered.polys[i].coeffs);
        }
    }

    #[test]
    fn test_polyvec_ntt_roundtrip() {
        let pv = pattern_vec(0);
        let mut transformed = pv.clone();

        transformed.ntt();
        transformed.inv_ntt();

        for i in 0..K {
            assert_eq!(pv.polys[i].coeffs, transformed.polys[i].coeffs);
        }
    }

    #[test]
    fn test_polyvec_compress_decompress() {
        let pv = pattern_vec(11);

        let compressed = pv.compress();
        assert_eq!(compressed.len(), 1408);

        let recovered = PolyVec::decompress(&compressed);

        // du = 11 compression loses at most ceil(q / 2^12) per coefficient
        let max_error = (Q as i32 + (1 << 12) - 1) / (1 << 12);
        for i in 0..K {
            for j in 0..N {
                let diff = (recovered.polys[i].coeffs[j] as i32 - pv.polys[i].coeffs[j] as i32)
                    .rem_euclid(Q as i32);
                let dist = diff.min(Q as i32 - diff);
                assert!(dist <= max_error, "error too large at [{}][{}]", i, j);
            }
        }
    }

    #[test]
    fn test_polyvec_inner_product_zero() {
        let pv = pattern_vec(3);
        let zero = PolyVec::new();

        let result = pv.inner_product(&zero);
        assert!(result.coeffs.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_polyvec_add_assign() {
        let mut a = pattern_vec(0);
        let b = pattern_vec(100);
        let a_orig = a.clone();

        a.add_assign(&b);

        for i in 0..K {
            for j in 0..N {
                let expected = (a_orig.polys[i].coeffs[j] as u32 + b.polys[i].coeffs[j] as u32)
                    % Q as u32;
                assert_eq!(a.polys[i].coeffs[j] as u32, expected);
            }
        }
    }

    #[test]
    fn test_polyvec_zeroize() {
        let mut pv = pattern_vec(7);
        pv.zeroize();
        for poly in &pv.polys {
            assert!(poly.coeffs.iter().all(|&c| c == 0));
        }
    }
}
