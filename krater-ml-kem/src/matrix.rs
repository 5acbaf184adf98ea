//! The public matrix A and matrix-vector products.
//!
//! A is a K x K matrix of NTT-domain polynomials generated
//! deterministically from the 32-byte public seed rho.

use crate::params::ml_kem_1024::K;
use crate::poly::{poly_basemul_acc, Poly};
use crate::polyvec::PolyVec;
use crate::sample::sample_ntt_from_seed;

/// The K x K matrix of NTT-domain polynomials.
pub type Matrix = [[Poly; K]; K];

/// Sample the matrix A from the public seed rho.
///
/// Entry A\[i\]\[j\] is sampled from SHAKE128(rho || j || i) — column
/// index first, per FIPS 203. KeyGen and Encrypt both regenerate A
/// through this function, which keeps the ordering identical in the two
/// places it matters.
pub fn sample_matrix(rho: &[u8; 32]) -> Matrix {
    let mut a: Matrix = core::array::from_fn(|_| core::array::from_fn(|_| Poly::new()));

    for (i, row) in a.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = sample_ntt_from_seed(rho, i as u8, j as u8);
        }
    }

    a
}

/// Multiply matrix A by vector s: result\[i\] = sum_j A\[i\]\[j\] * s\[j\].
///
/// A and s must be in NTT domain; the result is in NTT domain.
pub fn matrix_vec_mul(a: &Matrix, s: &PolyVec) -> PolyVec {
    let mut result = PolyVec::new();

    for i in 0..K {
        for j in 0..K {
            poly_basemul_acc(&mut result.polys[i], &a[i][j], &s.polys[j]);
        }
    }

    result
}

/// Multiply the transpose of A by vector r:
/// result\[i\] = sum_j A\[j\]\[i\] * r\[j\].
///
/// Differs from [`matrix_vec_mul`] only in the indexing of A. Both A and
/// r must be in NTT domain; the result is in NTT domain.
pub fn matrix_vec_mul_transpose(a: &Matrix, r: &PolyVec) -> PolyVec {
    let mut result = PolyVec::new();

    for i in 0..K {
        for j in 0..K {
            poly_basemul_acc(&mut result.polys[i], &a[j][i], &r.polys[j]);
        }
    }

    result
}
