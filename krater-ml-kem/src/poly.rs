//! Polynomial operations for ML-KEM.
//!
//! This module provides the `Poly` struct representing polynomials in the
//! ring R_q = Z_q\[X\]/(X^256 + 1), along with arithmetic, compression and
//! CBD sampling as specified in FIPS 203.
//!
//! A `Poly` holds the same value shape in coefficient domain and in NTT
//! domain; which domain is in effect is documented on every function that
//! cares (the convention used by K-PKE and the NTT engine).

#![allow(clippy::needless_range_loop)]

use crate::encode::{byte_decode, byte_encode};
use crate::ntt::{basemul, GAMMAS};
use crate::params::common::{N, Q};
use crate::reduce::{fqadd, fqsub};
use zeroize::Zeroize;

/// A polynomial in R_q = Z_q\[X\]/(X^256 + 1).
///
/// Coefficients are canonical `u16` values in [0, q-1], in both
/// coefficient and NTT domain.
#[derive(Clone, Zeroize)]
pub struct Poly {
    /// 256 coefficients of the polynomial.
    pub coeffs: [u16; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self { coeffs: [0u16; N] }
    }
}

impl Poly {
    /// Create a new zero polynomial.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Polynomial Arithmetic
// ============================================================================

/// Add two polynomials coefficient-wise (mod q).
pub fn poly_add(a: &Poly, b: &Poly) -> Poly {
    let mut r = Poly::default();
    for i in 0..N {
        r.coeffs[i] = fqadd(a.coeffs[i], b.coeffs[i]);
    }
    r
}

/// Add polynomial `b` to `a` in place (mod q).
pub fn poly_add_assign(a: &mut Poly, b: &Poly) {
    for i in 0..N {
        a.coeffs[i] = fqadd(a.coeffs[i], b.coeffs[i]);
    }
}

/// Subtract two polynomials coefficient-wise: a - b (mod q).
pub fn poly_sub(a: &Poly, b: &Poly) -> Poly {
    let mut r = Poly::default();
    for i in 0..N {
        r.coeffs[i] = fqsub(a.coeffs[i], b.coeffs[i]);
    }
    r
}

/// Multiply two polynomials in NTT domain (pointwise over the 128
/// degree-2 factor rings). Both inputs and the result are in NTT domain.
pub fn poly_basemul(a: &Poly, b: &Poly) -> Poly {
    let mut r = Poly::default();
    for i in 0..128 {
        basemul(
            &mut r.coeffs[2 * i..2 * i + 2],
            &a.coeffs[2 * i..2 * i + 2],
            &b.coeffs[2 * i..2 * i + 2],
            GAMMAS[i],
        );
    }
    r
}

/// Accumulate product into result: r += a * b (in NTT domain).
pub fn poly_basemul_acc(r: &mut Poly, a: &Poly, b: &Poly) {
    for i in 0..128 {
        let mut t = [0u16; 2];
        basemul(
            &mut t,
            &a.coeffs[2 * i..2 * i + 2],
            &b.coeffs[2 * i..2 * i + 2],
            GAMMAS[i],
        );
        r.coeffs[2 * i] = fqadd(r.coeffs[2 * i], t[0]);
        r.coeffs[2 * i + 1] = fqadd(r.coeffs[2 * i + 1], t[1]);
    }
}

// ============================================================================
// Compression and Decompression (FIPS 203 Algorithms 4-5)
// ============================================================================

/// Compress a single coefficient: round(2^d / q * x) mod 2^d.
///
/// Uses the exact integer identity floor((2^(d+1) x + q) / 2q) mod 2^d,
/// mapping [0, q-1] to [0, 2^d - 1].
#[inline]
pub fn compress(x: u16, d: u32) -> u16 {
    let t = ((x as u32) << (d + 1)) + Q as u32;
    ((t / (2 * Q as u32)) & ((1 << d) - 1)) as u16
}

/// Decompress a single coefficient: round(q / 2^d * y).
///
/// Computed as floor((q y + 2^(d-1)) / 2^d); never exceeds q - 1 for
/// y < 2^d.
#[inline]
pub fn decompress(y: u16, d: u32) -> u16 {
    (((y as u32) * Q as u32 + (1 << (d - 1))) >> d) as u16
}

/// Compress a polynomial to d bits per coefficient and pack into `out`.
///
/// `out` must hold exactly 32*d bytes.
pub fn poly_compress(poly: &Poly, d: u32, out: &mut [u8]) {
    let mut t = Poly::default();
    for i in 0..N {
        t.coeffs[i] = compress(poly.coeffs[i], d);
    }
    byte_encode(&t, d as usize, out);
}

/// Unpack d-bit values from `bytes` and decompress into a polynomial.
pub fn poly_decompress(bytes: &[u8], d: u32) -> Poly {
    let mut poly = byte_decode(bytes, d as usize);
    for c in poly.coeffs.iter_mut() {
        *c = decompress(*c, d);
    }
    poly
}

// ============================================================================
// CBD Sampling (FIPS 203 Algorithm 8)
// ============================================================================

/// Sample a polynomial from the centered binomial distribution.
///
/// Each coefficient is the difference of two sums of eta bits, reduced to
/// the canonical range. `bytes` must hold exactly 64*eta bytes.
/// Constant-time with respect to the input bytes.
pub fn poly_cbd(eta: usize, bytes: &[u8]) -> Poly {
    let mut poly = Poly::default();
    match eta {
        2 => poly_cbd2(&mut poly, bytes),
        3 => poly_cbd3(&mut poly, bytes),
        _ => panic!("unsupported eta value: {} (supported: 2, 3)", eta),
    }
    poly
}

/// CBD with eta=2: each coefficient uses 4 bits (2+2), 128 bytes total.
fn poly_cbd2(poly: &mut Poly, bytes: &[u8]) {
    for i in 0..128 {
        let t = bytes[i] as u32;

        // Pairwise bit sums: each 2-bit field of d holds a popcount in [0, 2]
        let d = (t & 0x55) + ((t >> 1) & 0x55);

        let a = (d & 0x3) as u16;
        let b = ((d >> 2) & 0x3) as u16;
        poly.coeffs[2 * i] = fqsub(a, b);

        let a = ((d >> 4) & 0x3) as u16;
        let b = ((d >> 6) & 0x3) as u16;
        poly.coeffs[2 * i + 1] = fqsub(a, b);
    }
}

/// CBD with eta=3: each coefficient uses 6 bits (3+3), 192 bytes total.
fn poly_cbd3(poly: &mut Poly, bytes: &[u8]) {
    for i in 0..64 {
        let t = (bytes[3 * i] as u32)
            | ((bytes[3 * i + 1] as u32) << 8)
            | ((bytes[3 * i + 2] as u32) << 16);

        // Triple-wise bit sums: each 3-bit field of d holds a popcount in [0, 3]
        let d = (t & 0x249249) + ((t >> 1) & 0x249249) + ((t >> 2) & 0x249249);

        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as u16;
            let b = ((d >> (6 * j + 3)) & 0x7) as u16;
            poly.coeffs[4 * i + j] = fqsub(a, b);
        }
    }
}
