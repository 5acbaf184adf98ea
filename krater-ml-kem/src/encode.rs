//! Byte encoding and decoding for ML-KEM polynomials.
//!
//! This module implements FIPS 203 Algorithms 5 (ByteEncode) and
//! 6 (ByteDecode): bit-packers between polynomials and contiguous byte
//! strings at widths d in {1, 4, 5, 10, 11, 12}, little-endian within
//! each byte.
//!
//! The d = 12 encoding (384 bytes per polynomial) serializes the key
//! material; the other widths carry compressed ciphertext components and
//! the 1-bit message encoding.

#![allow(clippy::needless_range_loop)]

use crate::params::common::Q;
use crate::poly::{decompress, poly_compress, Poly};
use subtle::{Choice, ConstantTimeLess};

/// Unpack two 12-bit coefficients from a 3-byte chunk (ByteDecode12).
///
/// Layout: `c0 = b0 | ((b1 & 0x0F) << 8)`, `c1 = (b1 >> 4) | (b2 << 4)`
#[inline]
fn unpack_12bit_coeffs(chunk: &[u8]) -> (u16, u16) {
    debug_assert_eq!(chunk.len(), 3);
    let b0 = chunk[0] as u16;
    let b1 = chunk[1] as u16;
    let b2 = chunk[2] as u16;
    let c0 = b0 | ((b1 & 0x0F) << 8);
    let c1 = (b1 >> 4) | (b2 << 4);
    (c0, c1)
}

/// Encode a polynomial with canonical coefficients to 384 bytes at 12
/// bits per coefficient (ByteEncode12).
pub fn poly_to_bytes(poly: &Poly) -> [u8; 384] {
    let mut bytes = [0u8; 384];

    for i in 0..128 {
        let c0 = poly.coeffs[2 * i];
        let c1 = poly.coeffs[2 * i + 1];

        bytes[3 * i] = c0 as u8;
        bytes[3 * i + 1] = ((c0 >> 8) | (c1 << 4)) as u8;
        bytes[3 * i + 2] = (c1 >> 4) as u8;
    }

    bytes
}

/// Decode 384 bytes into a polynomial at 12 bits per coefficient
/// (ByteDecode12). Coefficients are reduced modulo q.
pub fn poly_from_bytes(bytes: &[u8]) -> Poly {
    let mut poly = Poly::new();

    // Exactly 128 coefficient pairs; bound the iteration to one
    // polynomial even if the input slice is longer than 384 bytes.
    for (i, chunk) in bytes.chunks_exact(3).take(128).enumerate() {
        let (c0, c1) = unpack_12bit_coeffs(chunk);

        // Reduce mod q — redundant for ek inputs pre-validated by
        // check_ek_modulus, but necessary for other callers (e.g. secret
        // key deserialization in K-PKE decryption).
        poly.coeffs[2 * i] = c0 % Q;
        poly.coeffs[2 * i + 1] = c1 % Q;
    }

    poly
}

/// Encode a 32-byte message as a polynomial (Decompress_1 of each bit).
///
/// Bit b of the message maps to the coefficient b * 1665, LSB-first
/// within each byte.
pub fn msg_to_poly(m: &[u8; 32]) -> Poly {
    let mut poly = Poly::new();

    for i in 0..32 {
        for j in 0..8 {
            let bit = ((m[i] >> j) & 1) as u16;
            poly.coeffs[8 * i + j] = decompress(bit, 1);
        }
    }

    poly
}

/// Decode a polynomial to a 32-byte message (Compress_1 of each
/// coefficient).
///
/// A coefficient maps to bit 1 exactly when it lies in [833, 2497),
/// the half of the ring nearest to q/2. Bits are packed LSB-first.
pub fn poly_to_msg(poly: &Poly) -> [u8; 32] {
    let mut m = [0u8; 32];
    poly_compress(poly, 1, &mut m);
    m
}

/// Generic byte encoding for d-bit coefficient values.
///
/// Packs the low d bits of each of the 256 coefficients into `out`
/// (32*d bytes), little-endian within each byte.
pub fn byte_encode(poly: &Poly, d: usize, out: &mut [u8]) {
    match d {
        1 => byte_encode_1(poly, out),
        4 => byte_encode_4(poly, out),
        5 => byte_encode_5(poly, out),
        10 => byte_encode_10(poly, out),
        11 => byte_encode_11(poly, out),
        12 => {
            let bytes = poly_to_bytes(poly);
            out[..384].copy_from_slice(&bytes);
        }
        _ => panic!("unsupported d value: {} (supported: 1, 4, 5, 10, 11, 12)", d),
    }
}

/// Generic byte decoding for d-bit coefficient values.
///
/// Unpacks 32*d bytes into 256 raw d-bit values (reduced mod q for
/// d = 12).
pub fn byte_decode(bytes: &[u8], d: usize) -> Poly {
    match d {
        1 => byte_decode_1(bytes),
        4 => byte_decode_4(bytes),
        5 => byte_decode_5(bytes),
        10 => byte_decode_10(bytes),
        11 => byte_decode_11(bytes),
        12 => poly_from_bytes(bytes),
        _ => panic!("unsupported d value: {} (supported: 1, 4, 5, 10, 11, 12)", d),
    }
}

// d=1: 32 bytes for 256 coefficients
fn byte_encode_1(poly: &Poly, out: &mut [u8]) {
    for i in 0..32 {
        let mut byte = 0u8;
        for j in 0..8 {
            byte |= ((poly.coeffs[8 * i + j] & 1) as u8) << j;
        }
        out[i] = byte;
    }
}

fn byte_decode_1(bytes: &[u8]) -> Poly {
    let mut poly = Poly::new();
    for i in 0..32 {
        for j in 0..8 {
            poly.coeffs[8 * i + j] = ((bytes[i] >> j) & 1) as u16;
        }
    }
    poly
}

// d=4: 128 bytes for 256 coefficients
fn byte_encode_4(poly: &Poly, out: &mut [u8]) {
    for i in 0..128 {
        let c0 = (poly.coeffs[2 * i] & 0x0F) as u8;
        let c1 = (poly.coeffs[2 * i + 1] & 0x0F) as u8;
        out[i] = c0 | (c1 << 4);
    }
}

fn byte_decode_4(bytes: &[u8]) -> Poly {
    let mut poly = Poly::new();
    for i in 0..128 {
        poly.coeffs[2 * i] = (bytes[i] & 0x0F) as u16;
        poly.coeffs[2 * i + 1] = (bytes[i] >> 4) as u16;
    }
    poly
}

// d=5: 160 bytes for 256 coefficients (8 values in 5 bytes)
fn byte_encode_5(poly: &Poly, out: &mut [u8]) {
    for i in 0..32 {
        let mut t = [0u8; 8];
        for j in 0..8 {
            t[j] = (poly.coeffs[8 * i + j] & 0x1F) as u8;
        }
        out[5 * i] = t[0] | (t[1] << 5);
        out[5 * i + 1] = (t[1] >> 3) | (t[2] << 2) | (t[3] << 7);
        out[5 * i + 2] = (t[3] >> 1) | (t[4] << 4);
        out[5 * i + 3] = (t[4] >> 4) | (t[5] << 1) | (t[6] << 6);
        out[5 * i + 4] = (t[6] >> 2) | (t[7] << 3);
    }
}

fn byte_decode_5(bytes: &[u8]) -> Poly {
    let mut poly = Poly::new();
    for i in 0..32 {
        let b = &bytes[5 * i..5 * i + 5];
        poly.coeffs[8 * i] = (b[0] & 0x1F) as u16;
        poly.coeffs[8 * i + 1] = (((b[0] >> 5) | (b[1] << 3)) & 0x1F) as u16;
        poly.coeffs[8 * i + 2] = ((b[1] >> 2) & 0x1F) as u16;
        poly.coeffs[8 * i + 3] = (((b[1] >> 7) | (b[2] << 1)) & 0x1F) as u16;
        poly.coeffs[8 * i + 4] = (((b[2] >> 4) | (b[3] << 4)) & 0x1F) as u16;
        poly.coeffs[8 * i + 5] = ((b[3] >> 1) & 0x1F) as u16;
        poly.coeffs[8 * i + 6] = (((b[3] >> 6) | (b[4] << 2)) & 0x1F) as u16;
        poly.coeffs[8 * i + 7] = (b[4] >> 3) as u16;
    }
    poly
}

// d=10: 320 bytes for 256 coefficients (4 values in 5 bytes)
fn byte_encode_10(poly: &Poly, out: &mut [u8]) {
    for i in 0..64 {
        let mut t = [0u16; 4];
        for j in 0..4 {
            t[j] = poly.coeffs[4 * i + j] & 0x3FF;
        }
        out[5 * i] = t[0] as u8;
        out[5 * i + 1] = ((t[0] >> 8) | (t[1] << 2)) as u8;
        out[5 * i + 2] = ((t[1] >> 6) | (t[2] << 4)) as u8;
        out[5 * i + 3] = ((t[2] >> 4) | (t[3] << 6)) as u8;
        out[5 * i + 4] = (t[3] >> 2) as u8;
    }
}

fn byte_decode_10(bytes: &[u8]) -> Poly {
    let mut poly = Poly::new();
    for i in 0..64 {
        let b = &bytes[5 * i..5 * i + 5];
        poly.coeffs[4 * i] = (b[0] as u16) | ((b[1] as u16 & 0x03) << 8);
        poly.coeffs[4 * i + 1] = ((b[1] >> 2) as u16) | ((b[2] as u16 & 0x0F) << 6);
        poly.coeffs[4 * i + 2] = ((b[2] >> 4) as u16) | ((b[3] as u16 & 0x3F) << 4);
        poly.coeffs[4 * i + 3] = ((b[3] >> 6) as u16) | ((b[4] as u16) << 2);
    }
    poly
}

// d=11: 352 bytes for 256 coefficients (8 values in 11 bytes)
fn byte_encode_11(poly: &Poly, out: &mut [u8]) {
    for i in 0..32 {
        let mut t = [0u16; 8];
        for j in 0..8 {
            t[j] = poly.coeffs[8 * i + j] & 0x7FF;
        }
        out[11 * i] = t[0] as u8;
        out[11 * i + 1] = ((t[0] >> 8) | (t[1] << 3)) as u8;
        out[11 * i + 2] = ((t[1] >> 5) | (t[2] << 6)) as u8;
        out[11 * i + 3] = (t[2] >> 2) as u8;
        out[11 * i + 4] = ((t[2] >> 10) | (t[3] << 1)) as u8;
        out[11 * i + 5] = ((t[3] >> 7) | (t[4] << 4)) as u8;
        out[11 * i + 6] = ((t[4] >> 4) | (t[5] << 7)) as u8;
        out[11 * i + 7] = (t[5] >> 1) as u8;
        out[11 * i + 8] = ((t[5] >> 9) | (t[6] << 2)) as u8;
        out[11 * i + 9] = ((t[6] >> 6) | (t[7] << 5)) as u8;
        out[11 * i + 10] = (t[7] >> 3) as u8;
    }
}

fn byte_decode_11(bytes: &[u8]) -> Poly {
    let mut poly = Poly::new();
    for i in 0..32 {
        let b = &bytes[11 * i..11 * i + 11];
        poly.coeffs[8 * i] = (b[0] as u16) | ((b[1] as u16 & 0x07) << 8);
        poly.coeffs[8 * i + 1] = ((b[1] >> 3) as u16) | ((b[2] as u16 & 0x3F) << 5);
        poly.coeffs[8 * i + 2] =
            ((b[2] >> 6) as u16) | ((b[3] as u16) << 2) | ((b[4] as u16 & 0x01) << 10);
        poly.coeffs[8 * i + 3] = ((b[4] >> 1) as u16) | ((b[5] as u16 & 0x0F) << 7);
        poly.coeffs[8 * i + 4] = ((b[5] >> 4) as u16) | ((b[6] as u16 & 0x7F) << 4);
        poly.coeffs[8 * i + 5] =
            ((b[6] >> 7) as u16) | ((b[7] as u16) << 1) | ((b[8] as u16 & 0x03) << 9);
        poly.coeffs[8 * i + 6] = ((b[8] >> 2) as u16) | ((b[9] as u16 & 0x1F) << 6);
        poly.coeffs[8 * i + 7] = ((b[9] >> 5) as u16) | ((b[10] as u16) << 3);
    }
    poly
}

// --- Validation ---

/// Check that all 12-bit coefficients in an encapsulation key are in
/// [0, q-1].
///
/// FIPS 203 section 7.2 requires this type check on the encapsulation key
/// before encapsulation. Each pair of 12-bit coefficients is unpacked
/// from the t portion of ek (excluding the 32-byte rho suffix) and
/// checked against q, accumulating validity in constant time.
pub(crate) fn check_ek_modulus(ek: &[u8]) -> bool {
    // ek must contain the 32-byte rho suffix plus at least one polynomial
    if ek.len() <= 32 {
        return false;
    }

    let t_len = ek.len() - 32;
    if t_len % 384 != 0 {
        return false;
    }

    // The early returns above depend on public lengths only; the
    // coefficient scan itself never branches on key data.
    let mut all_valid = Choice::from(1u8);
    for chunk in ek[..t_len].chunks_exact(3) {
        let (c0, c1) = unpack_12bit_coeffs(chunk);
        all_valid &= c0.ct_lt(&Q);
        all_valid &= c1.ct_lt(&Q);
    }
    all_valid.into()
}
