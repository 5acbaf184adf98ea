//! K-PKE: the IND-CPA-secure public-key encryption scheme inside ML-KEM
//! (FIPS 203 Algorithms 13-15).
//!
//! K-PKE on its own is only CPA-secure; the ML-KEM wrapper in [`crate::kem`]
//! adds CCA security through the Fujisaki-Okamoto transform.
//!
//! All outputs are fixed-size stack arrays; nothing here allocates.

use crate::encode::{msg_to_poly, poly_to_msg};
use crate::hash::{hash_g, prf};
use crate::matrix::{matrix_vec_mul, matrix_vec_mul_transpose, sample_matrix};
use crate::ntt::inv_ntt;
use crate::params::ml_kem_1024::{
    C1_SIZE, CIPHERTEXT_SIZE, DV, ENCAPSULATION_KEY_SIZE, ETA1, ETA2, K, PKE_SECRET_KEY_SIZE,
};
use crate::poly::{poly_add, poly_cbd, poly_decompress, poly_sub};
use crate::polyvec::PolyVec;
use zeroize::Zeroize;

/// K-PKE key generation (FIPS 203 Algorithm 13).
///
/// # Arguments
/// * `d` - 32-byte random seed
///
/// # Returns
/// * `ek_pke` - encryption key: ByteEncode12(t) || rho, with t in NTT domain
/// * `dk_pke` - decryption key: ByteEncode12(s), with s in coefficient
///   domain (decryption transforms it to NTT domain after decoding)
///
/// # Algorithm
/// 1. (rho, sigma) = G(d || k), with the rank appended as a single byte
/// 2. Sample A from rho (NTT domain)
/// 3. Sample s (nonces 0..k) and e (nonces k..2k) from sigma via CBD
/// 4. t = A * NTT(s) + NTT(e), all in NTT domain
/// 5. ek_pke = encode(t) || rho; dk_pke = encode(s)
pub fn k_pke_keygen(
    d: &[u8; 32],
) -> ([u8; ENCAPSULATION_KEY_SIZE], [u8; PKE_SECRET_KEY_SIZE]) {
    // 1. (rho, sigma) = G(d || k)
    let mut g_input = [0u8; 33];
    g_input[..32].copy_from_slice(d);
    g_input[32] = K as u8;
    let mut g_output = hash_g(&g_input);
    let mut rho = [0u8; 32];
    let mut sigma = [0u8; 32];
    rho.copy_from_slice(&g_output[..32]);
    sigma.copy_from_slice(&g_output[32..]);

    // 2. Sample A from rho (in NTT domain)
    let a = sample_matrix(&rho);

    // 3. Sample s and e from sigma; the nonce counter runs 0..2k
    let mut s = PolyVec::new();
    for i in 0..K {
        s.polys[i] = poly_cbd(ETA1, &prf(&sigma, i as u8));
    }
    let mut e = PolyVec::new();
    for i in 0..K {
        e.polys[i] = poly_cbd(ETA1, &prf(&sigma, (K + i) as u8));
    }

    // The decryption key serializes s in coefficient domain, before the
    // transform below.
    let dk_pke = s.to_bytes();

    // 4. t = A * NTT(s) + NTT(e) in NTT domain
    s.ntt();
    e.ntt();
    let mut t = matrix_vec_mul(&a, &s);
    t.add_assign(&e);

    // 5. ek_pke = encode(t) || rho
    let mut ek_pke = [0u8; ENCAPSULATION_KEY_SIZE];
    ek_pke[..PKE_SECRET_KEY_SIZE].copy_from_slice(&t.to_bytes());
    ek_pke[PKE_SECRET_KEY_SIZE..].copy_from_slice(&rho);

    s.zeroize();
    e.zeroize();
    sigma.zeroize();
    g_output.zeroize();

    (ek_pke, dk_pke)
}

/// K-PKE encryption (FIPS 203 Algorithm 14).
///
/// Deterministic given (`ek_pke`, `m`, `r_seed`); the caller guarantees
/// that `ek_pke` is exactly [`ENCAPSULATION_KEY_SIZE`] bytes.
///
/// # Algorithm
/// 1. Decode (t, rho) from ek_pke; t is already in NTT domain
/// 2. Regenerate A from rho (same column-first XOF ordering as KeyGen)
/// 3. Sample r (nonces 0..k), e1 (nonces k..2k), e2 (nonce 2k)
/// 4. u = INTT(A^T * NTT(r)) + e1
/// 5. v = INTT(t^T * NTT(r)) + e2 + Decompress_1(m)
/// 6. c = ByteEncode11(Compress11(u)) || ByteEncode5(Compress5(v))
pub fn k_pke_encrypt(
    ek_pke: &[u8],
    m: &[u8; 32],
    r_seed: &[u8; 32],
) -> [u8; CIPHERTEXT_SIZE] {
    // 1. Parse ek_pke as (t, rho)
    let t = PolyVec::from_bytes(&ek_pke[..PKE_SECRET_KEY_SIZE]);
    let rho: &[u8; 32] = ek_pke[PKE_SECRET_KEY_SIZE..ENCAPSULATION_KEY_SIZE]
        .try_into()
        .expect("infallible: ek_pke length checked by caller");

    // 2. Regenerate A from rho
    let a = sample_matrix(rho);

    // 3. Sample r, e1 and e2; the nonce counter runs 0..2k+1
    let mut r = PolyVec::new();
    for i in 0..K {
        r.polys[i] = poly_cbd(ETA1, &prf(r_seed, i as u8));
    }
    let mut e1 = PolyVec::new();
    for i in 0..K {
        e1.polys[i] = poly_cbd(ETA2, &prf(r_seed, (K + i) as u8));
    }
    let e2 = poly_cbd(ETA2, &prf(r_seed, (2 * K) as u8));

    // 4. u = INTT(A^T * NTT(r)) + e1
    r.ntt();
    let mut u = matrix_vec_mul_transpose(&a, &r);
    u.inv_ntt();
    u.add_assign(&e1);

    // 5. v = INTT(t^T * NTT(r)) + e2 + Decompress_1(m)
    let mut v = t.inner_product(&r);
    inv_ntt(&mut v);
    let v = poly_add(&poly_add(&v, &e2), &msg_to_poly(m));

    // 6. c = c1 || c2
    let mut c = [0u8; CIPHERTEXT_SIZE];
    c[..C1_SIZE].copy_from_slice(&u.compress());
    crate::poly::poly_compress(&v, DV as u32, &mut c[C1_SIZE..]);

    r.zeroize();

    c
}

/// K-PKE decryption (FIPS 203 Algorithm 15).
///
/// The caller guarantees that `dk_pke` is [`PKE_SECRET_KEY_SIZE`] bytes
/// and `c` is [`CIPHERTEXT_SIZE`] bytes.
///
/// # Algorithm
/// 1. u' = Decompress11(ByteDecode11(c1)), v' = Decompress5(ByteDecode5(c2))
/// 2. Decode s from dk_pke (coefficient domain) and transform to NTT domain
/// 3. w = v' - INTT(s^T * NTT(u'))
/// 4. m = ByteEncode1(Compress1(w))
pub fn k_pke_decrypt(dk_pke: &[u8], c: &[u8]) -> [u8; 32] {
    // 1. Split c and decompress
    let (c1, c2) = c.split_at(C1_SIZE);
    let mut u = PolyVec::decompress(c1);
    let v = poly_decompress(c2, DV as u32);

    // 2. s is serialized in coefficient domain
    let mut s = PolyVec::from_bytes(dk_pke);
    s.ntt();

    // 3. w = v' - INTT(s^T * NTT(u'))
    u.ntt();
    let mut st_u = s.inner_product(&u);
    inv_ntt(&mut st_u);
    let w = poly_sub(&v, &st_u);

    // 4. m = Compress_1(w), packed LSB-first
    let m = poly_to_msg(&w);

    s.zeroize();

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_pke_keygen_deterministic() {
        let d = [0x42u8; 32];
        let (ek1, dk1) = k_pke_keygen(&d);
        let (ek2, dk2) = k_pke_keygen(&d);
        assert_eq!(ek1, ek2);
        assert_eq!(dk1, dk2);
    }

    #[test]
    fn test_k_pke_keygen_key_sizes() {
        let (ek, dk) = k_pke_keygen(&[0x42u8; 32]);
        assert_eq!(ek.len(), 1568);
        assert_eq!(dk.len(), 1536);
    }

    #[test]
    fn test_k_pke_keygen_rho_suffix() {
        // rho is the first half of G(d || k), appended to the encoded t
        let d = [0x42u8; 32];
        let (ek, _) = k_pke_keygen(&d);

        let mut g_input = [0u8; 33];
        g_input[..32].copy_from_slice(&d);
        g_input[32] = K as u8;
        let g = hash_g(&g_input);

        assert_eq!(&ek[1536..], &g[..32]);
    }

    #[test]
    fn test_k_pke_encrypt_decrypt_roundtrip() {
        let (ek, dk) = k_pke_keygen(&[0x42u8; 32]);

        let msg = [0x55u8; 32];
        let r = [0xAAu8; 32];

        let c = k_pke_encrypt(&ek, &msg, &r);
        assert_eq!(c.len(), 1568);

        let decrypted = k_pke_decrypt(&dk, &c);
        assert_eq!(msg, decrypted);
    }

    #[test]
    fn test_k_pke_roundtrip_extreme_messages() {
        let (ek, dk) = k_pke_keygen(&[0x13u8; 32]);
        let r = [0x77u8; 32];

        for msg in [[0x00u8; 32], [0xFFu8; 32]] {
            let c = k_pke_encrypt(&ek, &msg, &r);
            assert_eq!(k_pke_decrypt(&dk, &c), msg);
        }
    }

    #[test]
    fn test_k_pke_encrypt_deterministic() {
        let (ek, _) = k_pke_keygen(&[0x42u8; 32]);
        let msg = [0x55u8; 32];
        let r = [0xAAu8; 32];

        let c1 = k_pke_encrypt(&ek, &msg, &r);
        let c2 = k_pke_encrypt(&ek, &msg, &r);
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_k_pke_randomness_separates_ciphertexts() {
        let (ek, dk) = k_pke_keygen(&[0x42u8; 32]);
        let msg = [0x55u8; 32];

        let c1 = k_pke_encrypt(&ek, &msg, &[0xAAu8; 32]);
        let c2 = k_pke_encrypt(&ek, &msg, &[0xBBu8; 32]);

        assert_ne!(c1, c2);
        assert_eq!(k_pke_decrypt(&dk, &c1), msg);
        assert_eq!(k_pke_decrypt(&dk, &c2), msg);
    }

    #[test]
    fn test_k_pke_many_roundtrips() {
        let (ek, dk) = k_pke_keygen(&[0x01u8; 32]);

        for i in 0u8..16 {
            let msg = [i.wrapping_mul(37); 32];
            let r = [i.wrapping_mul(101).wrapping_add(3); 32];
            let c = k_pke_encrypt(&ek, &msg, &r);
            assert_eq!(k_pke_decrypt(&dk, &c), msg, "roundtrip failed at {}", i);
        }
    }
}
