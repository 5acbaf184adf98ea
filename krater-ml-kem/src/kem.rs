//! ML-KEM-1024 key encapsulation (FIPS 203 Algorithms 16-18).
//!
//! The Fujisaki-Okamoto transform with implicit rejection turns the
//! CPA-secure K-PKE scheme into an IND-CCA2-secure KEM: decapsulation of
//! a malformed ciphertext never signals failure, it returns a
//! pseudorandom secret derived from the private seed z instead.

use crate::encode::check_ek_modulus;
use crate::hash::{hash_g, hash_h, hash_j};
use crate::k_pke::{k_pke_decrypt, k_pke_encrypt, k_pke_keygen};
use crate::params::ml_kem_1024::{
    CIPHERTEXT_SIZE, DECAPSULATION_KEY_SIZE, DK_EK_OFFSET, DK_HASH_OFFSET, DK_Z_OFFSET,
    ENCAPSULATION_KEY_SIZE, SHARED_SECRET_SIZE,
};
use krater_core::{Error, Result};
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// ML-KEM-1024 key generation (FIPS 203 Algorithm 16).
///
/// # Arguments
/// * `d` - 32-byte random seed for K-PKE key generation
/// * `z` - 32-byte random seed for implicit rejection
///
/// # Returns
/// * `dk` - decapsulation key: dk_pke || ek || H(ek) || z (3168 bytes)
/// * `ek` - encapsulation key (1568 bytes)
pub fn ml_kem_keygen(
    d: &[u8; 32],
    z: &[u8; 32],
) -> ([u8; DECAPSULATION_KEY_SIZE], [u8; ENCAPSULATION_KEY_SIZE]) {
    let (ek, dk_pke) = k_pke_keygen(d);
    let h_ek = hash_h(&ek);

    let mut dk = [0u8; DECAPSULATION_KEY_SIZE];
    dk[..DK_EK_OFFSET].copy_from_slice(&dk_pke);
    dk[DK_EK_OFFSET..DK_HASH_OFFSET].copy_from_slice(&ek);
    dk[DK_HASH_OFFSET..DK_Z_OFFSET].copy_from_slice(&h_ek);
    dk[DK_Z_OFFSET..].copy_from_slice(z);

    (dk, ek)
}

/// ML-KEM-1024 encapsulation (FIPS 203 Algorithm 17).
///
/// # Arguments
/// * `ek` - encapsulation key bytes
/// * `m` - 32-byte random message
///
/// # Returns
/// `(c, K)`: the 1568-byte ciphertext and the 32-byte shared secret.
/// K is the first half of G(m || H(ek)) directly; no further hashing is
/// applied.
///
/// # Errors
/// - [`Error::InvalidKeyLength`] if `ek` is not 1568 bytes.
/// - [`Error::EncodingError`] if any decoded 12-bit coefficient of `ek`
///   is >= q (FIPS 203 section 7.2 modulus check).
pub fn ml_kem_encaps(
    ek: &[u8],
    m: &[u8; 32],
) -> Result<([u8; CIPHERTEXT_SIZE], [u8; SHARED_SECRET_SIZE])> {
    if ek.len() != ENCAPSULATION_KEY_SIZE {
        return Err(Error::InvalidKeyLength {
            expected: ENCAPSULATION_KEY_SIZE,
            actual: ek.len(),
        });
    }
    if !check_ek_modulus(ek) {
        return Err(Error::EncodingError);
    }

    // (K, r) = G(m || H(ek))
    let h = hash_h(ek);
    let mut g_input = [0u8; 64];
    g_input[..32].copy_from_slice(m);
    g_input[32..].copy_from_slice(&h);
    let mut g_output = hash_g(&g_input);

    let mut shared_secret = [0u8; SHARED_SECRET_SIZE];
    let mut r = [0u8; 32];
    shared_secret.copy_from_slice(&g_output[..32]);
    r.copy_from_slice(&g_output[32..]);

    let c = k_pke_encrypt(ek, m, &r);

    g_input.zeroize();
    g_output.zeroize();
    r.zeroize();

    Ok((c, shared_secret))
}

/// ML-KEM-1024 decapsulation (FIPS 203 Algorithm 18).
///
/// # Arguments
/// * `dk` - decapsulation key bytes
/// * `c` - ciphertext bytes
///
/// # Returns
/// The 32-byte shared secret. Decapsulation never reports failure: a
/// ciphertext that does not re-encrypt to itself yields the implicit
/// rejection secret J(z || c), indistinguishable from a success.
///
/// # Errors
/// - [`Error::InvalidKeyLength`] if `dk` is not 3168 bytes.
/// - [`Error::InvalidCiphertextLength`] if `c` is not 1568 bytes.
///
/// # Algorithm
/// 1. Parse dk as dk_pke || ek || h || z at offsets 0, 1536, 3104, 3136
/// 2. m' = K-PKE.Decrypt(dk_pke, c)
/// 3. (K', r') = G(m' || h)
/// 4. c' = K-PKE.Encrypt(ek, m', r')
/// 5. K_reject = J(z || c)
/// 6. Return K' if c == c', else K_reject, selected in constant time
pub fn ml_kem_decaps(dk: &[u8], c: &[u8]) -> Result<[u8; SHARED_SECRET_SIZE]> {
    if dk.len() != DECAPSULATION_KEY_SIZE {
        return Err(Error::InvalidKeyLength {
            expected: DECAPSULATION_KEY_SIZE,
            actual: dk.len(),
        });
    }
    if c.len() != CIPHERTEXT_SIZE {
        return Err(Error::InvalidCiphertextLength {
            expected: CIPHERTEXT_SIZE,
            actual: c.len(),
        });
    }

    let (dk_pke, rest) = dk.split_at(DK_EK_OFFSET);
    let (ek, rest) = rest.split_at(ENCAPSULATION_KEY_SIZE);
    let (h_bytes, z_bytes) = rest.split_at(32);

    let h: &[u8; 32] = h_bytes
        .try_into()
        .expect("infallible: h is 32 bytes after dk length check");
    let z: &[u8; 32] = z_bytes
        .try_into()
        .expect("infallible: z is 32 bytes after dk length check");

    // 2. m' = K-PKE.Decrypt(dk_pke, c)
    let mut m_prime = k_pke_decrypt(dk_pke, c);

    // 3. (K', r') = G(m' || h)
    let mut g_input = [0u8; 64];
    g_input[..32].copy_from_slice(&m_prime);
    g_input[32..].copy_from_slice(h);
    let mut g_output = hash_g(&g_input);

    let mut k_prime = [0u8; 32];
    let mut r_prime = [0u8; 32];
    k_prime.copy_from_slice(&g_output[..32]);
    r_prime.copy_from_slice(&g_output[32..]);

    // 4. c' = K-PKE.Encrypt(ek, m', r')
    let c_prime = k_pke_encrypt(ek, &m_prime, &r_prime);

    // 5. K_reject = J(z || c)
    let mut k_reject = hash_j(z, c);

    // 6. Constant-time selection: the comparison XOR-accumulates over all
    // bytes and the mask-based select leaves no branch for a timing
    // adversary to observe.
    let ciphertexts_equal = c.ct_eq(&c_prime[..]);

    let mut result = [0u8; SHARED_SECRET_SIZE];
    for i in 0..SHARED_SECRET_SIZE {
        result[i] = u8::conditional_select(&k_reject[i], &k_prime[i], ciphertexts_equal);
    }

    m_prime.zeroize();
    g_input.zeroize();
    g_output.zeroize();
    k_prime.zeroize();
    r_prime.zeroize();
    k_reject.zeroize();

    Ok(result)
}
