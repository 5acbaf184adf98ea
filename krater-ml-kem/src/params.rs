//! ML-KEM-1024 parameters as defined in FIPS 203.

/// Parameters of the polynomial ring shared by every component.
pub mod common {
    /// Polynomial ring dimension (n).
    pub const N: usize = 256;

    /// Modulus (q).
    pub const Q: u16 = 3329;

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = 32;

    /// Seed size for key generation and encapsulation randomness.
    pub const SEED_SIZE: usize = 32;
}

/// ML-KEM-1024 parameters (NIST Security Level 5).
pub mod ml_kem_1024 {
    /// Module rank (k).
    pub const K: usize = 4;

    /// Compression parameter for the u vector (du).
    pub const DU: usize = 11;

    /// Compression parameter for the v polynomial (dv).
    pub const DV: usize = 5;

    /// Noise parameter for s, e and r (eta1).
    pub const ETA1: usize = 2;

    /// Noise parameter for e1 and e2 (eta2).
    pub const ETA2: usize = 2;

    /// K-PKE decryption key size: K polynomials at 12 bits per coefficient.
    pub const PKE_SECRET_KEY_SIZE: usize = K * 384;

    /// Encapsulation key size in bytes: ByteEncode12(t) || rho.
    pub const ENCAPSULATION_KEY_SIZE: usize = K * 384 + 32;

    /// Decapsulation key size in bytes: dk_pke || ek || H(ek) || z.
    pub const DECAPSULATION_KEY_SIZE: usize =
        PKE_SECRET_KEY_SIZE + ENCAPSULATION_KEY_SIZE + 32 + 32;

    /// Compressed u vector size (the c1 component).
    pub const C1_SIZE: usize = K * 32 * DU;

    /// Compressed v polynomial size (the c2 component).
    pub const C2_SIZE: usize = 32 * DV;

    /// Ciphertext size in bytes: c1 || c2.
    pub const CIPHERTEXT_SIZE: usize = C1_SIZE + C2_SIZE;

    /// Offset of ek inside dk.
    pub const DK_EK_OFFSET: usize = PKE_SECRET_KEY_SIZE;

    /// Offset of H(ek) inside dk.
    pub const DK_HASH_OFFSET: usize = DK_EK_OFFSET + ENCAPSULATION_KEY_SIZE;

    /// Offset of the implicit-rejection seed z inside dk.
    pub const DK_Z_OFFSET: usize = DK_HASH_OFFSET + 32;

    /// Shared secret size in bytes.
    pub const SHARED_SECRET_SIZE: usize = super::common::SHARED_SECRET_SIZE;
}

#[cfg(test)]
mod tests {
    use super::ml_kem_1024::*;

    #[test]
    fn test_derived_sizes() {
        assert_eq!(PKE_SECRET_KEY_SIZE, 1536);
        assert_eq!(ENCAPSULATION_KEY_SIZE, 1568);
        assert_eq!(DECAPSULATION_KEY_SIZE, 3168);
        assert_eq!(C1_SIZE, 1408);
        assert_eq!(C2_SIZE, 160);
        assert_eq!(CIPHERTEXT_SIZE, 1568);
    }

    #[test]
    fn test_dk_offsets() {
        assert_eq!(DK_EK_OFFSET, 1536);
        assert_eq!(DK_HASH_OFFSET, 3104);
        assert_eq!(DK_Z_OFFSET, 3136);
        assert_eq!(DK_Z_OFFSET + 32, DECAPSULATION_KEY_SIZE);
    }
}
