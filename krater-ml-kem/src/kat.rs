//! Known-answer tests for ML-KEM-1024.
//!
//! Pinned vectors were generated with an external reference
//! implementation of this crate's key layout (the K-PKE decryption key
//! serializes s in coefficient domain). Full keys and ciphertexts are
//! pinned through their SHA3-256 digests; shared secrets are pinned
//! verbatim.

use crate::hash::{hash_h, hash_j};
use crate::kem::{ml_kem_decaps, ml_kem_encaps, ml_kem_keygen};

fn hex_decode(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

fn assert_hex(label: &str, actual: &[u8], expected_hex: &str) {
    assert_eq!(
        actual,
        &hex_decode(expected_hex)[..],
        "{} does not match pinned vector",
        label
    );
}

mod zero_seed {
    use super::*;

    const D: [u8; 32] = [0u8; 32];
    const Z: [u8; 32] = [0u8; 32];
    const M: [u8; 32] = [0u8; 32];

    #[test]
    fn test_keygen_pinned() {
        let (dk, ek) = ml_kem_keygen(&D, &Z);

        assert_hex(
            "ek prefix",
            &ek[..32],
            "b1572c900b8b8202357437819c129e3cd66d21d7af55c5682b951deff475df1b",
        );
        assert_hex(
            "H(ek)",
            &hash_h(&ek),
            "9f62e8c88195d7ad50b14514fbe94a887554204da7a40dafbe72c5e15d39e969",
        );
        assert_hex(
            "H(dk)",
            &hash_h(&dk),
            "0cab9cde256905cea0d678bb3b63a106f7763715a09c1ab52cfdfe78872eb453",
        );
    }

    #[test]
    fn test_encaps_pinned() {
        let (_, ek) = ml_kem_keygen(&D, &Z);
        let (c, k) = ml_kem_encaps(&ek, &M).unwrap();

        assert_hex(
            "H(c)",
            &hash_h(&c),
            "ecccadf704142d9c85715cb7a2390216a2e0a01728c28c825f2396be88766a03",
        );
        assert_hex(
            "K",
            &k,
            "760a9793cd6c81c3cdeb8c679ae7f5741caaa97452898345fc081fef29069885",
        );
    }

    #[test]
    fn test_decaps_pinned() {
        let (dk, ek) = ml_kem_keygen(&D, &Z);
        let (c, k) = ml_kem_encaps(&ek, &M).unwrap();

        let k_dec = ml_kem_decaps(&dk, &c).unwrap();
        assert_eq!(k, k_dec);
        assert_hex(
            "K",
            &k_dec,
            "760a9793cd6c81c3cdeb8c679ae7f5741caaa97452898345fc081fef29069885",
        );
    }

    #[test]
    fn test_implicit_rejection_pinned() {
        let (dk, ek) = ml_kem_keygen(&D, &Z);
        let (mut c, _) = ml_kem_encaps(&ek, &M).unwrap();

        // Single-bit flip in the first byte
        c[0] ^= 0x01;

        let k_reject = ml_kem_decaps(&dk, &c).unwrap();
        assert_hex(
            "K_reject",
            &k_reject,
            "83ef28a83983270ec78f3919f42edb9994edeb37602bc77667096b52ce610a54",
        );

        // The rejection secret is exactly SHAKE256(z || c)[..32]
        assert_eq!(k_reject, hash_j(&Z, &c));
    }
}

mod incrementing_seed {
    use super::*;

    fn seeds() -> ([u8; 32], [u8; 32], [u8; 32]) {
        let d: [u8; 32] = core::array::from_fn(|i| i as u8);
        let z: [u8; 32] = core::array::from_fn(|i| (i + 32) as u8);
        let m: [u8; 32] = core::array::from_fn(|i| (i + 64) as u8);
        (d, z, m)
    }

    #[test]
    fn test_keygen_pinned() {
        let (d, z, _) = seeds();
        let (dk, ek) = ml_kem_keygen(&d, &z);

        assert_hex(
            "H(ek)",
            &hash_h(&ek),
            "61349e5c131a7e116a0463861d7d18663c5627c38c7147ddaadfd48acd7a4535",
        );
        assert_hex(
            "H(dk)",
            &hash_h(&dk),
            "a380a1e5482eae3acb8e02751176adbf3ee17e7237915dfaec6dbae28f07f6aa",
        );
    }

    #[test]
    fn test_encaps_decaps_pinned() {
        let (d, z, m) = seeds();
        let (dk, ek) = ml_kem_keygen(&d, &z);
        let (c, k) = ml_kem_encaps(&ek, &m).unwrap();

        assert_hex(
            "H(c)",
            &hash_h(&c),
            "c1579fa02c614f3762b2a799b51e41cebb8f820f34fa736af02c56de2460ce3c",
        );
        assert_hex(
            "K",
            &k,
            "0ad8d1ea1b8dd788979b4379581218df9321bdce5567eca42ae6be7d395f1a54",
        );
        assert_eq!(ml_kem_decaps(&dk, &c).unwrap(), k);
    }
}

mod matrix_reproducibility {
    use crate::sample::sample_ntt_from_seed;

    #[test]
    fn test_matrix_entry_for_zero_rho() {
        // A[0][0] for rho = 0 is fully determined; the leading
        // coefficients are pinned from the reference implementation.
        let poly = sample_ntt_from_seed(&[0u8; 32], 0, 0);
        assert_eq!(
            &poly.coeffs[..8],
            &[2944, 3017, 340, 1184, 3243, 1708, 2458, 2285]
        );
    }
}
