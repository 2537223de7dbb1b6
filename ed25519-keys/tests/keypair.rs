// -*- mode: rust; -*-
//
// This file is part of ed25519-keys.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Integration tests for key pair derivation.

#![allow(non_snake_case)]

use ed25519_keys::*;

use hex::FromHex;
use hex_literal::hex;

mod vectors {
    use super::*;

    use curve25519_arith::{
        constants,
        edwards::{CompressedEdwardsY, EdwardsPoint},
        scalar::{clamp_ed25519, Scalar},
        traits::IsIdentity,
    };
    use sha2::{Digest, Sha512};

    /// RFC 8032, section 7.1, TEST 1 to TEST 3: (seed, public key).
    static RFC8032_KEYS: [(&str, &str); 3] = [
        (
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        ),
        (
            "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
        ),
        (
            "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
        ),
    ];

    #[test]
    fn rfc8032_key_pairs() {
        for (i, (seed_hex, pk_hex)) in RFC8032_KEYS.iter().enumerate() {
            let seed = <[u8; SEED_LENGTH]>::from_hex(seed_hex).unwrap();
            let pk = <[u8; PUBLIC_KEY_LENGTH]>::from_hex(pk_hex).unwrap();

            let keypair = seed_keypair(&seed);
            assert_eq!(keypair.public.to_bytes(), pk, "public key of test {}", i + 1);

            let sk = keypair.secret.to_bytes();
            assert_eq!(&sk[..32], &seed[..], "seed half of test {}", i + 1);
            assert_eq!(&sk[32..], &pk[..], "public half of test {}", i + 1);
        }
    }

    #[test]
    fn zero_seed() {
        let keypair = seed_keypair(&[0u8; SEED_LENGTH]);
        let mut expected = [0u8; SECRET_KEY_LENGTH];
        expected[32..].copy_from_slice(&hex!(
            "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29"
        ));
        assert_eq!(keypair.secret.to_bytes(), expected);
        assert_eq!(sk_to_pk(&keypair.secret), keypair.public);
    }

    /// The public key is the clamped lower half of SHA-512(seed) times
    /// the basepoint, however it is computed.
    #[test]
    fn public_key_matches_every_multiplication() {
        let seed = hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7");
        let mut lower = [0u8; 32];
        lower.copy_from_slice(&Sha512::digest(seed)[..32]);
        let s = Scalar::from_bits(clamp_ed25519(lower));

        let B = constants::ED25519_BASEPOINT_POINT;
        let public = seed_keypair(&seed).public;

        assert_eq!(EdwardsPoint::mul_base(&s).compress().to_bytes(), public.to_bytes());
        assert_eq!((&B * &s).compress().to_bytes(), public.to_bytes());
        assert_eq!(B.vartime_mul(&s).compress().to_bytes(), public.to_bytes());
        assert_eq!(
            EdwardsPoint::mul_base_clamped(lower).compress().to_bytes(),
            public.to_bytes()
        );
    }

    #[test]
    fn public_keys_decode_into_the_prime_order_subgroup() {
        for (seed_hex, _) in RFC8032_KEYS.iter() {
            let seed = <[u8; SEED_LENGTH]>::from_hex(seed_hex).unwrap();
            let pk = seed_keypair(&seed).public;
            let A = CompressedEdwardsY(pk.to_bytes()).decompress().unwrap();
            assert!(A.vartime_mul(&constants::BASEPOINT_ORDER).is_identity());
            assert!(A.is_torsion_free());
            assert!(!A.is_small_order());
        }
    }
}

mod properties {
    use super::*;

    use curve25519_arith::{constants, traits::IsIdentity};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn derivation_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            let mut seed = [0u8; SEED_LENGTH];
            rng.fill_bytes(&mut seed);
            let a = seed_keypair(&seed);
            let b = seed_keypair(&seed);
            assert_eq!(a.public, b.public);
            assert_eq!(a.secret.to_bytes(), b.secret.to_bytes());
            assert_eq!(sk_to_seed(&a.secret), seed);
        }
    }

    #[test]
    fn generated_keys_are_prime_order() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..16 {
            let keypair = keypair_from_rng(&mut rng).unwrap();
            let A = keypair.public.as_compressed().decompress().unwrap();
            assert!((&A * &constants::BASEPOINT_ORDER).is_identity());
        }
    }

    #[test]
    fn rng_drives_the_seed() {
        let a = keypair_from_rng(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = keypair_from_rng(&mut StdRng::seed_from_u64(3)).unwrap();
        let c = keypair_from_rng(&mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(a.public, b.public);
        assert_ne!(a.public, c.public);
    }

    #[test]
    #[cfg(feature = "getrandom")]
    fn os_rng_keypairs_differ() {
        let a = keypair().unwrap();
        let b = keypair().unwrap();
        assert_ne!(a.public, b.public);
    }
}

mod rng_failure {
    use super::*;

    use rand_core::{CryptoRng, Error, RngCore};

    /// An RNG that always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), Error> {
            Err(Error::from(
                core::num::NonZeroU32::new(Error::CUSTOM_START + 7).unwrap(),
            ))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn rng_failure_is_propagated() {
        let err = keypair_from_rng(&mut BrokenRng).unwrap_err();
        match err {
            KeyError::Rng(e) => assert_eq!(e.code().map(|c| c.get()), Some(Error::CUSTOM_START + 7)),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
