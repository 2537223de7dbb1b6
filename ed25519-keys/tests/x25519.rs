//! Tests for converting Ed25519 keys into X25519 (Montgomery form) keys.

use curve25519_arith::constants;
use curve25519_arith::montgomery::MontgomeryPoint;
use curve25519_arith::scalar::clamp_x25519;
use ed25519_keys::*;
use hex_literal::hex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha512};

/// Keys from RFC8032 test vectors (from section 7.1)
const ED25519_SEED_A: [u8; 32] =
    hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
const ED25519_SEED_B: [u8; 32] =
    hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");

/// Tests that X25519 Diffie-Hellman works when using keys converted from Ed25519.
#[test]
fn ed25519_to_x25519_dh() {
    let keypair_a = seed_keypair(&ED25519_SEED_A);
    let keypair_b = seed_keypair(&ED25519_SEED_B);

    let x25519_secret_a = sk_to_curve25519(&keypair_a.secret);
    let x25519_secret_b = sk_to_curve25519(&keypair_b.secret);

    assert_eq!(
        x25519_secret_a.to_bytes(),
        hex!("357c83864f2833cb427a2ef1c00a013cfdff2768d980c0a3a520f006904de90f")
    );
    assert_eq!(
        x25519_secret_b.to_bytes(),
        hex!("6ebd9ed75882d52815a97585caf4790a7f6c6b3b7f821c5e259a24b02e502e11")
    );

    let x25519_public_a = pk_to_curve25519(&keypair_a.public).unwrap();
    let x25519_public_b = pk_to_curve25519(&keypair_b.public).unwrap();

    assert_eq!(
        x25519_public_a.to_bytes(),
        hex!("d85e07ec22b0ad881537c2f44d662d1a143cf830c57aca4305d85c7a90f6b62e")
    );
    assert_eq!(
        x25519_public_b.to_bytes(),
        hex!("25c704c594b88afc00a76b69d1ed2b984d7e22550f3ed0802d04fbcd07d38d47")
    );

    let expected_shared_secret =
        hex!("5166f24a6918368e2af831a4affadd97af0ac326bdf143596c045967cc00230e");

    assert_eq!(
        x25519_secret_a.diffie_hellman(&x25519_public_b).to_bytes(),
        expected_shared_secret
    );
    assert_eq!(
        x25519_secret_b.diffie_hellman(&x25519_public_a).to_bytes(),
        expected_shared_secret
    );
}

/// The converted secret is the X25519 clamping of the first 32 bytes
/// of SHA-512(seed).
#[test]
fn secret_conversion_is_clamped_hash() {
    let mut rng = StdRng::seed_from_u64(25519);
    for _ in 0..16 {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        let keypair = seed_keypair(&seed);

        let mut lower = [0u8; 32];
        lower.copy_from_slice(&Sha512::digest(seed)[..32]);

        let converted = sk_to_curve25519(&keypair.secret).to_bytes();
        assert_eq!(converted, clamp_x25519(lower));
        assert_eq!(converted[0] & 0b111, 0);
        assert_eq!(converted[31] & 0b1100_0000, 0b0100_0000);
    }
}

#[test]
fn secret_conversion_is_idempotent() {
    let keypair = seed_keypair(&ED25519_SEED_A);
    let first = sk_to_curve25519(&keypair.secret).to_bytes();
    let second = sk_to_curve25519(&keypair.secret).to_bytes();
    assert_eq!(first, second);
}

/// Converting the public key agrees with multiplying the Montgomery
/// basepoint by the converted secret.
#[test]
fn public_conversion_matches_montgomery_ladder() {
    let mut rng = StdRng::seed_from_u64(7748);
    for _ in 0..16 {
        let keypair = keypair_from_rng(&mut rng).unwrap();
        let x25519_secret = sk_to_curve25519(&keypair.secret);

        let via_edwards = pk_to_curve25519(&keypair.public).unwrap();
        let via_ladder = constants::X25519_BASEPOINT.mul_clamped(x25519_secret.to_bytes());

        assert_eq!(via_edwards, via_ladder);
        assert_eq!(via_edwards, x25519_secret.public_key());
    }
}

#[test]
fn converted_public_key_lifts_back() {
    let keypair = seed_keypair(&ED25519_SEED_A);
    let u = pk_to_curve25519(&keypair.public).unwrap();
    let sign = keypair.public.as_bytes()[31] >> 7;
    let lifted = u.to_edwards(sign).unwrap();
    assert_eq!(lifted.compress().to_bytes(), keypair.public.to_bytes());
}

#[test]
fn small_order_public_keys_fail() {
    for point in constants::EIGHT_TORSION.iter() {
        let mut bytes = point.compress().to_bytes();
        for sign in [0u8, 0x80] {
            bytes[31] = (bytes[31] & 0x7f) | sign;
            let err = pk_to_curve25519(&PublicKey::from_bytes(bytes)).unwrap_err();
            assert!(err.is_subgroup_failure(), "{:?}", bytes);
        }
    }
}

#[test]
fn invalid_public_key_fails() {
    // y = 2 has no x on the curve.
    let mut bytes = [0u8; 32];
    bytes[0] = 2;
    let err = pk_to_curve25519(&PublicKey::from_bytes(bytes)).unwrap_err();
    assert!(matches!(err, KeyError::PointDecompression));
}

#[test]
fn diffie_hellman_with_native_x25519_key() {
    let keypair = seed_keypair(&ED25519_SEED_B);
    let ours = sk_to_curve25519(&keypair.secret);

    let their_secret = [0x42u8; 32];
    let theirs = MontgomeryPoint::mul_base_clamped(their_secret);

    assert_eq!(
        ours.diffie_hellman(&theirs),
        pk_to_curve25519(&keypair.public)
            .unwrap()
            .mul_clamped(their_secret)
    );
}
