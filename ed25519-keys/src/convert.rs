// -*- mode: rust; -*-
//
// This file is part of ed25519-keys.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Conversion of Ed25519 keys to Curve25519 (X25519) keys.
//!
//! The public key conversion applies the birational map
//! \\(u = (1+y)/(1-y)\\) to the Edwards \\(y\\)-coordinate, after checking
//! that the point lies in the prime-order subgroup.  The secret key
//! conversion re-derives the Ed25519 secret scalar from the seed, but
//! clamps it the X25519 way.

use core::fmt::Debug;

use curve25519_arith::constants;
use curve25519_arith::montgomery::MontgomeryPoint;

use subtle::{Choice, ConstantTimeEq};

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::KeyError;
use crate::expanded::ExpandedSeed;
use crate::keypair::{PublicKey, SecretKey};
use crate::CURVE25519_SECRET_KEY_LENGTH;

/// Encodings of the points of order dividing 8, with the sign bit
/// cleared.  Non-canonical encodings of \\(y = 0\\) and \\(y = 1\\) are
/// included.
#[rustfmt::skip]
const SMALL_ORDER_ENCODINGS: [[u8; 32]; 7] = [
    // 0 (order 4)
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    // 1 (order 1)
    [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
     0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    // 2707385501144840649318225287225658788936804267575313519463743609750303402022 (order 8)
    [0x26, 0xe8, 0x95, 0x8f, 0xc2, 0xb2, 0x27, 0xb0, 0x45, 0xc3, 0xf4, 0x89, 0xf2, 0xef, 0x98, 0xf0,
     0xd5, 0xdf, 0xac, 0x05, 0xd3, 0xc6, 0x33, 0x39, 0xb1, 0x38, 0x02, 0x88, 0x6d, 0x53, 0xfc, 0x05],
    // 55188659117513257062467267217118295137698188065244968500265048394206261417927 (order 8)
    [0xc7, 0x17, 0x6a, 0x70, 0x3d, 0x4d, 0xd8, 0x4f, 0xba, 0x3c, 0x0b, 0x76, 0x0d, 0x10, 0x67, 0x0f,
     0x2a, 0x20, 0x53, 0xfa, 0x2c, 0x39, 0xcc, 0xc6, 0x4e, 0xc7, 0xfd, 0x77, 0x92, 0xac, 0x03, 0x7a],
    // p - 1 (order 2)
    [0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
     0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f],
    // p (=0, order 4)
    [0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
     0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f],
    // p + 1 (=1, order 1)
    [0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
     0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f],
];

/// Returns true if `encoding`, ignoring its sign bit, is one of the
/// small-order encodings.  Every entry is compared.
fn has_small_order_encoding(encoding: &[u8; 32]) -> Choice {
    let mut y = *encoding;
    y[31] &= 0x7f;

    SMALL_ORDER_ENCODINGS
        .iter()
        .fold(Choice::from(0), |found, small| found | y.ct_eq(small))
}

/// Convert an Ed25519 public key to a Curve25519 public key.
///
/// Runs in variable time: public keys are public.
///
/// # Errors
///
/// * [`KeyError::SmallOrder`] if `ed_pk` is a small-order encoding;
/// * [`KeyError::PointDecompression`] if `ed_pk` is not on the curve;
/// * [`KeyError::TorsionComponent`] if \\([\ell]A\\) has \\(x \neq 0\\).
///
/// The last check accepts a point whose only torsion component has
/// order 2.  Use [`EdwardsPoint::is_torsion_free`] to reject those as
/// well.
///
/// [`EdwardsPoint::is_torsion_free`]: curve25519_arith::edwards::EdwardsPoint::is_torsion_free
pub fn pk_to_curve25519(ed_pk: &PublicKey) -> Result<MontgomeryPoint, KeyError> {
    if has_small_order_encoding(ed_pk.as_bytes()).into() {
        return Err(KeyError::SmallOrder);
    }

    // -A has the same y, so the same Montgomery u, as A.
    let minus_a = ed_pk
        .as_compressed()
        .decompress_negated_vartime()
        .ok_or(KeyError::PointDecompression)?;

    let la = minus_a.vartime_mul(&constants::BASEPOINT_ORDER);
    if !bool::from(la.x_is_zero()) {
        return Err(KeyError::TorsionComponent);
    }

    Ok(minus_a.to_montgomery())
}

/// A Curve25519 secret key: an X25519-clamped scalar.
///
/// Wiped when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Curve25519SecretKey([u8; CURVE25519_SECRET_KEY_LENGTH]);

impl Debug for Curve25519SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Curve25519SecretKey { .. }")
    }
}

impl Curve25519SecretKey {
    /// Convert this secret key to a byte array.
    pub fn to_bytes(&self) -> [u8; CURVE25519_SECRET_KEY_LENGTH] {
        self.0
    }

    /// View this secret key as a byte array.
    pub fn as_bytes(&self) -> &[u8; CURVE25519_SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Compute the X25519 public key for this secret.
    pub fn public_key(&self) -> MontgomeryPoint {
        MontgomeryPoint::mul_base_clamped(self.0)
    }

    /// Perform X25519 Diffie-Hellman with `their_public`.
    pub fn diffie_hellman(&self, their_public: &MontgomeryPoint) -> MontgomeryPoint {
        their_public.mul_clamped(self.0)
    }
}

/// Convert an Ed25519 secret key to a Curve25519 secret key.
///
/// Only the seed half of `ed_sk` is read.  The result is
/// `SHA-512(seed)[..32]` with the X25519 clamp applied, so it is the
/// Ed25519 secret scalar in X25519 form.  The digest is wiped before
/// returning.
pub fn sk_to_curve25519(ed_sk: &SecretKey) -> Curve25519SecretKey {
    let mut seed = ed_sk.seed();
    let expanded = ExpandedSeed::from_seed(&seed);
    seed.zeroize();

    Curve25519SecretKey(*expanded.x25519_scalar_bytes())
}

#[cfg(test)]
mod test {
    use super::*;

    use curve25519_arith::edwards::{CompressedEdwardsY, EdwardsPoint};
    use hex_literal::hex;

    use crate::keypair::seed_keypair;

    #[test]
    fn blocklist_covers_the_torsion_subgroup() {
        for point in constants::EIGHT_TORSION.iter() {
            let encoding = point.compress().to_bytes();
            assert!(bool::from(has_small_order_encoding(&encoding)));
        }
    }

    #[test]
    fn blocklist_ignores_the_sign_bit() {
        for small in SMALL_ORDER_ENCODINGS.iter() {
            let mut signed = *small;
            signed[31] |= 0x80;
            assert!(bool::from(has_small_order_encoding(&signed)));
        }
    }

    #[test]
    fn blocklist_entries_are_small_order_or_off_curve() {
        for small in SMALL_ORDER_ENCODINGS.iter() {
            if let Some(point) = CompressedEdwardsY(*small).decompress() {
                assert!(point.is_small_order());
            }
        }
    }

    #[test]
    fn basepoint_is_not_blocklisted() {
        let encoding = constants::ED25519_BASEPOINT_COMPRESSED.to_bytes();
        assert!(!bool::from(has_small_order_encoding(&encoding)));
    }

    #[test]
    fn small_order_keys_are_rejected() {
        for point in constants::EIGHT_TORSION.iter() {
            let pk = PublicKey::from_bytes(point.compress().to_bytes());
            let err = pk_to_curve25519(&pk).unwrap_err();
            assert!(matches!(err, KeyError::SmallOrder));
        }
    }

    #[test]
    fn mixed_order_key_is_rejected() {
        let point = constants::ED25519_BASEPOINT_POINT + constants::EIGHT_TORSION[1];
        let pk = PublicKey::from_bytes(point.compress().to_bytes());
        let err = pk_to_curve25519(&pk).unwrap_err();
        assert!(matches!(err, KeyError::TorsionComponent));
        assert!(err.is_subgroup_failure());
    }

    /// \\([\ell](B + T_2) = T_2 = (0, -1)\\), so the x-only check accepts it.
    #[test]
    fn order_two_component_passes_the_x_check() {
        let pk = PublicKey::from_bytes(hex!(
            "9599999999999999999999999999999999999999999999999999999999999999"
        ));
        let point = pk.as_compressed().decompress().unwrap();
        assert!(!point.is_torsion_free());
        assert_eq!(
            pk_to_curve25519(&pk).unwrap().to_bytes(),
            hex!("12c7711cc7711cc7711cc7711cc7711cc7711cc7711cc7711cc7711cc7711c47")
        );
    }

    #[test]
    fn off_curve_key_is_rejected() {
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        let err = pk_to_curve25519(&PublicKey::from_bytes(bytes)).unwrap_err();
        assert!(matches!(err, KeyError::PointDecompression));
        assert!(!err.is_subgroup_failure());
    }

    #[test]
    fn basepoint_converts_to_x25519_basepoint() {
        let pk = PublicKey::from_bytes(constants::ED25519_BASEPOINT_COMPRESSED.to_bytes());
        assert_eq!(pk_to_curve25519(&pk).unwrap(), constants::X25519_BASEPOINT);
    }

    #[test]
    fn converted_keys_agree() {
        for seed in [[0u8; 32], [1u8; 32], [0xffu8; 32]].iter() {
            let keypair = seed_keypair(seed);
            let x_pk = pk_to_curve25519(&keypair.public).unwrap();
            let x_sk = sk_to_curve25519(&keypair.secret);
            assert_eq!(x_sk.public_key(), x_pk);
            assert_eq!(
                EdwardsPoint::mul_base_clamped(x_sk.to_bytes()).to_montgomery(),
                x_pk
            );
        }
    }

    #[test]
    fn sk_conversion_ignores_the_public_half() {
        let keypair = seed_keypair(&[9u8; 32]);
        let mut tampered = keypair.secret.to_bytes();
        tampered[40] ^= 1;
        assert_eq!(
            sk_to_curve25519(&SecretKey::from_bytes(&tampered)).to_bytes(),
            sk_to_curve25519(&keypair.secret).to_bytes()
        );
    }

    #[test]
    fn secret_debug_is_redacted() {
        let x_sk = sk_to_curve25519(&seed_keypair(&[4u8; 32]).secret);
        assert_eq!(std::format!("{:?}", x_sk), "Curve25519SecretKey { .. }");
    }
}
