// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>
//! Various constants, such as the Ed25519 and X25519 basepoints.

#![allow(non_snake_case)]

use crate::edwards::CompressedEdwardsY;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::Scalar;

#[cfg(feature = "precomputed-tables")]
use crate::edwards::EdwardsBasepointTable;

pub use crate::backend::serial::u64::constants::*;

/// The Ed25519 basepoint, in `CompressedEdwardsY` format.
///
/// This is the little-endian byte encoding of \\( 4/5 \pmod p \\),
/// which is the \\(y\\)-coordinate of the Ed25519 basepoint.
///
/// The sign bit is 0 since the basepoint has \\(x\\) chosen to be positive.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
]);

/// The X25519 basepoint, in `MontgomeryPoint` format.
pub const X25519_BASEPOINT: MontgomeryPoint = MontgomeryPoint([
    0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
]);

/// `BASEPOINT_ORDER` is the order of the Ed25519 basepoint, i.e.,
/// $$
/// \ell = 2^\{252\} + 27742317777372353535851937790883648493.
/// $$
///
/// As a `Scalar` it is not reduced: [`Scalar::is_canonical`] is false
/// for it.  Multiplying a point by it is the subgroup-membership test.
pub const BASEPOINT_ORDER: Scalar = Scalar {
    bytes: [
        0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
        0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x10,
    ],
};

/// The Ed25519 basepoint, as an `EdwardsBasepointTable` for scalar multiplication.
#[cfg(feature = "precomputed-tables")]
pub static ED25519_BASEPOINT_TABLE: &EdwardsBasepointTable = &ED25519_BASEPOINT_TABLE_INNER;

#[cfg(test)]
mod test {
    use crate::constants;
    use crate::edwards::EdwardsPoint;
    use crate::field::FieldElement;
    use crate::traits::{IsIdentity, ValidityCheck};

    fn fe(n: u8) -> FieldElement {
        let mut bytes = [0u8; 32];
        bytes[0] = n;
        FieldElement::from_bytes(&bytes)
    }

    fn fe_u32(n: u32) -> FieldElement {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&n.to_le_bytes());
        FieldElement::from_bytes(&bytes)
    }

    #[test]
    fn test_eight_torsion() {
        for i in 0..8 {
            let Q = constants::EIGHT_TORSION[i].mul_by_pow_2(3);
            assert!(Q.is_valid());
            assert!(Q.is_identity());
        }
    }

    #[test]
    fn test_four_torsion() {
        for i in (0..8).filter(|i| i % 2 == 0) {
            let Q = constants::EIGHT_TORSION[i].mul_by_pow_2(2);
            assert!(Q.is_valid());
            assert!(Q.is_identity());
        }
    }

    #[test]
    fn test_two_torsion() {
        for i in (0..8).filter(|i| i % 4 == 0) {
            let Q = constants::EIGHT_TORSION[i].mul_by_pow_2(1);
            assert!(Q.is_valid());
            assert!(Q.is_identity());
        }
    }

    #[test]
    fn test_eight_torsion_points_are_distinct() {
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(constants::EIGHT_TORSION[i], constants::EIGHT_TORSION[j]);
            }
        }
    }

    /// Test that d = -121665/121666
    #[test]
    fn test_d_vs_ratio() {
        let a = -&fe_u32(121665);
        let b = fe_u32(121666);
        let d = &a * &b.invert();
        let d2 = &d + &d;
        assert_eq!(d, constants::EDWARDS_D);
        assert_eq!(d2, constants::EDWARDS_D2);
    }

    #[test]
    fn test_sqrt_minus_one() {
        let sqrt_m1_sq = &constants::SQRT_M1 * &constants::SQRT_M1;
        assert_eq!(FieldElement::MINUS_ONE, sqrt_m1_sq);
        assert!(bool::from(!constants::SQRT_M1.is_negative()));
    }

    /// (A + 2) / 4 with A = 486662.
    #[test]
    fn test_aplus2_over_four() {
        assert_eq!(constants::APLUS2_OVER_FOUR, fe_u32(121666));
        assert_eq!(&fe(4) * &constants::APLUS2_OVER_FOUR, fe_u32(486664));
    }

    #[test]
    fn test_basepoint_is_valid_and_compresses() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert!(B.is_valid());
        assert_eq!(B.compress(), constants::ED25519_BASEPOINT_COMPRESSED);
        assert_eq!(
            constants::ED25519_BASEPOINT_COMPRESSED.decompress().unwrap(),
            B
        );
    }

    #[test]
    fn test_basepoint_order() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert!((&B * &constants::BASEPOINT_ORDER).is_identity());
        assert!(!B.is_identity());
    }

    #[test]
    #[cfg(feature = "precomputed-tables")]
    fn test_basepoint_table_entries_are_multiples() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let mut expected = EdwardsPoint::default();
        for j in 0..8 {
            expected = &expected + &B;
            let entry = constants::ED25519_BASEPOINT_TABLE.0[0].0[j];
            let got = (&EdwardsPoint::default() + &entry).as_extended();
            assert_eq!(got, expected);
        }
    }
}
