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
#![allow(non_snake_case)]

use core::cmp::Ordering;

use crate::backend::serial::curve_models::{ProjectiveNielsPoint, ProjectivePoint};
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::NafLookupTable5;

/// Compute \\(aA\\) in variable time.
///
/// Uses a width-5 non-adjacent form of \\(a\\) and a table of the odd
/// multiples \\(A, 3A, \ldots, 15A\\).  Both inputs must be public.
pub(crate) fn mul(A: &EdwardsPoint, a: &Scalar) -> EdwardsPoint {
    let a_naf = a.non_adjacent_form(5);

    // Find starting index
    let mut i: usize = 255;
    for j in (0..256).rev() {
        i = j;
        if a_naf[i] != 0 {
            break;
        }
    }

    let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);

    let mut r = ProjectivePoint::identity();
    loop {
        let mut t = r.double();

        match a_naf[i].cmp(&0) {
            Ordering::Greater => t = &t.as_extended() + &table_A.select(a_naf[i] as usize),
            Ordering::Less => t = &t.as_extended() - &table_A.select(-a_naf[i] as usize),
            Ordering::Equal => {}
        }

        r = t.as_projective();

        if i == 0 {
            break;
        }
        i -= 1;
    }

    r.as_extended()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;
    use crate::traits::IsIdentity;

    #[test]
    fn vartime_mul_matches_constant_time_mul() {
        let B = constants::ED25519_BASEPOINT_POINT;
        let P = B.mul_by_pow_2(5);
        let scalars = [
            Scalar::from(0u64),
            Scalar::from(1u64),
            Scalar::from(2u64),
            Scalar::from(15u64),
            Scalar::from(16u64),
            Scalar::from(0xdead_beef_u64),
            Scalar::from(u64::MAX),
            constants::BASEPOINT_ORDER,
        ];
        for s in scalars.iter() {
            assert_eq!(mul(&P, s), &P * s);
        }
    }

    #[test]
    fn vartime_mul_by_order_kills_prime_order_points() {
        let B = constants::ED25519_BASEPOINT_POINT;
        assert!(mul(&B, &constants::BASEPOINT_ORDER).is_identity());
        let T = constants::EIGHT_TORSION[1];
        assert!(!mul(&(B + T), &constants::BASEPOINT_ORDER).is_identity());
    }
}
