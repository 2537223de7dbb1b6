// -*- mode: rust; -*-
//
// This file is part of ed25519-keys.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Errors which may occur when deriving or converting keys.

use core::fmt;
use core::fmt::Display;

/// Errors which may occur while deriving key pairs or converting keys.
///
/// This error may arise due to:
///
/// * An Ed25519 public key whose bytes are not the encoding of a curve
///   point.
///
/// * An Ed25519 public key which is on the curve but outside the
///   prime-order subgroup, either because it is one of the known
///   small-order encodings or because multiplying it by the group order
///   leaves a torsion component behind.
///
/// * A failure of the random number generator while generating a seed.
#[derive(Debug)]
#[non_exhaustive]
pub enum KeyError {
    /// The bytes are not the encoding of a point on the curve.
    PointDecompression,
    /// The encoding is one of the points of small order.
    SmallOrder,
    /// The point has a component outside the prime-order subgroup.
    TorsionComponent,
    /// The random number generator failed.
    Rng(rand_core::Error),
}

impl KeyError {
    /// Returns `true` if the key is on the curve but in a subgroup it
    /// must not be in.  Such keys are unusable for key exchange and
    /// should not be retried.
    pub fn is_subgroup_failure(&self) -> bool {
        matches!(self, KeyError::SmallOrder | KeyError::TorsionComponent)
    }
}

impl Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            KeyError::PointDecompression => write!(f, "Cannot decompress Edwards point"),
            KeyError::SmallOrder => write!(f, "Point has small order"),
            KeyError::TorsionComponent => {
                write!(f, "Point is not in the prime-order subgroup")
            }
            KeyError::Rng(ref e) => write!(f, "Random number generator failure: {}", e),
        }
    }
}

impl From<rand_core::Error> for KeyError {
    fn from(e: rand_core::Error) -> KeyError {
        KeyError::Rng(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KeyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            KeyError::Rng(ref e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn subgroup_failures_are_classified() {
        assert!(KeyError::SmallOrder.is_subgroup_failure());
        assert!(KeyError::TorsionComponent.is_subgroup_failure());
        assert!(!KeyError::PointDecompression.is_subgroup_failure());
    }

    #[test]
    fn rng_errors_convert() {
        let code = core::num::NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap();
        let err: KeyError = rand_core::Error::from(code).into();
        assert!(matches!(err, KeyError::Rng(_)));
        assert!(!err.is_subgroup_failure());
    }
}
