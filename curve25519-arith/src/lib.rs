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

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs, rust_2018_idioms, unused_lifetimes, unused_qualifications)]

//! Field and group arithmetic on Curve25519, for deriving Ed25519 keys
//! and converting them to X25519 keys.
//!
//! The crate provides:
//!
//! * arithmetic in \\(\mathbb F\_p\\), \\(p = 2\^{255} - 19\\), in
//!   radix \\(2\^{51}\\) (internal);
//! * the twisted Edwards group in extended coordinates, with
//!   constant-time and variable-time decoding
//!   ([`edwards::CompressedEdwardsY`]);
//! * constant-time fixed-base scalar multiplication against a
//!   precomputed basepoint table ([`edwards::EdwardsPoint::mul_base`]);
//! * variable-time variable-base scalar multiplication for public
//!   inputs ([`edwards::EdwardsPoint::vartime_mul`]);
//! * the map from the Edwards curve to the Montgomery \\(u\\)-line, and
//!   the Montgomery ladder ([`montgomery::MontgomeryPoint`]).
//!
//! The `precomputed-tables` feature (on by default) embeds the
//! basepoint table.  Without it, fixed-base multiplication falls back
//! to the constant-time variable-base routine.

//------------------------------------------------------------------------
// External dependencies:
//------------------------------------------------------------------------

// Used for traits related to constant-time code.
extern crate subtle;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// curve25519-arith public modules
//------------------------------------------------------------------------

// Scalars and clamping for Ed25519 and X25519
pub mod scalar;

// Point operations on the Montgomery form of Curve25519
pub mod montgomery;

// Point operations on the Edwards form of Curve25519
pub mod edwards;

// Useful constants, like the Ed25519 basepoint
pub mod constants;

// External (and internal) traits.
pub mod traits;

//------------------------------------------------------------------------
// curve25519-arith internal modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// Arithmetic backends live here
pub(crate) mod backend;

// Generic code for window lookups
pub(crate) mod window;

pub use crate::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    montgomery::MontgomeryPoint,
    scalar::Scalar,
};
