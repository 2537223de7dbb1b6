// -*- mode: rust; -*-
//
// This file is part of ed25519-keys.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs, rust_2018_idioms, unused_lifetimes, unused_qualifications)]

//! Ed25519 key pair derivation, and conversion of Ed25519 keys to
//! Curve25519 (X25519) keys.
//!
//! # Key pairs
//!
//! A [`Keypair`] is derived deterministically from a 32-byte seed:
//!
//! ```
//! use ed25519_keys::{seed_keypair, sk_to_pk, sk_to_seed};
//!
//! let seed = [7u8; 32];
//! let keypair = seed_keypair(&seed);
//!
//! assert_eq!(sk_to_seed(&keypair.secret), seed);
//! assert_eq!(sk_to_pk(&keypair.secret), keypair.public);
//! ```
//!
//! With the `getrandom` feature, [`keypair()`] draws the seed from the
//! operating system.  [`keypair_from_rng`] takes any CSPRNG.
//!
//! # Conversion
//!
//! An Ed25519 public key converts to the Montgomery \\(u\\)-coordinate
//! of the same point, after rejecting small-order encodings and points
//! with a torsion component.  An Ed25519 secret key converts to the
//! X25519-clamped hash of its seed.
//!
//! ```
//! use ed25519_keys::{pk_to_curve25519, seed_keypair, sk_to_curve25519};
//!
//! # fn main() -> Result<(), ed25519_keys::KeyError> {
//! let keypair = seed_keypair(&[42u8; 32]);
//!
//! let x25519_public = pk_to_curve25519(&keypair.public)?;
//! let x25519_secret = sk_to_curve25519(&keypair.secret);
//!
//! assert_eq!(x25519_secret.public_key(), x25519_public);
//! # Ok(())
//! # }
//! ```
//!
//! Buffers derived from secret material are wiped when they go out of
//! scope, on success and error paths alike.

#[cfg(any(test, feature = "std"))]
extern crate std;

pub use curve25519_arith;

mod convert;
mod errors;
mod expanded;
mod keypair;

pub use crate::convert::*;
pub use crate::errors::*;
pub use crate::keypair::*;

/// The length of a key pair seed, in bytes.
pub const SEED_LENGTH: usize = 32;

/// The length of an Ed25519 public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of an Ed25519 secret key (seed followed by public key), in bytes.
pub const SECRET_KEY_LENGTH: usize = SEED_LENGTH + PUBLIC_KEY_LENGTH;

/// The length of a Curve25519 public key, in bytes.
pub const CURVE25519_PUBLIC_KEY_LENGTH: usize = 32;

/// The length of a Curve25519 secret key, in bytes.
pub const CURVE25519_SECRET_KEY_LENGTH: usize = 32;
