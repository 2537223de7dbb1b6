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

//! Serial implementations of field and point arithmetic.
//!
//! The crate uses the mixed-model strategy for implementing point
//! operations and scalar multiplication; see the [`curve_models`] and
//! [`scalar_mul`] documentation for more information.

pub mod u64;

pub mod curve_models;

pub mod scalar_mul;
