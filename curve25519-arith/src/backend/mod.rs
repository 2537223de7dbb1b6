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

//! **INTERNALS:** Serial 64-bit field arithmetic and point operations.
//!
//! The [`serial`] backend contains a radix-\\(2\^{51}\\) implementation
//! of field arithmetic, as well as implementations of point operations
//! using the mixed-model strategy (passing between different curve
//! models depending on the operation).

pub mod serial;
