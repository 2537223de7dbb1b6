// -*- mode: rust; -*-
//
// This file is part of curve25519-arith.
// Copyright (c) 2016-2019 Isis Lovecruft, Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - Isis Agora Lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Implementations of various scalar multiplication algorithms.
//!
//! Note that all of these implementations use serial code for field
//! arithmetic with the multi-model strategy described in the
//! `curve_models` module.
//!
//! Fixed-base multiplication lives with the basepoint table in the
//! `edwards` module.

pub mod variable_base;

pub mod vartime_variable_base;
