// -*- mode: rust; -*-
//
// This file is part of ed25519-keys.
// Copyright (c) 2018-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Benchmark the key derivation and conversion functions.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use rand::rngs::OsRng;
use rand::RngCore;

use ed25519_keys::*;

fn bench_seed_keypair(c: &mut Criterion) {
    c.bench_function("seed_keypair", |b| {
        b.iter_batched(
            || {
                let mut seed = [0u8; SEED_LENGTH];
                OsRng.fill_bytes(&mut seed);
                seed
            },
            |seed| seed_keypair(&seed),
            BatchSize::SmallInput,
        )
    });
}

fn bench_pk_to_curve25519(c: &mut Criterion) {
    let keypair = seed_keypair(&[7u8; SEED_LENGTH]);

    c.bench_function("pk_to_curve25519", move |b| {
        b.iter(|| pk_to_curve25519(&keypair.public))
    });
}

fn bench_sk_to_curve25519(c: &mut Criterion) {
    let keypair = seed_keypair(&[7u8; SEED_LENGTH]);

    c.bench_function("sk_to_curve25519", move |b| {
        b.iter(|| sk_to_curve25519(&keypair.secret))
    });
}

fn bench_x25519_public_key(c: &mut Criterion) {
    let secret = sk_to_curve25519(&seed_keypair(&[7u8; SEED_LENGTH]).secret);

    c.bench_function("Curve25519SecretKey::public_key", move |b| {
        b.iter(|| secret.public_key())
    });
}

criterion_group! {
    name = keys_benches;
    config = Criterion::default();
    targets =
        bench_seed_keypair,
        bench_pk_to_curve25519,
        bench_sk_to_curve25519,
        bench_x25519_public_key,
}
criterion_main! {
    keys_benches,
}
