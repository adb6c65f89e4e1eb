// -*- mode: rust; -*-
//
// This file is part of curve4q-dalek.
// Copyright (c) 2017-2021 isis lovecruft
// Copyright (c) 2019-2021 DebugSteven
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - DebugSteven <debugsteven@gmail.com>

//! Benchmark the Diffie-Hellman operations.

use criterion::{criterion_group, criterion_main, Criterion};

use curve4q_dalek::{scalar_base_mult, scalar_mult, EphemeralSecret, PublicKey};

fn bench_diffie_hellman(c: &mut Criterion) {
    let mut rng = rand::rng();
    let bob_secret = EphemeralSecret::random_from_rng(&mut rng);
    let bob_public = PublicKey::from(&bob_secret);

    c.bench_function("diffie_hellman", move |b| {
        b.iter_with_setup(
            || EphemeralSecret::random_from_rng(&mut rand::rng()),
            |alice_secret| alice_secret.diffie_hellman(&bob_public),
        )
    });
}

fn bench_pubkey_constructor(c: &mut Criterion) {
    let mut rng = rand::rng();
    let bob_secret = EphemeralSecret::random_from_rng(&mut rng);

    c.bench_function("PublicKey::from", move |b| {
        b.iter(|| PublicKey::from(&bob_secret))
    });
}

fn bench_byte_api(c: &mut Criterion) {
    use rand::RngCore;
    let mut rng = rand::rng();
    let mut sk = [0u8; 32];
    rng.fill_bytes(&mut sk);
    let pk = scalar_base_mult(&sk).unwrap();

    c.bench_function("scalar_base_mult", |b| b.iter(|| scalar_base_mult(&sk)));
    c.bench_function("scalar_mult", |b| b.iter(|| scalar_mult(&sk, &pk)));
}

criterion_group! {
    name = curve4q_benches;
    config = Criterion::default();
    targets =
        bench_diffie_hellman,
        bench_pubkey_constructor,
        bench_byte_api,
}
criterion_main! {
    curve4q_benches,
}
