// ABOUTME: Criterion benchmarks for progression adjustment and challenge sampling
// ABOUTME: Measures catalog parsing, outcome application, and sampling over many users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the progression core.

#![allow(clippy::missing_docs_in_private_items, missing_docs, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use workout_coach::progression::{
    Catalog, ChallengeSampler, CompletedDifficulty, Difficulty, FailureDifficulty, User,
};

const SAMPLE_CATALOG: &str = include_str!("../data/exercises.json");

fn bench_catalog_parse(c: &mut Criterion) {
    c.bench_function("catalog_parse", |b| {
        b.iter(|| Catalog::from_json_str(black_box(SAMPLE_CATALOG)).unwrap());
    });
}

fn bench_outcome_application(c: &mut Criterion) {
    let catalog = Catalog::from_json_str(SAMPLE_CATALOG).unwrap();
    let user = User::register("bench", "Bench", 60, &catalog);
    let point = user.point("pushups").unwrap().clone();

    let mut group = c.benchmark_group("progress_point");
    let outcomes: [(&str, Difficulty); 2] = [
        ("next_point", CompletedDifficulty::VeryEasy.into()),
        ("prev_point", FailureDifficulty::VeryFar.into()),
    ];
    for (name, difficulty) in outcomes {
        group.bench_with_input(BenchmarkId::new("apply", name), &difficulty, |b, difficulty| {
            b.iter(|| point.apply(black_box(*difficulty)).unwrap());
        });
    }

    // Walk a full ladder from first stage to the ignore stage
    group.bench_function("climb_ladder", |b| {
        b.iter(|| {
            let mut current = point.clone();
            for _ in 0..200 {
                current = current.next_point(CompletedDifficulty::VeryEasy).unwrap();
            }
            current
        });
    });
    group.finish();
}

fn bench_challenge_sampling(c: &mut Criterion) {
    let catalog = Catalog::from_json_str(SAMPLE_CATALOG).unwrap();
    let sampler = ChallengeSampler::default();

    let mut group = c.benchmark_group("challenge_sampling");
    for user_count in [10_usize, 100, 1000] {
        let users: Vec<User> = (0..user_count)
            .map(|index| {
                let mut user = User::register(format!("U{index}"), "Bench", 60, &catalog);
                if index % 3 == 0 {
                    user.set_focus(["legs"]);
                }
                user
            })
            .collect();

        group.throughput(Throughput::Elements(user_count as u64));
        group.bench_with_input(BenchmarkId::new("sample", user_count), &users, |b, users| {
            let mut rng = ChallengeSampler::seeded_rng(7);
            b.iter(|| {
                for user in users {
                    black_box(sampler.sample(user, &mut rng).unwrap());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_catalog_parse,
    bench_outcome_application,
    bench_challenge_sampling
);
criterion_main!(benches);
