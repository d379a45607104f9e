// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qlvt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Qlvt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use qlvt::index::InvertedIndex;
use qlvt::model::Catalog;
use qlvt::query::SearchSession;

mod fixtures;

use fixtures::Case;

const CASES: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

// Benchmark identity (keep stable):
// - Group names: `index.rebuild`, `search.evaluate`, `catalog.move_to`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.
fn benches_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("index.rebuild");
    for case in CASES {
        let items = fixtures::items(case);
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let index = InvertedIndex::build(black_box(&items));
                black_box(index.term_count())
            })
        });
    }
    group.finish();
}

fn catalog(case: Case) -> Catalog {
    let mut catalog = Catalog::new();
    catalog.replace_all(fixtures::items(case));
    catalog
}

fn benches_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search.evaluate");
    for case in CASES {
        let catalog = catalog(case);
        for (label, query) in [("short", "4"), ("word", "bear"), ("spanning", "t0001")] {
            group.bench_function(format!("{}_{label}", case.id()), |b| {
                b.iter_batched_ref(
                    || {
                        let mut session = SearchSession::new();
                        session.on_query_changed(query, Instant::now());
                        session
                    },
                    |session| black_box(session.evaluate(&catalog).len(&catalog)),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn benches_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog.move_to");
    for case in CASES {
        let catalog = catalog(case);
        let last = catalog.len() - 1;
        group.bench_function(case.id(), |b| {
            b.iter_batched_ref(
                || catalog.clone(),
                |catalog| {
                    catalog.move_to(black_box(last), black_box(0)).expect("move");
                    black_box(catalog.rev())
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, benches_rebuild, benches_search, benches_move);
criterion_main!(benches);
