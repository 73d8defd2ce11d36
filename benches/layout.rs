// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use ramify::layout::{layout_outline, route_connectors, LayoutOptions};
use ramify::render::TextMeasure;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `layout.cards`, `layout.connectors`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `small`, `medium_wide`, `deep_narrow`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn benches_layout(c: &mut Criterion) {
    let cases = [
        fixtures::outline::Case::Small,
        fixtures::outline::Case::MediumWide,
        fixtures::outline::Case::DeepNarrow,
        fixtures::outline::Case::LargeLongTitles,
    ];

    let measure = TextMeasure::default();
    let options = LayoutOptions::default();

    let mut group = c.benchmark_group("layout.cards");
    for case in cases {
        let document = fixtures::outline::document(case);
        let outline = document.outline();
        group.throughput(Throughput::Elements(outline.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let layout = layout_outline(black_box(outline), &measure, &options);
                black_box(fixtures::checksum_layout(&layout))
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("layout.connectors");
    for case in cases {
        let document = fixtures::outline::document(case);
        let outline = document.outline();
        let layout = layout_outline(outline, &measure, &options);
        group.throughput(Throughput::Elements(outline.len() as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let sets = route_connectors(black_box(outline), &layout, &options);
                black_box(sets.len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
