// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use easel_selection::Selection;

fn bench_replace_with(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/replace_with");

    for len in [128_u32, 2_048, 8_192] {
        let keys: Vec<u32> = (0..len).collect();
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("from_empty", len), &keys, |b, keys| {
            b.iter_batched(
                Selection::<u32>::new,
                |mut sel| {
                    black_box(sel.replace_with(keys.iter().copied()));
                },
                BatchSize::LargeInput,
            );
        });

        // Shift the window by one: the delta is two keys regardless of size.
        group.bench_with_input(BenchmarkId::new("shift_by_one", len), &keys, |b, keys| {
            b.iter_batched(
                || {
                    let mut sel = Selection::<u32>::new();
                    let _ = sel.replace_with(keys.iter().copied());
                    sel
                },
                |mut sel| {
                    let delta = sel.replace_with(keys.iter().map(|k| k + 1));
                    black_box(delta.len());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_replace_with);
criterion_main!(benches);
