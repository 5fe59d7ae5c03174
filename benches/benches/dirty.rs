// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use easel_dirty::{AncestorPolicy, DirtyTracker, SelfOnlyPolicy};

/// A chain `0 <- 1 <- 2 <- ... <- depth-1`, with `0` as the root.
fn chain(depth: u32) -> DirtyTracker<u32> {
    let mut tracker = DirtyTracker::new();
    for k in 1..depth {
        tracker.set_parent(k, k - 1);
    }
    tracker
}

/// One root with `width` children.
fn fan(width: u32) -> DirtyTracker<u32> {
    let mut tracker = DirtyTracker::new();
    for k in 1..=width {
        tracker.set_parent(k, 0);
    }
    tracker
}

fn bench_dirty(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_dirty");
    group.sample_size(50);

    for depth in [8_u32, 64, 512] {
        group.bench_function(format!("ancestor_mark_leaf(depth={depth})"), |b| {
            b.iter_batched(
                || chain(depth),
                |mut tracker| {
                    tracker.mark_with(depth - 1, &AncestorPolicy);
                    black_box(tracker.len());
                },
                BatchSize::LargeInput,
            );
        });
    }

    for width in [100_u32, 10_000] {
        group.bench_function(format!("mark_every_child_and_drain(width={width})"), |b| {
            b.iter_batched(
                || fan(width),
                |mut tracker| {
                    for k in 1..=width {
                        tracker.mark_with(k, &AncestorPolicy);
                    }
                    let sum: u64 = tracker.drain().map(u64::from).sum();
                    black_box(sum);
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("self_only_mark(width={width})"), |b| {
            b.iter_batched(
                || fan(width),
                |mut tracker| {
                    tracker.mark_with(width / 2, &SelfOnlyPolicy);
                    black_box(tracker.len());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dirty);
criterion_main!(benches);
