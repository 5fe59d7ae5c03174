// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use easel_document::{Artboard, CommonPatch, Document, Node, NodeId, NodePatch, NodeTag, Rect};
use easel_observe::ObserveConfig;
use easel_render::{
    CanvasRenderer, ElementHandle, ManualScheduler, MemoryTarget, RendererConfig, hit_test,
};
use kurbo::Point;

type Renderer = CanvasRenderer<MemoryTarget, ManualScheduler>;

/// `boards` artboards, each with `groups` frames of `leaves` children.
fn document(boards: u32, groups: u32, leaves: u32) -> Document {
    let mut doc = Document::new("bench", "Bench");
    for a in 0..boards {
        let mut board = Artboard::new(
            format!("board{a}"),
            Rect::new(f64::from(a) * 2000.0, 0.0, 1920.0, 1080.0),
        );
        for g in 0..groups {
            let mut group = Node::frame(
                format!("g{a}-{g}"),
                Rect::new(0.0, f64::from(g) * 20.0, 1920.0, 20.0),
            );
            for l in 0..leaves {
                group = group.with_child(Node::text(
                    format!("t{a}-{g}-{l}"),
                    Rect::new(f64::from(l) * 30.0, 0.0, 30.0, 20.0),
                    "cell",
                ));
            }
            board = board.with_child(group);
        }
        doc = doc.with_artboard(board);
    }
    doc
}

fn renderer() -> (Renderer, ElementHandle) {
    let mut target = MemoryTarget::new();
    let container = target.create_container();
    let config = RendererConfig {
        observe: ObserveConfig {
            emit_tracing: false,
            ..ObserveConfig::default()
        },
        ..RendererConfig::default()
    };
    (
        CanvasRenderer::with_config(target, ManualScheduler::new(), config),
        container,
    )
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("easel_render");
    group.sample_size(20);

    for &(boards, groups, leaves) in &[(1_u32, 10_u32, 10_u32), (4, 50, 20)] {
        let doc = document(boards, groups, leaves);
        let label = format!("b={boards},g={groups},l={leaves}");

        group.bench_function(format!("full_build({label})"), |b| {
            b.iter_batched(
                || (renderer(), doc.clone()),
                |((mut r, container), doc)| {
                    r.render(doc, container);
                    black_box(r.dirty_node_count());
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("rebuild_reusing_elements({label})"), |b| {
            b.iter_batched(
                || {
                    let (mut r, container) = renderer();
                    r.render(doc.clone(), container);
                    (r, container, doc.clone())
                },
                |(mut r, container, doc)| {
                    r.render(doc, container);
                    black_box(r.registry().len());
                },
                BatchSize::LargeInput,
            );
        });

        let target_id = NodeId::from(format!("t0-{}-{}", groups / 2, leaves / 2));
        group.bench_function(format!("update_one_and_flush({label})"), |b| {
            b.iter_batched(
                || {
                    let (mut r, container) = renderer();
                    r.render(doc.clone(), container);
                    r
                },
                |mut r| {
                    let patch = NodePatch::common_only(
                        NodeTag::Text,
                        CommonPatch {
                            visible: Some(false),
                            ..CommonPatch::default()
                        },
                    );
                    r.update_nodes(core::slice::from_ref(&target_id), vec![patch]);
                    r.flush_now();
                    black_box(r.dirty_node_count());
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("hit_test_miss({label})"), |b| {
            let point = Point::new(-1.0, -1.0);
            b.iter(|| black_box(hit_test(black_box(&doc), point)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
