// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hosts ship snapshots, spans, and records across a JSON boundary.

use std::rc::Rc;

use easel_observe::{Level, ManualClock, Observability, ObserveConfig, names};

fn quiet() -> ObserveConfig {
    ObserveConfig {
        emit_tracing: false,
        ..ObserveConfig::default()
    }
}

#[test]
fn metrics_snapshot_serializes_by_name() {
    let mut obs = Observability::new(Rc::new(ManualClock::default()), &quiet());
    obs.metrics.increment(names::NODES_DRAWN_TOTAL, 101);
    obs.metrics.set_gauge(names::FPS, 60.0);
    obs.metrics.observe(names::FRAME_DURATION_MS, 3.0);

    let json = serde_json::to_value(obs.metrics.snapshot()).unwrap();
    assert_eq!(json["counters"]["nodes_drawn_total"], 101);
    assert_eq!(json["gauges"]["fps"], 60.0);
    assert_eq!(json["histograms"]["frame_duration_ms"]["count"], 1);
    assert_eq!(json["histograms"]["frame_duration_ms"]["p95"], 3.0);
}

#[test]
fn spans_and_records_serialize() {
    let clock = Rc::new(ManualClock::new(100.0));
    let mut obs = Observability::new(clock.clone(), &quiet());

    let span = obs.tracer.start("flush");
    obs.tracer.record(span, "dirty", 2_usize);
    clock.advance(1.5);
    obs.tracer.end(span);
    obs.logger
        .log(Level::Warn, "unknown node", vec![("node_id", "ghost".into())]);

    let span = serde_json::to_value(obs.tracer.spans().next().unwrap()).unwrap();
    assert_eq!(span["name"], "flush");
    assert_eq!(span["end_ms"], 101.5);
    assert_eq!(span["fields"][0][1], 2);

    let record = serde_json::to_value(obs.logger.records().next().unwrap()).unwrap();
    assert_eq!(record["level"], "warn");
    assert_eq!(record["timestamp_ms"], 101.5);
    assert_eq!(record["fields"][0][0], "node_id");
}

#[test]
fn zero_capacity_keeps_nothing() {
    let config = ObserveConfig {
        log_capacity: 0,
        span_capacity: 0,
        emit_tracing: false,
    };
    let mut obs = Observability::new(Rc::new(ManualClock::default()), &config);
    let span = obs.tracer.start("render");
    obs.tracer.end(span);
    obs.logger.error("boom", Vec::new());

    assert_eq!(obs.tracer.spans().len(), 0);
    assert_eq!(obs.logger.records().len(), 0);
    assert_eq!(obs.logger.dropped(), 1);
}
