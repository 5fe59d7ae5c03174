// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named counters, gauges, and histograms.
//!
//! Names are free-form strings. The renderer's instrument names live in
//! [`names`] so hosts and tests don't repeat string literals.

use std::collections::BTreeMap;

use serde::Serialize;

/// Instrument names recorded by the renderer.
pub mod names {
    /// Elements written during full renders and flushes.
    pub const NODES_DRAWN_TOTAL: &str = "nodes_drawn_total";
    /// Completed full renders.
    pub const RENDERS_TOTAL: &str = "renders_total";
    /// Completed dirty flushes.
    pub const FLUSHES_TOTAL: &str = "flushes_total";
    /// Patches applied successfully.
    pub const UPDATES_TOTAL: &str = "updates_total";
    /// Patches skipped because of a recoverable fault.
    pub const UPDATE_FAILURES_TOTAL: &str = "update_failures_total";
    /// Attribute and text writes issued to the rendering target.
    pub const ATTRIBUTE_WRITES_TOTAL: &str = "attribute_writes_total";
    /// Elements whose selection state flipped.
    pub const SELECTION_CHANGES_TOTAL: &str = "selection_changes_total";
    /// Wall time of each full render, in milliseconds.
    pub const RENDER_DURATION_MS: &str = "render_duration_ms";
    /// Wall time of each dirty flush, in milliseconds.
    pub const FRAME_DURATION_MS: &str = "frame_duration_ms";
    /// Frames per second derived from the interval between flushes.
    pub const FPS: &str = "fps";
    /// Live registry entries.
    pub const REGISTRY_SIZE: &str = "registry_size";
    /// Pending dirty nodes.
    pub const DIRTY_NODES: &str = "dirty_nodes";
    /// Rough size of renderer-owned bookkeeping, in bytes.
    pub const ESTIMATED_MEMORY_BYTES: &str = "estimated_memory_bytes";
}

/// Upper bucket bounds of every [`Histogram`], in milliseconds.
///
/// A final overflow bucket catches everything above the last bound.
pub const BUCKET_BOUNDS_MS: [f64; 10] = [0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 33.0, 50.0, 100.0, 250.0];

/// Running summary of observed values.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
    buckets: [u64; BUCKET_BOUNDS_MS.len() + 1],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            buckets: [0; BUCKET_BOUNDS_MS.len() + 1],
        }
    }
}

impl Histogram {
    /// Records one value. Non-finite values are ignored.
    pub fn observe(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        let bucket = BUCKET_BOUNDS_MS
            .iter()
            .position(|&bound| value <= bound)
            .unwrap_or(BUCKET_BOUNDS_MS.len());
        self.buckets[bucket] += 1;
    }

    /// Number of observations.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of observations.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Smallest observation, or `None` when empty.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    /// Largest observation, or `None` when empty.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    /// Arithmetic mean, or `None` when empty.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Per-bucket counts matching [`BUCKET_BOUNDS_MS`] plus overflow.
    #[must_use]
    pub fn buckets(&self) -> &[u64] {
        &self.buckets
    }

    /// Upper bound of the bucket holding the `q` quantile (`0.0..=1.0`).
    ///
    /// Returns the observed maximum when the quantile lands in the overflow
    /// bucket, and `None` when empty.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "rank is clamped to 1..=count before conversion"
    )]
    pub fn quantile(&self, q: f64) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let rank = ((q.clamp(0.0, 1.0) * self.count as f64).ceil() as u64).max(1);
        let mut seen = 0;
        for (index, &n) in self.buckets.iter().enumerate() {
            seen += n;
            if seen >= rank {
                return Some(
                    BUCKET_BOUNDS_MS
                        .get(index)
                        .map_or(self.max, |&bound| bound.min(self.max)),
                );
            }
        }
        Some(self.max)
    }
}

/// Registry of named instruments.
///
/// Recording never fails and never panics.
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    counters: BTreeMap<String, u64>,
    gauges: BTreeMap<String, f64>,
    histograms: BTreeMap<String, Histogram>,
}

impl Metrics {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `by` to the counter `name`, creating it at zero.
    pub fn increment(&mut self, name: &str, by: u64) {
        if let Some(value) = self.counters.get_mut(name) {
            *value = value.saturating_add(by);
        } else {
            self.counters.insert(name.to_owned(), by);
        }
    }

    /// Current value of the counter `name`; zero when never incremented.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Sets the gauge `name`.
    pub fn set_gauge(&mut self, name: &str, value: f64) {
        if let Some(slot) = self.gauges.get_mut(name) {
            *slot = value;
        } else {
            self.gauges.insert(name.to_owned(), value);
        }
    }

    /// Current value of the gauge `name`.
    #[must_use]
    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.get(name).copied()
    }

    /// Records `value` into the histogram `name`.
    pub fn observe(&mut self, name: &str, value: f64) {
        if let Some(histogram) = self.histograms.get_mut(name) {
            histogram.observe(value);
        } else {
            let mut histogram = Histogram::default();
            histogram.observe(value);
            self.histograms.insert(name.to_owned(), histogram);
        }
    }

    /// The histogram `name`, if anything was observed.
    #[must_use]
    pub fn histogram(&self, name: &str) -> Option<&Histogram> {
        self.histograms.get(name)
    }

    /// Copies every instrument into a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            counters: self.counters.clone(),
            gauges: self.gauges.clone(),
            histograms: self
                .histograms
                .iter()
                .map(|(name, h)| (name.clone(), HistogramSummary::from(h)))
                .collect(),
        }
    }

    /// Drops every instrument.
    pub fn reset(&mut self) {
        self.counters.clear();
        self.gauges.clear();
        self.histograms.clear();
    }
}

/// Point-in-time copy of a [`Histogram`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramSummary {
    /// Number of observations.
    pub count: u64,
    /// Sum of observations.
    pub sum: f64,
    /// Smallest observation.
    pub min: Option<f64>,
    /// Largest observation.
    pub max: Option<f64>,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// Approximate 95th percentile.
    pub p95: Option<f64>,
    /// Bucket counts matching [`BUCKET_BOUNDS_MS`] plus overflow.
    pub buckets: Vec<u64>,
}

impl From<&Histogram> for HistogramSummary {
    fn from(h: &Histogram) -> Self {
        Self {
            count: h.count(),
            sum: h.sum(),
            min: h.min(),
            max: h.max(),
            mean: h.mean(),
            p95: h.quantile(0.95),
            buckets: h.buckets().to_vec(),
        }
    }
}

/// Serializable copy of a [`Metrics`] registry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    /// Counter values by name.
    pub counters: BTreeMap<String, u64>,
    /// Gauge values by name.
    pub gauges: BTreeMap<String, f64>,
    /// Histogram summaries by name.
    pub histograms: BTreeMap<String, HistogramSummary>,
}

impl MetricsSnapshot {
    /// Counter value, zero when absent.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Gauge value.
    #[must_use]
    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.get(name).copied()
    }

    /// Histogram summary.
    #[must_use]
    pub fn histogram(&self, name: &str) -> Option<&HistogramSummary> {
        self.histograms.get(name)
    }
}
