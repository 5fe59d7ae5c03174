// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Observe: metrics, spans, and structured fault logs.
//!
//! Three instruments, bundled in [`Observability`]:
//!
//! - [`Metrics`]: named counters, gauges, and millisecond histograms, with a
//!   serializable [`MetricsSnapshot`].
//! - [`Tracer`]: nested spans with start, end, and fields, kept in a bounded
//!   ring.
//! - [`Logger`]: structured [`LogRecord`]s for recoverable faults, also kept
//!   in a bounded ring.
//!
//! Spans and records are mirrored to [`tracing`] (targets `easel::span` and
//! `easel`) unless disabled in [`ObserveConfig`], so a host that installs a
//! subscriber sees them without polling.
//!
//! Recording never panics and never returns an error.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use easel_observe::{names, ManualClock, Observability, ObserveConfig};
//!
//! let clock = Rc::new(ManualClock::new(0.0));
//! let mut obs = Observability::new(clock.clone(), &ObserveConfig::default());
//!
//! let span = obs.tracer.start("render");
//! obs.metrics.increment(names::NODES_DRAWN_TOTAL, 3);
//! clock.advance(4.0);
//! obs.tracer.end(span);
//!
//! assert_eq!(obs.metrics.snapshot().counter(names::NODES_DRAWN_TOTAL), 3);
//! assert_eq!(obs.tracer.spans().next().unwrap().duration_ms(), 4.0);
//! ```

mod clock;
mod field;
mod logger;
mod metrics;
mod tracer;

use std::rc::Rc;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use field::{FieldValue, Fields};
pub use logger::{Level, LogRecord, Logger};
pub use metrics::{
    BUCKET_BOUNDS_MS, Histogram, HistogramSummary, Metrics, MetricsSnapshot, names,
};
pub use tracer::{FinishedSpan, SpanId, Tracer};

/// Retention and forwarding settings for [`Observability`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObserveConfig {
    /// Log records kept before the oldest is dropped.
    pub log_capacity: usize,
    /// Finished spans kept before the oldest is dropped.
    pub span_capacity: usize,
    /// Mirror spans and records to `tracing`.
    pub emit_tracing: bool,
}

impl Default for ObserveConfig {
    fn default() -> Self {
        Self {
            log_capacity: 256,
            span_capacity: 256,
            emit_tracing: true,
        }
    }
}

/// The metrics, tracer, and logger of one renderer instance.
#[derive(Debug)]
pub struct Observability {
    /// Counters, gauges, and histograms.
    pub metrics: Metrics,
    /// Spans around pipeline boundaries.
    pub tracer: Tracer,
    /// Recoverable faults.
    pub logger: Logger,
    clock: Rc<dyn Clock>,
}

impl Observability {
    /// Creates empty instruments sharing `clock`.
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>, config: &ObserveConfig) -> Self {
        let mut tracer = Tracer::new(clock.clone(), config.span_capacity);
        tracer.set_emit_tracing(config.emit_tracing);
        let mut logger = Logger::new(clock.clone(), config.log_capacity);
        logger.set_emit_tracing(config.emit_tracing);
        Self {
            metrics: Metrics::new(),
            tracer,
            logger,
            clock,
        }
    }

    /// The shared clock.
    #[must_use]
    pub fn clock(&self) -> &Rc<dyn Clock> {
        &self.clock
    }

    /// Current clock reading.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl Default for Observability {
    fn default() -> Self {
        Self::new(Rc::new(MonotonicClock::new()), &ObserveConfig::default())
    }
}
