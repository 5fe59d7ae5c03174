// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lightweight spans with bounded retention.

use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;

use crate::clock::Clock;
use crate::field::{DisplayFields, FieldValue, Fields};

/// Identity of a span within one [`Tracer`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SpanId(u64);

impl SpanId {
    /// Raw numeric id.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct OpenSpan {
    id: SpanId,
    parent: Option<SpanId>,
    name: &'static str,
    start_ms: f64,
    fields: Fields,
}

/// A span that has ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinishedSpan {
    /// Span identity.
    pub id: SpanId,
    /// Enclosing span, if the span was started inside another.
    pub parent: Option<SpanId>,
    /// Span name.
    pub name: &'static str,
    /// Start time in clock milliseconds.
    pub start_ms: f64,
    /// End time in clock milliseconds.
    pub end_ms: f64,
    /// Fields recorded while the span was open.
    pub fields: Fields,
}

impl FinishedSpan {
    /// `end_ms - start_ms`.
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }

    /// Looks up a recorded field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(v))
    }
}

/// Records named spans around pipeline boundaries.
///
/// Spans nest: a span started while another is open records it as its
/// parent. Finished spans are kept in a ring of fixed capacity, oldest
/// dropped first.
#[derive(Debug)]
pub struct Tracer {
    clock: Rc<dyn Clock>,
    open: Vec<OpenSpan>,
    finished: VecDeque<FinishedSpan>,
    capacity: usize,
    next_id: u64,
    emit_tracing: bool,
}

impl Tracer {
    /// Creates a tracer keeping at most `capacity` finished spans.
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>, capacity: usize) -> Self {
        Self {
            clock,
            open: Vec::new(),
            finished: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 0,
            emit_tracing: true,
        }
    }

    /// Enables or disables forwarding finished spans to `tracing`.
    pub fn set_emit_tracing(&mut self, emit: bool) {
        self.emit_tracing = emit;
    }

    /// Opens a span and returns its id.
    pub fn start(&mut self, name: &'static str) -> SpanId {
        self.next_id += 1;
        let id = SpanId(self.next_id);
        self.open.push(OpenSpan {
            id,
            parent: self.open.last().map(|span| span.id),
            name,
            start_ms: self.clock.now_ms(),
            fields: Fields::new(),
        });
        id
    }

    /// Attaches a field to an open span. Unknown or finished ids are ignored.
    pub fn record(&mut self, id: SpanId, key: &'static str, value: impl Into<FieldValue>) {
        if let Some(span) = self.open.iter_mut().rev().find(|span| span.id == id) {
            span.fields.push((key, value.into()));
        }
    }

    /// Ends a span. Spans opened inside it and still open are ended too.
    ///
    /// Unknown or already finished ids are ignored.
    pub fn end(&mut self, id: SpanId) {
        let Some(position) = self.open.iter().rposition(|span| span.id == id) else {
            return;
        };
        let end_ms = self.clock.now_ms();
        while self.open.len() > position {
            let Some(span) = self.open.pop() else { break };
            self.finish(span, end_ms);
        }
    }

    fn finish(&mut self, span: OpenSpan, end_ms: f64) {
        let finished = FinishedSpan {
            id: span.id,
            parent: span.parent,
            name: span.name,
            start_ms: span.start_ms,
            end_ms,
            fields: span.fields,
        };
        if self.emit_tracing {
            tracing::debug!(
                target: "easel::span",
                span_name = finished.name,
                duration_ms = finished.duration_ms(),
                "{}",
                DisplayFields(&finished.fields)
            );
        }
        if self.capacity == 0 {
            return;
        }
        if self.finished.len() == self.capacity {
            self.finished.pop_front();
        }
        self.finished.push_back(finished);
    }

    /// Finished spans, oldest first.
    pub fn spans(&self) -> impl ExactSizeIterator<Item = &FinishedSpan> + '_ {
        self.finished.iter()
    }

    /// Finished spans with the given name, oldest first.
    pub fn spans_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FinishedSpan> + 'a {
        self.finished.iter().filter(move |span| span.name == name)
    }

    /// Number of spans currently open.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Drops every finished span. Open spans are kept.
    pub fn clear(&mut self) {
        self.finished.clear();
    }
}
