// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured records for recoverable faults.

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::clock::Clock;
use crate::field::{DisplayFields, Fields};

/// Severity of a [`LogRecord`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Diagnostic detail.
    Debug,
    /// Notable but expected.
    Info,
    /// A recoverable fault; work was skipped.
    Warn,
    /// A fault that lost more than one unit of work.
    Error,
}

impl Level {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured log entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogRecord {
    /// Severity.
    pub level: Level,
    /// Human-readable message.
    pub message: String,
    /// Structured context, in insertion order.
    pub fields: Fields,
    /// Clock reading when the record was made.
    pub timestamp_ms: f64,
}

/// Ring buffer of [`LogRecord`]s, mirrored to `tracing`.
#[derive(Debug)]
pub struct Logger {
    clock: Rc<dyn Clock>,
    records: VecDeque<LogRecord>,
    capacity: usize,
    dropped: u64,
    emit_tracing: bool,
}

impl Logger {
    /// Creates a logger keeping at most `capacity` records.
    #[must_use]
    pub fn new(clock: Rc<dyn Clock>, capacity: usize) -> Self {
        Self {
            clock,
            records: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            dropped: 0,
            emit_tracing: true,
        }
    }

    /// Enables or disables forwarding records to `tracing`.
    pub fn set_emit_tracing(&mut self, emit: bool) {
        self.emit_tracing = emit;
    }

    /// Appends a record.
    pub fn log(&mut self, level: Level, message: impl Into<String>, fields: Fields) {
        let record = LogRecord {
            level,
            message: message.into(),
            fields,
            timestamp_ms: self.clock.now_ms(),
        };
        if self.emit_tracing {
            emit(&record);
        }
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
            self.dropped += 1;
        }
        self.records.push_back(record);
    }

    /// Shorthand for [`Level::Debug`].
    pub fn debug(&mut self, message: impl Into<String>, fields: Fields) {
        self.log(Level::Debug, message, fields);
    }

    /// Shorthand for [`Level::Info`].
    pub fn info(&mut self, message: impl Into<String>, fields: Fields) {
        self.log(Level::Info, message, fields);
    }

    /// Shorthand for [`Level::Warn`].
    pub fn warn(&mut self, message: impl Into<String>, fields: Fields) {
        self.log(Level::Warn, message, fields);
    }

    /// Shorthand for [`Level::Error`].
    pub fn error(&mut self, message: impl Into<String>, fields: Fields) {
        self.log(Level::Error, message, fields);
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl ExactSizeIterator<Item = &LogRecord> + '_ {
        self.records.iter()
    }

    /// Retained records at `level` or above.
    pub fn records_at_least(&self, level: Level) -> impl Iterator<Item = &LogRecord> + '_ {
        self.records.iter().filter(move |r| r.level >= level)
    }

    /// Records evicted because the ring was full.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Drops every retained record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

fn emit(record: &LogRecord) {
    let fields = DisplayFields(&record.fields);
    match record.level {
        Level::Debug => tracing::debug!(target: "easel", "{} {}", record.message, fields),
        Level::Info => tracing::info!(target: "easel", "{} {}", record.message, fields),
        Level::Warn => tracing::warn!(target: "easel", "{} {}", record.message, fields),
        Level::Error => tracing::error!(target: "easel", "{} {}", record.message, fields),
    }
}
