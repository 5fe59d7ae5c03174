// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable faults.
//!
//! Nothing in the renderer returns these to the caller. Each fault is turned
//! into a structured log record and the offending unit of work is skipped.

use easel_document::{NodeId, PatchError};
use easel_observe::{Fields, Level};

use crate::renderer::Lifecycle;

/// Failure reported by a [`RenderTarget`](crate::RenderTarget).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The element handle no longer refers to a live element.
    #[error("element handle is stale")]
    StaleElement,
    /// The presentation surface rejected the operation.
    #[error("platform error: {0}")]
    Platform(String),
}

/// A fault the renderer recovered from.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// An update referenced a node id that is not in the document.
    #[error("no node with id `{id}`")]
    Lookup {
        /// The unknown id.
        id: NodeId,
    },
    /// An operation was invoked in a lifecycle state that does not allow it.
    #[error("`{operation}` ignored while {state}")]
    State {
        /// The rejected operation.
        operation: &'static str,
        /// State at the time of the call.
        state: Lifecycle,
    },
    /// A patch did not fit the node it targeted.
    #[error("patch for `{id}` rejected: {source}")]
    Patch {
        /// The patched node.
        id: NodeId,
        /// Why the patch was rejected.
        source: PatchError,
    },
    /// The presentation surface failed while handling a node.
    #[error("`{operation}` failed for `{id}`: {source}")]
    Target {
        /// The node whose element was being handled.
        id: NodeId,
        /// The target operation that failed.
        operation: &'static str,
        /// The target's error.
        source: TargetError,
    },
    /// The container or the frame scheduler failed.
    #[error("`{operation}` failed: {source}")]
    Surface {
        /// The failed operation.
        operation: &'static str,
        /// The underlying error.
        source: TargetError,
    },
    /// `update_nodes` received id and patch lists of different lengths.
    #[error("{ids} ids but {patches} patches; extra entries ignored")]
    Arity {
        /// Number of ids.
        ids: usize,
        /// Number of patches.
        patches: usize,
    },
}

impl RenderError {
    /// Log level used when the fault is reported.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::State { .. } => Level::Info,
            Self::Lookup { .. } | Self::Patch { .. } | Self::Arity { .. } => Level::Warn,
            Self::Target { .. } | Self::Surface { .. } => Level::Error,
        }
    }

    /// Structured context for the log record.
    #[must_use]
    pub fn fields(&self) -> Fields {
        match self {
            Self::Lookup { id } => vec![("kind", "lookup".into()), ("node_id", id.as_str().into())],
            Self::State { operation, state } => vec![
                ("kind", "state".into()),
                ("operation", (*operation).into()),
                ("state", state.as_str().into()),
            ],
            Self::Patch { id, source } => {
                let PatchError::VariantMismatch { expected, found } = source;
                vec![
                    ("kind", "patch".into()),
                    ("node_id", id.as_str().into()),
                    ("expected", expected.as_str().into()),
                    ("found", found.as_str().into()),
                ]
            }
            Self::Target {
                id,
                operation,
                source,
            } => vec![
                ("kind", "target".into()),
                ("node_id", id.as_str().into()),
                ("operation", (*operation).into()),
                ("error", source.to_string().into()),
            ],
            Self::Surface { operation, source } => vec![
                ("kind", "surface".into()),
                ("operation", (*operation).into()),
                ("error", source.to_string().into()),
            ],
            Self::Arity { ids, patches } => vec![
                ("kind", "arity".into()),
                ("ids", (*ids).into()),
                ("patches", (*patches).into()),
            ],
        }
    }
}
