// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Render: an incremental renderer from design documents to element
//! trees.
//!
//! [`CanvasRenderer`] draws an [`easel_document::Document`] into a container
//! element of a [`RenderTarget`] and keeps it in sync:
//!
//! - **Full build.** [`render`](CanvasRenderer::render) walks the document in
//!   z-order and yields exactly one element per artboard and node, carrying
//!   `data-node-id`, a type-derived class such as `canvas-frame`,
//!   `aria-selected`, and an absolute-position `style` (with `display:none`
//!   for invisible nodes, which stay mounted).
//! - **Registry.** Elements are keyed by node id. A repeated build reuses
//!   elements by id and rewrites only changed attributes; elements of nodes
//!   that disappeared are removed.
//! - **Dirty flush.** [`update_nodes`](CanvasRenderer::update_nodes) applies
//!   typed patches and marks each patched node plus its ancestors below the
//!   artboard. One flush per frame, via [`FrameScheduler`], rewrites the
//!   dirty elements from an [`ElementSpec`] diff.
//! - **Selection.** [`set_selection`](CanvasRenderer::set_selection) touches
//!   only the symmetric difference and never dirties anything.
//! - **Hit testing.** [`hit_test`] returns the topmost visible node under a
//!   point, in the same z-order as the build.
//! - **Observability.** Counters, histograms, gauges, spans, and fault logs
//!   from [`easel_observe`]. No operation returns an error; faults are
//!   logged and the affected node is skipped.
//!
//! Targets: [`MemoryTarget`] everywhere, plus `DomTarget`,
//! `AnimationFrameScheduler`, and `PerformanceClock` on `wasm32`.
//!
//! ```rust
//! use easel_document::{Artboard, Document, Node, Rect};
//! use easel_observe::names;
//! use easel_render::{CanvasRenderer, ManualScheduler, MemoryTarget};
//!
//! let mut board = Artboard::new("board", Rect::new(0.0, 0.0, 1000.0, 1000.0));
//! for i in 0..100 {
//!     let x = f64::from(i) * 10.0;
//!     board = board.with_child(Node::frame(format!("f{i}"), Rect::new(x, 0.0, 10.0, 10.0)));
//! }
//! let doc = Document::new("doc", "Grid").with_artboard(board);
//!
//! let mut target = MemoryTarget::new();
//! let container = target.create_container();
//! let mut renderer = CanvasRenderer::new(target, ManualScheduler::new());
//! renderer.render(doc, container);
//!
//! let metrics = renderer.observability().metrics.snapshot();
//! assert_eq!(metrics.counter(names::NODES_DRAWN_TOTAL), 101);
//! ```

mod element;
mod error;
mod hit;
mod memory;
mod overlay;
mod registry;
mod renderer;
mod schedule;
mod target;
#[cfg(target_arch = "wasm32")]
mod web;

pub use element::{AttrOp, ElementKind, ElementSpec, ElementState, attr};
pub use error::{RenderError, TargetError};
pub use hit::{hit_test, hit_test_all};
pub use memory::{ElementHandle, MemoryTarget};
pub use registry::{Registry, RegistryEntry};
pub use renderer::{CanvasRenderer, Lifecycle, RendererConfig};
pub use schedule::{FlushSlot, FrameRequest, FrameScheduler, ManualScheduler};
pub use target::RenderTarget;
#[cfg(target_arch = "wasm32")]
pub use web::{AnimationFrameScheduler, DomTarget, PerformanceClock};
