// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Document: the design document model and its traversal primitives.
//!
//! A [`Document`] holds artboards; an [`Artboard`] holds [`Node`]s; container
//! nodes (`frame` and `component`) hold further nodes. Every [`Rect`] is
//! relative to its parent, so moving a container moves its subtree without
//! touching the children.
//!
//! This crate provides:
//!
//! - The data model and its JSON wire format (via `serde`).
//! - [`NodePatch`]: a tagged union of per-variant partial updates, applied with
//!   [`Node::apply_patch`].
//! - Stateless traversal primitives: [`traverse_document`], [`get_ancestors`],
//!   [`get_descendants`], [`count_nodes`], [`resolve_path`], and
//!   [`absolute_frame`].
//!
//! ## Z-order
//!
//! The traversal order **is** the paint order: artboards in array order, each
//! artboard before its children, then depth-first through children in array
//! order. Later siblings and deeper descendants paint above earlier and
//! shallower ones. Renderers and hit testers must not invent their own order.
//!
//! ## Wire format
//!
//! ```rust
//! use easel_document::{count_nodes, Document};
//!
//! let json = r#"{
//!     "schemaVersion": "1.0",
//!     "id": "doc-1",
//!     "name": "Landing page",
//!     "artboards": [{
//!         "id": "desktop",
//!         "name": "Desktop",
//!         "frame": { "x": 0, "y": 0, "width": 1440, "height": 900 },
//!         "children": [
//!             { "id": "hero", "type": "frame",
//!               "frame": { "x": 0, "y": 0, "width": 1440, "height": 400 },
//!               "children": [
//!                 { "id": "title", "type": "text", "text": "Hello",
//!                   "frame": { "x": 40, "y": 40, "width": 400, "height": 60 } }
//!               ] }
//!         ]
//!     }]
//! }"#;
//!
//! let doc = Document::from_json(json).unwrap();
//! assert_eq!(count_nodes(&doc), 3);
//! ```
//!
//! Schema validation beyond what the types enforce happens upstream.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod model;
mod patch;
mod traverse;

pub use model::{
    Artboard, Document, Node, NodeId, NodeKind, NodeRef, NodeTag, Rect, TextAlign, TextStyle,
};
pub use patch::{
    Changes, CommonPatch, ComponentPatch, FramePatch, ImagePatch, NodePatch, PatchError,
    TextPatch, VectorPatch,
};
pub use traverse::{
    NodePath, Traversal, Visit, absolute_frame, collect_ids, count_nodes, find_by_id,
    get_ancestors, get_descendants, resolve_path, resolve_path_mut, traverse_document,
};

/// Schema version written by [`Document::new`].
pub const SCHEMA_VERSION: &str = "1.0";
