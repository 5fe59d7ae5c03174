// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Dirty: dirty tracking for incremental tree renderers.
//!
//! A renderer that patches a live element tree needs to know which nodes to
//! revisit on the next frame. This crate models that as:
//!
//! - **Dirty sets** ([`DirtySet`]): accumulated dirty keys, drained once per
//!   flush.
//! - **Parent links** ([`ParentLinks`]): the child-to-parent edges of the tree
//!   being rendered. Roots have no parent.
//! - **Propagation policies** ([`PropagationPolicy`], [`AncestorPolicy`],
//!   [`SelfOnlyPolicy`]): how a mark spreads along the links.
//! - **Tracing** ([`trace::OneParentRecorder`]): an answer to "why is this key
//!   dirty?".
//! - **Interning** ([`intern::Interner`]): owned string ids mapped to compact
//!   `Copy` keys for the hot path.
//!
//! ## Quick Start
//!
//! ```rust
//! use easel_dirty::{AncestorPolicy, DirtyTracker};
//!
//! // 0 is a root; 0 <- 1 <- 2 <- 3
//! let mut tracker = DirtyTracker::<u32>::new();
//! tracker.set_parent(1, 0);
//! tracker.set_parent(2, 1);
//! tracker.set_parent(3, 2);
//!
//! // Marks 2 and its ancestors, stopping before the root.
//! tracker.mark_with(2, &AncestorPolicy);
//! assert!(tracker.is_dirty(2));
//! assert!(tracker.is_dirty(1));
//! assert!(!tracker.is_dirty(0));
//! // Descendants are never marked.
//! assert!(!tracker.is_dirty(3));
//!
//! let mut drained: Vec<_> = tracker.drain().collect();
//! drained.sort_unstable();
//! assert_eq!(drained, [1, 2]);
//! assert!(tracker.is_clean());
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod intern;
mod links;
mod policy;
mod set;
pub mod trace;
mod tracker;

pub use intern::InternId;
pub use links::{Ancestors, ParentLinks};
pub use policy::{AncestorPolicy, PropagationPolicy, SelfOnlyPolicy};
pub use set::DirtySet;
pub use tracker::DirtyTracker;
