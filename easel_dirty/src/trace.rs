// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability helpers for dirty propagation.
//!
//! The dirty set only records *that* a key is dirty. When debugging an
//! over-eager flush it helps to know *why*. Policies report every mark to a
//! [`DirtyTrace`] sink; [`OneParentRecorder`] keeps one cause per key, which
//! is enough to reconstruct a path back to the key that was marked directly.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// The recorded cause of dirtiness for a key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DirtyCause<K> {
    /// The key was explicitly marked dirty.
    Root,
    /// The key was marked dirty because a descendant was.
    Because {
        /// The neighbor the mark arrived from.
        because: K,
    },
}

/// A callback sink for propagation tracing.
///
/// See [`PropagationPolicy::propagate_traced`](crate::PropagationPolicy::propagate_traced).
pub trait DirtyTrace<K> {
    /// Called for the key that was marked directly.
    ///
    /// `newly_dirty` tells whether the key was not dirty before.
    fn root(&mut self, key: K, newly_dirty: bool);

    /// Called when `key` is reached from `because` during propagation.
    fn caused_by(&mut self, key: K, because: K, newly_dirty: bool);
}

/// Discards every event.
impl<K> DirtyTrace<K> for () {
    fn root(&mut self, _key: K, _newly_dirty: bool) {}

    fn caused_by(&mut self, _key: K, _because: K, _newly_dirty: bool) {}
}

/// Records one cause per dirty key.
///
/// When a key is reached more than once, the first cause observed wins.
#[derive(Debug, Default, Clone)]
pub struct OneParentRecorder<K>
where
    K: Copy + Eq + Hash,
{
    causes: HashMap<K, DirtyCause<K>>,
}

impl<K> OneParentRecorder<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            causes: HashMap::new(),
        }
    }

    /// Clears all recorded causes.
    pub fn clear(&mut self) {
        self.causes.clear();
    }

    /// Returns the recorded cause for `key`, if any.
    #[must_use]
    pub fn cause(&self, key: K) -> Option<DirtyCause<K>> {
        self.causes.get(&key).copied()
    }

    /// Returns one path from a directly marked key to `key`.
    ///
    /// The returned vector starts at the directly marked key and ends at `key`.
    #[must_use]
    pub fn explain_path(&self, key: K) -> Option<Vec<K>> {
        let mut out = Vec::new();
        let mut seen: HashSet<K> = HashSet::new();

        let mut current = key;
        loop {
            if !seen.insert(current) {
                return None;
            }
            out.push(current);

            match self.cause(current)? {
                DirtyCause::Root => break,
                DirtyCause::Because { because } => current = because,
            }
        }

        out.reverse();
        Some(out)
    }
}

impl<K> DirtyTrace<K> for OneParentRecorder<K>
where
    K: Copy + Eq + Hash,
{
    fn root(&mut self, key: K, _newly_dirty: bool) {
        self.causes.entry(key).or_insert(DirtyCause::Root);
    }

    fn caused_by(&mut self, key: K, because: K, _newly_dirty: bool) {
        self.causes
            .entry(key)
            .or_insert(DirtyCause::Because { because });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AncestorPolicy, DirtySet, ParentLinks, PropagationPolicy};
    use alloc::vec;

    #[test]
    fn explains_ancestor_marks() {
        // 0 is a root; 0 <- 1 <- 2 <- 3
        let mut links = ParentLinks::<u32>::new();
        links.set_parent(1, 0);
        links.set_parent(2, 1);
        links.set_parent(3, 2);

        let mut dirty = DirtySet::new();
        let mut rec = OneParentRecorder::new();
        AncestorPolicy.propagate_traced(3, &links, &mut dirty, &mut rec);

        assert_eq!(rec.explain_path(1).unwrap(), vec![3, 2, 1]);
        assert_eq!(rec.cause(3), Some(DirtyCause::Root));
        assert_eq!(rec.cause(0), None);
    }

    #[test]
    fn first_cause_wins() {
        let mut links = ParentLinks::<u32>::new();
        links.set_parent(1, 0);
        links.set_parent(2, 1);
        links.set_parent(3, 1);

        let mut dirty = DirtySet::new();
        let mut rec = OneParentRecorder::new();
        AncestorPolicy.propagate_traced(2, &links, &mut dirty, &mut rec);
        AncestorPolicy.propagate_traced(3, &links, &mut dirty, &mut rec);

        assert_eq!(rec.explain_path(1).unwrap(), vec![2, 1]);
    }
}
