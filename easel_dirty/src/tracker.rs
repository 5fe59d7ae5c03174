// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Combined dirty tracker: links + set convenience type.

use core::hash::Hash;

use crate::links::ParentLinks;
use crate::policy::PropagationPolicy;
use crate::set::DirtySet;
use crate::trace::DirtyTrace;

/// Parent links and a dirty set bundled together.
///
/// # Example
///
/// ```
/// use easel_dirty::{AncestorPolicy, DirtyTracker};
///
/// let mut tracker = DirtyTracker::<u32>::new();
/// tracker.set_parent(1, 0);
/// tracker.set_parent(2, 1);
///
/// tracker.mark_with(2, &AncestorPolicy);
/// tracker.mark_with(2, &AncestorPolicy);
/// assert_eq!(tracker.len(), 2);
///
/// tracker.clear();
/// assert!(tracker.is_clean());
/// ```
#[derive(Debug, Clone)]
pub struct DirtyTracker<K>
where
    K: Copy + Eq + Hash,
{
    links: ParentLinks<K>,
    dirty: DirtySet<K>,
}

impl<K> Default for DirtyTracker<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DirtyTracker<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            links: ParentLinks::new(),
            dirty: DirtySet::new(),
        }
    }

    /// Returns the parent links.
    #[must_use]
    pub fn links(&self) -> &ParentLinks<K> {
        &self.links
    }

    /// Returns the dirty set.
    #[must_use]
    pub fn dirty(&self) -> &DirtySet<K> {
        &self.dirty
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Records that `child` sits directly under `parent`.
    pub fn set_parent(&mut self, child: K, parent: K) -> Option<K> {
        self.links.set_parent(child, parent)
    }

    /// Drops every link and every mark.
    pub fn reset(&mut self) {
        self.links.clear();
        self.dirty.clear();
    }

    // -------------------------------------------------------------------------
    // Marking
    // -------------------------------------------------------------------------

    /// Marks a key as dirty without propagation.
    ///
    /// Returns `true` if the key was newly marked dirty.
    pub fn mark(&mut self, key: K) -> bool {
        self.dirty.mark(key)
    }

    /// Marks a key using the given propagation policy.
    pub fn mark_with<P>(&mut self, key: K, policy: &P)
    where
        P: PropagationPolicy<K> + ?Sized,
    {
        policy.propagate(key, &self.links, &mut self.dirty);
    }

    /// Like [`mark_with`](Self::mark_with), reporting every mark to `trace`.
    pub fn mark_with_trace<P>(&mut self, key: K, policy: &P, trace: &mut dyn DirtyTrace<K>)
    where
        P: PropagationPolicy<K> + ?Sized,
    {
        policy.propagate_traced(key, &self.links, &mut self.dirty, trace);
    }

    // -------------------------------------------------------------------------
    // Queries and draining
    // -------------------------------------------------------------------------

    /// Returns `true` if `key` is dirty.
    #[must_use]
    pub fn is_dirty(&self, key: K) -> bool {
        self.dirty.is_dirty(key)
    }

    /// Returns `true` if nothing is dirty.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dirty.is_empty()
    }

    /// Number of dirty keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirty.len()
    }

    /// Drains every dirty key, leaving the links in place.
    pub fn drain(&mut self) -> impl Iterator<Item = K> + '_ {
        self.dirty.drain()
    }

    /// Clears every dirty mark, leaving the links in place.
    pub fn clear(&mut self) {
        self.dirty.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AncestorPolicy;
    use crate::trace::OneParentRecorder;
    use alloc::vec;
    use alloc::vec::Vec;

    fn nested() -> DirtyTracker<u32> {
        // root(0) > mid(1) > leaf(2) > inner(3)
        let mut tracker = DirtyTracker::new();
        tracker.set_parent(1, 0);
        tracker.set_parent(2, 1);
        tracker.set_parent(3, 2);
        tracker
    }

    #[test]
    fn marks_accumulate_across_calls() {
        let mut tracker = nested();
        tracker.mark_with(2, &AncestorPolicy);
        tracker.mark_with(1, &AncestorPolicy);
        tracker.mark(3);

        let mut keys: Vec<_> = tracker.drain().collect();
        keys.sort_unstable();
        assert_eq!(keys, [1, 2, 3]);
        assert!(tracker.is_clean());
        assert_eq!(tracker.links().len(), 3);
    }

    #[test]
    fn trace_through_tracker() {
        let mut tracker = nested();
        let mut rec = OneParentRecorder::new();
        tracker.mark_with_trace(3, &AncestorPolicy, &mut rec);
        assert_eq!(rec.explain_path(1).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn reset_forgets_structure() {
        let mut tracker = nested();
        tracker.mark(1);
        tracker.reset();
        assert!(tracker.is_clean());
        assert!(tracker.links().is_empty());
    }
}
