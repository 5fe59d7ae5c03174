// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation policies for dirty marking.

use core::hash::Hash;

use crate::links::ParentLinks;
use crate::set::DirtySet;
use crate::trace::DirtyTrace;

/// How a dirty mark spreads along [`ParentLinks`].
///
/// Implementors only need [`propagate_traced`](Self::propagate_traced);
/// [`propagate`](Self::propagate) is the untraced shorthand.
///
/// # Example
///
/// ```
/// use easel_dirty::{AncestorPolicy, DirtySet, ParentLinks, PropagationPolicy};
///
/// let mut links = ParentLinks::<u32>::new();
/// links.set_parent(1, 0);
/// links.set_parent(2, 1);
///
/// let mut dirty = DirtySet::new();
/// AncestorPolicy.propagate(2, &links, &mut dirty);
///
/// assert!(dirty.is_dirty(2));
/// assert!(dirty.is_dirty(1));
/// assert!(!dirty.is_dirty(0));
/// ```
pub trait PropagationPolicy<K>
where
    K: Copy + Eq + Hash,
{
    /// Marks `key` and whatever else the policy implies, reporting each mark
    /// to `trace`.
    fn propagate_traced(
        &self,
        key: K,
        links: &ParentLinks<K>,
        dirty: &mut DirtySet<K>,
        trace: &mut dyn DirtyTrace<K>,
    );

    /// Marks `key` and whatever else the policy implies.
    fn propagate(&self, key: K, links: &ParentLinks<K>, dirty: &mut DirtySet<K>) {
        self.propagate_traced(key, links, dirty, &mut ());
    }
}

/// Marks the key and its ancestor chain, stopping before the root.
///
/// Children are positioned relative to their parent, so a change to a node
/// never invalidates its descendants. It can invalidate the containers above
/// it. The root (an artboard, for a rendered document) is left alone.
///
/// A key that is itself a root is still marked.
#[derive(Copy, Clone, Debug, Default)]
pub struct AncestorPolicy;

impl<K> PropagationPolicy<K> for AncestorPolicy
where
    K: Copy + Eq + Hash,
{
    fn propagate_traced(
        &self,
        key: K,
        links: &ParentLinks<K>,
        dirty: &mut DirtySet<K>,
        trace: &mut dyn DirtyTrace<K>,
    ) {
        let newly = dirty.mark(key);
        trace.root(key, newly);

        let mut child = key;
        for ancestor in links.ancestors(key) {
            if links.is_root(ancestor) {
                break;
            }
            let newly = dirty.mark(ancestor);
            trace.caused_by(ancestor, child, newly);
            child = ancestor;
        }
    }
}

/// Marks only the key itself.
#[derive(Copy, Clone, Debug, Default)]
pub struct SelfOnlyPolicy;

impl<K> PropagationPolicy<K> for SelfOnlyPolicy
where
    K: Copy + Eq + Hash,
{
    fn propagate_traced(
        &self,
        key: K,
        _links: &ParentLinks<K>,
        dirty: &mut DirtySet<K>,
        trace: &mut dyn DirtyTrace<K>,
    ) {
        let newly = dirty.mark(key);
        trace.root(key, newly);
    }
}

impl<K, P> PropagationPolicy<K> for &P
where
    K: Copy + Eq + Hash,
    P: PropagationPolicy<K> + ?Sized,
{
    fn propagate_traced(
        &self,
        key: K,
        links: &ParentLinks<K>,
        dirty: &mut DirtySet<K>,
        trace: &mut dyn DirtyTrace<K>,
    ) {
        (*self).propagate_traced(key, links, dirty, trace);
    }
}
