// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child-to-parent links.

use core::hash::Hash;

use hashbrown::HashMap;

/// Child-to-parent edges of a forest.
///
/// A key without a recorded parent is a root. In a rendered document the
/// roots are artboards.
#[derive(Clone, Debug)]
pub struct ParentLinks<K>
where
    K: Copy + Eq + Hash,
{
    parents: HashMap<K, K>,
}

impl<K> Default for ParentLinks<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> ParentLinks<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parents: HashMap::new(),
        }
    }

    /// Records that `child` sits directly under `parent`.
    ///
    /// Returns the previous parent, if any.
    pub fn set_parent(&mut self, child: K, parent: K) -> Option<K> {
        self.parents.insert(child, parent)
    }

    /// Returns the direct parent of `key`.
    #[must_use]
    pub fn parent(&self, key: K) -> Option<K> {
        self.parents.get(&key).copied()
    }

    /// Returns `true` if `key` has no parent.
    #[must_use]
    pub fn is_root(&self, key: K) -> bool {
        !self.parents.contains_key(&key)
    }

    /// Number of recorded edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns `true` if no edges are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Drops every edge.
    pub fn clear(&mut self) {
        self.parents.clear();
    }

    /// Iterates the ancestors of `key`, nearest first.
    ///
    /// The walk is bounded by the number of edges, so a malformed cyclic
    /// input terminates.
    pub fn ancestors(&self, key: K) -> Ancestors<'_, K> {
        Ancestors {
            links: self,
            current: key,
            remaining: self.parents.len(),
        }
    }
}

/// Iterator returned by [`ParentLinks::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a, K>
where
    K: Copy + Eq + Hash,
{
    links: &'a ParentLinks<K>,
    current: K,
    remaining: usize,
}

impl<K> Iterator for Ancestors<'_, K>
where
    K: Copy + Eq + Hash,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let parent = self.links.parent(self.current)?;
        self.current = parent;
        Some(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn ancestors_nearest_first() {
        let mut links = ParentLinks::<u32>::new();
        links.set_parent(1, 0);
        links.set_parent(2, 1);
        links.set_parent(3, 2);

        let chain: Vec<_> = links.ancestors(3).collect();
        assert_eq!(chain, [2, 1, 0]);
        assert!(links.is_root(0));
        assert!(!links.is_root(3));
    }

    #[test]
    fn cycles_terminate() {
        let mut links = ParentLinks::<u32>::new();
        links.set_parent(1, 2);
        links.set_parent(2, 1);
        assert_eq!(links.ancestors(1).count(), 2);
    }
}
