// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty set: accumulated dirty keys.

use core::hash::Hash;

use hashbrown::HashSet;

/// Accumulated dirty keys.
///
/// # Type Parameters
///
/// - `K`: The key type, typically a node identifier. Must be `Copy + Eq + Hash`.
///   If your natural key is owned, see [`intern::Interner`](crate::intern::Interner).
///
/// # Example
///
/// ```
/// use easel_dirty::DirtySet;
///
/// let mut dirty = DirtySet::<u32>::new();
/// assert!(dirty.mark(1));
/// assert!(!dirty.mark(1));
/// dirty.mark(2);
///
/// assert_eq!(dirty.len(), 2);
/// let drained: Vec<_> = dirty.drain().collect();
/// assert_eq!(drained.len(), 2);
/// assert!(dirty.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    keys: HashSet<K>,
}

impl<K> Default for DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DirtySet<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a new empty dirty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    /// Marks a key as dirty.
    ///
    /// Returns `true` if the key was newly inserted.
    pub fn mark(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Returns `true` if the key is dirty.
    #[must_use]
    pub fn is_dirty(&self, key: K) -> bool {
        self.keys.contains(&key)
    }

    /// Returns `true` if nothing is dirty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of dirty keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Iterates the dirty keys without clearing them.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.iter().copied()
    }

    /// Drains every dirty key. The set is empty afterwards.
    pub fn drain(&mut self) -> impl Iterator<Item = K> + '_ {
        self.keys.drain()
    }

    /// Clears every dirty key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn mark_and_query() {
        let mut dirty = DirtySet::<u32>::new();
        assert!(dirty.is_empty());
        assert!(!dirty.is_dirty(1));

        assert!(dirty.mark(1));
        assert!(dirty.is_dirty(1));
        assert!(!dirty.mark(1));
        assert_eq!(dirty.len(), 1);
    }

    #[test]
    fn drain_empties_the_set() {
        let mut dirty = DirtySet::<u32>::new();
        dirty.mark(1);
        dirty.mark(2);

        let mut drained: Vec<_> = dirty.drain().collect();
        drained.sort_unstable();
        assert_eq!(drained, [1, 2]);
        assert!(dirty.is_empty());
    }
}
