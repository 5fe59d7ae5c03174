// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Selection: selection bookkeeping for canvas editors.
//!
//! This crate tracks *which* keys are selected. It does not know how those
//! keys are drawn. Every mutation reports a [`SelectionDelta`] with the keys
//! that entered and left the selection, so a presentation layer can touch
//! exactly those elements and nothing else.
//!
//! [`Selection`] tracks:
//! - The set of selected keys, in first-selected order.
//! - An optional **primary** key (typically the most recently interacted-with item).
//! - An optional **anchor** key (the pivot for range extension).
//! - A **revision** counter that bumps when the selection changes.
//!
//! Membership is hashed, so computing a delta costs `O(|old| + |new|)`
//! regardless of how many items exist elsewhere.
//!
//! ## Minimal example
//!
//! ```rust
//! use easel_selection::Selection;
//!
//! let mut selection = Selection::<&str>::new();
//!
//! let delta = selection.replace_with(["a", "b"]);
//! assert_eq!(delta.added, ["a", "b"]);
//! assert!(delta.removed.is_empty());
//!
//! // Only the symmetric difference is reported.
//! let delta = selection.replace_with(["b", "c"]);
//! assert_eq!(delta.added, ["c"]);
//! assert_eq!(delta.removed, ["a"]);
//!
//! // Re-applying the same set is a no-op.
//! let revision = selection.revision();
//! assert!(selection.replace_with(["b", "c"]).is_empty());
//! assert_eq!(selection.revision(), revision);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashSet;

/// Keys that entered and left a [`Selection`] in one mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionDelta<T> {
    /// Newly selected keys, in selection order.
    pub added: Vec<T>,
    /// Keys that are no longer selected, in their previous order.
    pub removed: Vec<T>,
}

impl<T> Default for SelectionDelta<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> SelectionDelta<T> {
    /// Returns `true` if membership did not change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Number of keys whose membership changed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }
}

/// A selection of keys plus primary/anchor and a revision.
#[derive(Clone, Debug)]
pub struct Selection<T>
where
    T: Hash + Eq + Clone,
{
    items: Vec<T>,
    members: HashSet<T>,
    primary: Option<usize>,
    anchor: Option<usize>,
    revision: u64,
}

impl<T> Default for Selection<T>
where
    T: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Selection<T>
where
    T: Hash + Eq + Clone,
{
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            members: HashSet::new(),
            primary: None,
            anchor: None,
            revision: 0,
        }
    }

    /// Returns `true` if the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns all selected keys in selection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns an iterator over the selected keys.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the primary key, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&T> {
        self.primary.map(|idx| &self.items[idx])
    }

    /// Returns the anchor key, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<&T> {
        self.anchor.map(|idx| &self.items[idx])
    }

    /// Returns the current revision counter.
    ///
    /// Bumped only when contents, primary, or anchor actually change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if `key` is selected. Constant time.
    #[must_use]
    pub fn contains(&self, key: &T) -> bool {
        self.members.contains(key)
    }

    /// Removes every key and clears primary/anchor.
    pub fn clear(&mut self) -> SelectionDelta<T> {
        if self.items.is_empty() && self.primary.is_none() && self.anchor.is_none() {
            return SelectionDelta::default();
        }

        self.members.clear();
        self.primary = None;
        self.anchor = None;
        self.bump_revision();
        SelectionDelta {
            added: Vec::new(),
            removed: core::mem::take(&mut self.items),
        }
    }

    /// Replaces the selection with a single key, setting both primary and anchor.
    pub fn select_only(&mut self, key: T) -> SelectionDelta<T> {
        self.replace_with([key])
    }

    /// Replaces the selection with `keys`.
    ///
    /// - Duplicates in the input are ignored; first occurrence wins.
    /// - If the previous anchor is still present, it stays the anchor.
    ///   Otherwise the first key becomes the anchor.
    /// - The primary is the first key.
    ///
    /// Runs in `O(|old| + |new|)`.
    pub fn replace_with<I>(&mut self, keys: I) -> SelectionDelta<T>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = keys.into_iter();
        let (lower, _) = iter.size_hint();
        let mut new_items: Vec<T> = Vec::with_capacity(lower);
        let mut new_members: HashSet<T> = HashSet::with_capacity(lower);
        for key in iter {
            if new_members.insert(key.clone()) {
                new_items.push(key);
            }
        }

        let new_primary = if new_items.is_empty() { None } else { Some(0) };
        let mut new_anchor = None;
        if let Some(old_anchor) = self.anchor() {
            new_anchor = new_items.iter().position(|k| k == old_anchor);
        }
        if new_anchor.is_none() {
            new_anchor = new_primary;
        }

        if new_items == self.items && self.primary == new_primary && self.anchor == new_anchor {
            return SelectionDelta::default();
        }

        let delta = SelectionDelta {
            added: new_items
                .iter()
                .filter(|k| !self.members.contains(*k))
                .cloned()
                .collect(),
            removed: self
                .items
                .iter()
                .filter(|k| !new_members.contains(*k))
                .cloned()
                .collect(),
        };

        self.items = new_items;
        self.members = new_members;
        self.primary = new_primary;
        self.anchor = new_anchor;
        self.bump_revision();
        delta
    }

    /// Extends the selection with `keys`.
    ///
    /// Existing keys stay. The primary moves to the last newly added key; the
    /// anchor is left unchanged.
    pub fn extend_with<I>(&mut self, keys: I) -> SelectionDelta<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut delta = SelectionDelta::default();
        for key in keys {
            if self.members.insert(key.clone()) {
                self.items.push(key.clone());
                delta.added.push(key);
            }
        }

        if !delta.added.is_empty() {
            self.primary = Some(self.items.len() - 1);
            self.bump_revision();
        }
        delta
    }

    /// Adds `key` if absent and makes it the primary.
    pub fn add(&mut self, key: T) -> SelectionDelta<T> {
        if let Some(idx) = self.position_of(&key) {
            if self.primary != Some(idx) {
                self.primary = Some(idx);
                self.bump_revision();
            }
            return SelectionDelta::default();
        }
        self.push_primary(key.clone());
        SelectionDelta {
            added: Vec::from([key]),
            removed: Vec::new(),
        }
    }

    /// Removes `key` if present. Primary or anchor roles held by it are cleared.
    pub fn remove(&mut self, key: &T) -> SelectionDelta<T> {
        let Some(idx) = self.position_of(key) else {
            return SelectionDelta::default();
        };
        let removed = self.remove_at(idx);
        self.bump_revision();
        SelectionDelta {
            added: Vec::new(),
            removed: Vec::from([removed]),
        }
    }

    /// Toggles `key`: adds it as primary when absent, removes it when present.
    pub fn toggle(&mut self, key: T) -> SelectionDelta<T> {
        if self.contains(&key) {
            self.remove(&key)
        } else {
            self.add(key)
        }
    }

    /// Sets the primary key to `key` if it is already selected.
    pub fn set_primary(&mut self, key: &T) {
        if let Some(idx) = self.position_of(key)
            && self.primary != Some(idx)
        {
            self.primary = Some(idx);
            self.bump_revision();
        }
    }

    /// Sets the anchor key to `key` if it is already selected.
    pub fn set_anchor(&mut self, key: &T) {
        if let Some(idx) = self.position_of(key)
            && self.anchor != Some(idx)
        {
            self.anchor = Some(idx);
            self.bump_revision();
        }
    }

    /// Clears the anchor while leaving the selection and primary untouched.
    pub fn clear_anchor(&mut self) {
        if self.anchor.is_some() {
            self.anchor = None;
            self.bump_revision();
        }
    }

    fn position_of(&self, key: &T) -> Option<usize> {
        if !self.members.contains(key) {
            return None;
        }
        self.items.iter().position(|k| k == key)
    }

    fn push_primary(&mut self, key: T) {
        self.members.insert(key.clone());
        self.items.push(key);
        self.primary = Some(self.items.len() - 1);
        self.bump_revision();
    }

    /// Removes the item at `idx`, shifting primary and anchor.
    fn remove_at(&mut self, idx: usize) -> T {
        let removed = self.items.remove(idx);
        self.members.remove(&removed);

        let update_index = |slot: &mut Option<usize>| {
            if let Some(current) = *slot {
                if current == idx {
                    *slot = None;
                } else if current > idx {
                    *slot = Some(current - 1);
                }
            }
        };

        update_index(&mut self.primary);
        update_index(&mut self.anchor);

        if self.items.is_empty() {
            self.primary = None;
            self.anchor = None;
        }
        removed
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
