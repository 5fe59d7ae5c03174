// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interning helper for owned keys.
//!
//! The dirty-tracking types are keyed by `K: Copy` so marking never clones or
//! allocates. Document ids are owned strings, so renderers intern them once
//! per full build and work with [`InternId`] afterwards.
//!
//! ## Example
//!
//! ```rust
//! use easel_dirty::{intern::Interner, AncestorPolicy, DirtyTracker, InternId};
//!
//! let mut ids = Interner::<String>::new();
//! let board: InternId = ids.intern("board".to_string());
//! let card: InternId = ids.intern("card".to_string());
//! let title: InternId = ids.intern("title".to_string());
//!
//! let mut tracker = DirtyTracker::<InternId>::new();
//! tracker.set_parent(card, board);
//! tracker.set_parent(title, card);
//!
//! // Borrowed lookups do not allocate.
//! let hit = ids.lookup("title").unwrap();
//! tracker.mark_with(hit, &AncestorPolicy);
//! assert_eq!(tracker.len(), 2);
//! assert_eq!(ids.get(card).map(String::as_str), Some("card"));
//! ```

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

use hashbrown::DefaultHashBuilder;
use hashbrown::HashMap;

/// A compact, interned identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct InternId(u32);

impl InternId {
    /// Returns this id as a `usize` index (for tables keyed by intern ids).
    #[inline]
    #[must_use]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw numeric id.
    #[inline]
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Interns owned keys into compact [`InternId`] handles.
///
/// Keys are stored once. Lookups go through a hash-bucket index (hash to a
/// short list of candidate ids), so no second copy of each key is kept.
/// Ids are dense: the `n`th distinct key gets id `n`.
#[derive(Debug, Clone)]
pub struct Interner<K> {
    keys: Vec<K>,
    buckets: HashMap<u64, Vec<InternId>>,
    build_hasher: DefaultHashBuilder,
}

impl<K> Default for Interner<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Interner<K>
where
    K: Eq + Hash,
{
    /// Creates an empty interner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            buckets: HashMap::new(),
            build_hasher: DefaultHashBuilder::default(),
        }
    }

    /// Returns the number of interned keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the interner contains no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the key for an interned id, if the id is in range.
    #[must_use]
    pub fn get(&self, id: InternId) -> Option<&K> {
        self.keys.get(id.as_usize())
    }

    /// Finds the id of an already interned key without inserting.
    #[must_use]
    pub fn lookup<Q>(&self, key: &Q) -> Option<InternId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let ids = self.buckets.get(&self.hash(key))?;
        ids.iter()
            .copied()
            .find(|id| self.keys[id.as_usize()].borrow() == key)
    }

    /// Interns `key` and returns its [`InternId`].
    ///
    /// If an equal key was already interned, this returns the existing id and
    /// drops `key`.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct keys are interned.
    pub fn intern(&mut self, key: K) -> InternId {
        let hash = self.hash(&key);
        if let Some(ids) = self.buckets.get(&hash) {
            for &id in ids {
                if self.keys[id.as_usize()] == key {
                    return id;
                }
            }
        }

        let id = InternId(
            u32::try_from(self.keys.len()).expect("too many interned keys for InternId (u32)"),
        );
        self.keys.push(key);
        self.buckets.entry(hash).or_default().push(id);
        id
    }

    /// Iterates `(id, key)` pairs in id order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "every index was range-checked when it was interned"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (InternId, &K)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, key)| (InternId(index as u32), key))
    }

    /// Clears all interned keys.
    ///
    /// Previously returned ids become meaningless.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.buckets.clear();
    }

    fn hash<Q>(&self, key: &Q) -> u64
    where
        Q: Hash + ?Sized,
    {
        self.build_hasher.hash_one(key)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::{String, ToString};

    #[test]
    fn interns_duplicates_to_same_id() {
        let mut i = Interner::<String>::new();
        let a0 = i.intern("a".to_string());
        let a1 = i.intern("a".to_string());
        let b = i.intern("b".to_string());

        assert_eq!(a0, a1);
        assert_ne!(a0, b);
        assert_eq!(i.len(), 2);
        assert_eq!(i.get(b).map(String::as_str), Some("b"));
    }

    #[test]
    fn borrowed_lookup_finds_only_interned_keys() {
        let mut i = Interner::<String>::new();
        let a = i.intern("a".to_string());

        assert_eq!(i.lookup("a"), Some(a));
        assert_eq!(i.lookup("missing"), None);
        assert_eq!(i.len(), 1);
    }

    #[test]
    fn ids_are_dense() {
        let mut i = Interner::<String>::new();
        for name in ["x", "y", "z"] {
            i.intern(name.to_string());
        }
        let ids: alloc::vec::Vec<_> = i.iter().map(|(id, _)| id.as_u32()).collect();
        assert_eq!(ids, [0, 1, 2]);

        i.clear();
        assert!(i.is_empty());
        assert_eq!(i.lookup("x"), None);
    }
}
