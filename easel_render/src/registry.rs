// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node-id to element map.

use easel_dirty::{InternId, intern::Interner};
use easel_document::{NodeId, NodePath};

use crate::element::{ElementKind, ElementSpec, ElementState};

/// Everything the renderer remembers about one drawn node.
#[derive(Clone, Debug)]
pub struct RegistryEntry<E> {
    /// The element drawn for the node.
    pub element: E,
    /// Structural path of the node in the current document.
    pub path: NodePath,
    /// Kind of element; an element is only reused for the same kind.
    pub kind: ElementKind,
    /// The spec last written to the element.
    pub spec: ElementSpec,
    /// Presentation state.
    pub state: ElementState,
}

/// Maps node ids to their [`RegistryEntry`].
///
/// Ids are interned to dense [`InternId`]s, which also key the dirty
/// tracker, so lookups after the first are plain indexing.
#[derive(Debug)]
pub struct Registry<E> {
    ids: Interner<NodeId>,
    entries: Vec<Option<RegistryEntry<E>>>,
    live: usize,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            ids: Interner::new(),
            entries: Vec::new(),
            live: 0,
        }
    }
}

impl<E> Registry<E> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Interned id of a registered node.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<InternId> {
        let key = self.ids.lookup(id)?;
        self.get(key).is_some().then_some(key)
    }

    /// The node id behind an interned id.
    #[must_use]
    pub fn node_id(&self, key: InternId) -> Option<&NodeId> {
        self.ids.get(key)
    }

    /// Entry for an interned id.
    #[must_use]
    pub fn get(&self, key: InternId) -> Option<&RegistryEntry<E>> {
        self.entries.get(key.as_usize())?.as_ref()
    }

    /// Mutable entry for an interned id.
    pub fn get_mut(&mut self, key: InternId) -> Option<&mut RegistryEntry<E>> {
        self.entries.get_mut(key.as_usize())?.as_mut()
    }

    /// Entry for a node id.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&RegistryEntry<E>> {
        self.get(self.ids.lookup(id)?)
    }

    /// Mutable entry for a node id.
    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut RegistryEntry<E>> {
        let key = self.ids.lookup(id)?;
        self.get_mut(key)
    }

    /// Registers `entry` under `id`, replacing any previous entry.
    pub fn insert(&mut self, id: NodeId, entry: RegistryEntry<E>) -> InternId {
        let key = match self.ids.lookup(id.as_str()) {
            Some(key) => key,
            None => self.ids.intern(id),
        };
        let index = key.as_usize();
        if self.entries.len() <= index {
            self.entries.resize_with(index + 1, || None);
        }
        if self.entries[index].replace(entry).is_none() {
            self.live += 1;
        }
        key
    }

    /// Removes and returns the entry for `id`.
    pub fn remove(&mut self, id: &str) -> Option<RegistryEntry<E>> {
        let key = self.ids.lookup(id)?;
        let entry = self.entries.get_mut(key.as_usize())?.take()?;
        self.live -= 1;
        Some(entry)
    }

    /// Removes every entry, yielding them in registration order.
    ///
    /// Interned ids are forgotten too.
    pub fn drain(&mut self) -> impl Iterator<Item = (NodeId, RegistryEntry<E>)> + '_ {
        self.live = 0;
        let ids = core::mem::take(&mut self.ids);
        let entries = core::mem::take(&mut self.entries);
        let mut names: Vec<Option<NodeId>> = Vec::with_capacity(ids.len());
        for (_, id) in ids.iter() {
            names.push(Some(id.clone()));
        }
        entries
            .into_iter()
            .zip(names)
            .filter_map(|(entry, id)| Some((id?, entry?)))
    }

    /// Registered entries with their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &RegistryEntry<E>)> + '_ {
        self.ids
            .iter()
            .filter_map(|(key, id)| Some((id, self.get(key)?)))
    }

    /// Approximate heap footprint of the registry, excluding the elements'
    /// own storage on the target.
    #[must_use]
    pub fn estimated_bytes(&self) -> usize {
        let slots = self.entries.capacity() * size_of::<Option<RegistryEntry<E>>>();
        let per_entry: usize = self
            .iter()
            .map(|(id, entry)| {
                id.as_str().len()
                    + size_of::<NodeId>()
                    + entry.spec.heap_bytes()
                    + if entry.path.indices.spilled() {
                        entry.path.indices.capacity() * size_of::<usize>()
                    } else {
                        0
                    }
            })
            .sum();
        slots + per_entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(element: u32) -> RegistryEntry<u32> {
        RegistryEntry {
            element,
            path: NodePath::artboard(0),
            kind: ElementKind::Artboard,
            spec: ElementSpec::default(),
            state: ElementState::empty(),
        }
    }

    #[test]
    fn insert_lookup_remove() {
        let mut registry = Registry::new();
        let a = registry.insert("a".into(), entry(1));
        let b = registry.insert("b".into(), entry(2));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("a"), Some(a));
        assert_eq!(registry.get_by_id("b").map(|e| e.element), Some(2));

        // Re-inserting keeps the interned id.
        assert_eq!(registry.insert("a".into(), entry(3)), a);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.remove("a").map(|e| e.element), Some(3));
        assert_eq!(registry.lookup("a"), None);
        assert!(registry.remove("a").is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.node_id(b).map(NodeId::as_str), Some("b"));
    }

    #[test]
    fn drain_skips_removed_and_empties() {
        let mut registry = Registry::new();
        registry.insert("a".into(), entry(1));
        registry.insert("b".into(), entry(2));
        registry.insert("c".into(), entry(3));
        registry.remove("b");

        let drained: Vec<_> = registry
            .drain()
            .map(|(id, e)| (id.as_str().to_owned(), e.element))
            .collect();
        assert_eq!(drained, [("a".to_owned(), 1), ("c".to_owned(), 3)]);
        assert!(registry.is_empty());
        assert_eq!(registry.lookup("a"), None);
        assert_eq!(registry.iter().count(), 0);
    }
}
