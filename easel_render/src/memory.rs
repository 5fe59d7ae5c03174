// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory element tree.

use std::collections::BTreeMap;

use crate::error::TargetError;
use crate::target::RenderTarget;

/// Generational handle to an element of a [`MemoryTarget`].
///
/// A handle consists of a slot index and a generation. Removing an element
/// frees its slot; a later element reusing the slot gets a higher generation,
/// so stale handles never alias a live element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct MemElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<ElementHandle>,
    parent: Option<ElementHandle>,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    element: Option<MemElement>,
}

/// A [`RenderTarget`] that keeps elements in plain memory.
///
/// Useful for tests and for hosts that serialize the tree themselves. Besides
/// the trait operations it offers read access in the spirit of a DOM query
/// API: [`children`](Self::children), [`attribute`](Self::attribute),
/// [`query_node_id`](Self::query_node_id), and so on.
///
/// ```rust
/// use easel_render::{MemoryTarget, RenderTarget};
///
/// let mut target = MemoryTarget::new();
/// let root = target.create_container();
/// let child = target.create_element("div").unwrap();
/// target.set_attribute(&child, "data-node-id", "a").unwrap();
/// target.append_child(&root, &child).unwrap();
///
/// assert_eq!(target.query_node_id(root, "a"), Some(child));
/// assert_eq!(target.children(root), [child]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryTarget {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    writes: u64,
}

impl MemoryTarget {
    /// Creates an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached `div` to act as a render container.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` element slots are ever allocated.
    pub fn create_container(&mut self) -> ElementHandle {
        self.alloc("div")
    }

    fn alloc(&mut self, tag: &str) -> ElementHandle {
        let element = MemElement {
            tag: tag.to_owned(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            parent: None,
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.element = Some(element);
            return ElementHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = u32::try_from(self.slots.len()).expect("too many elements");
        self.slots.push(Slot {
            generation: 1,
            element: Some(element),
        });
        ElementHandle {
            index,
            generation: 1,
        }
    }

    fn get(&self, handle: ElementHandle) -> Option<&MemElement> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.element.as_ref()
    }

    fn get_mut(&mut self, handle: ElementHandle) -> Result<&mut MemElement, TargetError> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .ok_or(TargetError::StaleElement)?;
        if slot.generation != handle.generation {
            return Err(TargetError::StaleElement);
        }
        slot.element.as_mut().ok_or(TargetError::StaleElement)
    }

    fn detach(&mut self, child: ElementHandle) -> Result<(), TargetError> {
        let Some(parent) = self.get_mut(child)?.parent.take() else {
            return Ok(());
        };
        if let Ok(parent) = self.get_mut(parent) {
            parent.children.retain(|c| *c != child);
        }
        Ok(())
    }

    /// Whether `handle` refers to a live element.
    #[must_use]
    pub fn is_live(&self, handle: ElementHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live elements, attached or not.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Attribute and text writes performed so far.
    #[must_use]
    pub fn attribute_writes(&self) -> u64 {
        self.writes
    }

    /// Tag name of a live element.
    #[must_use]
    pub fn tag(&self, handle: ElementHandle) -> Option<&str> {
        self.get(handle).map(|e| e.tag.as_str())
    }

    /// Children of a live element, in order. Empty for stale handles.
    #[must_use]
    pub fn children(&self, handle: ElementHandle) -> &[ElementHandle] {
        self.get(handle).map_or(&[], |e| &e.children)
    }

    /// Parent of a live element.
    #[must_use]
    pub fn parent(&self, handle: ElementHandle) -> Option<ElementHandle> {
        self.get(handle)?.parent
    }

    /// Value of an attribute.
    #[must_use]
    pub fn attribute(&self, handle: ElementHandle, name: &str) -> Option<&str> {
        self.get(handle)?.attributes.get(name).map(String::as_str)
    }

    /// Every attribute of an element, sorted by name.
    pub fn attributes(&self, handle: ElementHandle) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.get(handle)
            .into_iter()
            .flat_map(|e| e.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Text content of an element.
    #[must_use]
    pub fn text(&self, handle: ElementHandle) -> Option<&str> {
        self.get(handle)?.text.as_deref()
    }

    /// Every element below `root`, in document order. `root` is excluded.
    #[must_use]
    pub fn descendants(&self, root: ElementHandle) -> Vec<ElementHandle> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementHandle> = self.children(root).iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            out.push(handle);
            stack.extend(self.children(handle).iter().rev().copied());
        }
        out
    }

    /// First element below `root` whose `data-node-id` equals `id`.
    #[must_use]
    pub fn query_node_id(&self, root: ElementHandle, id: &str) -> Option<ElementHandle> {
        self.descendants(root)
            .into_iter()
            .find(|h| self.attribute(*h, "data-node-id") == Some(id))
    }

    /// Whether `handle` is `root` or sits somewhere below it.
    #[must_use]
    pub fn is_attached_to(&self, handle: ElementHandle, root: ElementHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            if h == root {
                return true;
            }
            current = self.parent(h);
        }
        false
    }
}

impl RenderTarget for MemoryTarget {
    type Element = ElementHandle;

    fn create_element(&mut self, tag: &str) -> Result<ElementHandle, TargetError> {
        Ok(self.alloc(tag))
    }

    fn set_attribute(
        &mut self,
        element: &ElementHandle,
        name: &str,
        value: &str,
    ) -> Result<(), TargetError> {
        self.get_mut(*element)?
            .attributes
            .insert(name.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove_attribute(&mut self, element: &ElementHandle, name: &str) -> Result<(), TargetError> {
        self.get_mut(*element)?.attributes.remove(name);
        self.writes += 1;
        Ok(())
    }

    fn set_text(&mut self, element: &ElementHandle, text: Option<&str>) -> Result<(), TargetError> {
        self.get_mut(*element)?.text = text.map(str::to_owned);
        self.writes += 1;
        Ok(())
    }

    fn append_child(
        &mut self,
        parent: &ElementHandle,
        child: &ElementHandle,
    ) -> Result<(), TargetError> {
        // Validate both ends before touching either.
        self.get_mut(*parent)?;
        self.detach(*child)?;
        self.get_mut(*parent)?.children.push(*child);
        self.get_mut(*child)?.parent = Some(*parent);
        Ok(())
    }

    fn clear_children(&mut self, element: &ElementHandle) -> Result<(), TargetError> {
        let children = core::mem::take(&mut self.get_mut(*element)?.children);
        for child in children {
            if let Ok(child) = self.get_mut(child) {
                child.parent = None;
            }
        }
        Ok(())
    }

    fn remove_element(&mut self, element: &ElementHandle) -> Result<(), TargetError> {
        self.detach(*element)?;
        self.clear_children(element)?;
        let slot = &mut self.slots[element.index as usize];
        slot.element = None;
        self.free.push(element.index);
        self.live -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_moves_between_parents() {
        let mut t = MemoryTarget::new();
        let a = t.create_container();
        let b = t.create_container();
        let c = t.create_element("span").unwrap();
        t.append_child(&a, &c).unwrap();
        t.append_child(&b, &c).unwrap();
        assert!(t.children(a).is_empty());
        assert_eq!(t.children(b), [c]);
        assert_eq!(t.parent(c), Some(b));
    }

    #[test]
    fn removed_handles_go_stale() {
        let mut t = MemoryTarget::new();
        let root = t.create_container();
        let child = t.create_element("div").unwrap();
        t.append_child(&root, &child).unwrap();
        t.remove_element(&child).unwrap();

        assert!(!t.is_live(child));
        assert!(t.children(root).is_empty());
        assert_eq!(
            t.set_attribute(&child, "class", "x"),
            Err(TargetError::StaleElement)
        );

        // The slot is reused under a new generation.
        let reused = t.create_element("div").unwrap();
        assert_ne!(reused, child);
        assert!(t.is_live(reused));
        assert!(!t.is_live(child));
        assert_eq!(t.live_count(), 2);
    }

    #[test]
    fn clearing_orphans_children() {
        let mut t = MemoryTarget::new();
        let root = t.create_container();
        let a = t.create_element("div").unwrap();
        let b = t.create_element("div").unwrap();
        t.append_child(&root, &a).unwrap();
        t.append_child(&a, &b).unwrap();
        assert_eq!(t.descendants(root), [a, b]);

        t.clear_children(&root).unwrap();
        assert!(t.descendants(root).is_empty());
        assert!(t.is_live(a));
        assert!(!t.is_attached_to(b, root));
        assert!(t.is_attached_to(b, a));
    }

    #[test]
    fn writes_are_counted() {
        let mut t = MemoryTarget::new();
        let e = t.create_element("span").unwrap();
        t.set_attribute(&e, "class", "x").unwrap();
        t.set_text(&e, Some("hi")).unwrap();
        t.remove_attribute(&e, "class").unwrap();
        assert_eq!(t.attribute_writes(), 3);
        assert_eq!(t.text(e), Some("hi"));
        assert_eq!(t.attribute(e, "class"), None);
    }
}
