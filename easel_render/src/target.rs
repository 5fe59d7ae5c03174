// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation-surface seam.

use core::fmt::Debug;

use crate::error::TargetError;

/// A tree of attributed elements the renderer draws into.
///
/// The renderer only ever creates elements, writes attributes and text, and
/// moves elements between parents. Anything with that shape can stand in for
/// the browser DOM: [`MemoryTarget`](crate::MemoryTarget) for tests and
/// headless hosts, or `DomTarget` on `wasm32`.
///
/// Implementations report failures as [`TargetError`]; the renderer logs
/// them and skips the affected node.
pub trait RenderTarget {
    /// Handle to one element. Cloning must not copy the element itself.
    type Element: Clone + Debug;

    /// Creates a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> Result<Self::Element, TargetError>;

    /// Sets or overwrites an attribute.
    fn set_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), TargetError>;

    /// Removes an attribute. Removing an absent attribute is not an error.
    fn remove_attribute(&mut self, element: &Self::Element, name: &str)
    -> Result<(), TargetError>;

    /// Replaces the text content of an element; `None` clears it.
    fn set_text(&mut self, element: &Self::Element, text: Option<&str>)
    -> Result<(), TargetError>;

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    fn append_child(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), TargetError>;

    /// Detaches every child element of `element`. Its text is kept.
    fn clear_children(&mut self, element: &Self::Element) -> Result<(), TargetError>;

    /// Detaches `element` from its parent and releases it.
    fn remove_element(&mut self, element: &Self::Element) -> Result<(), TargetError>;
}
