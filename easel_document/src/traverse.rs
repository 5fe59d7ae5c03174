// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic z-order traversal and structural path helpers.
//!
//! The paint order of a document is defined by one traversal: artboards in
//! array order, each artboard before its children, then depth-first through
//! the children in array order. Later visits paint above earlier ones.
//! Everything that needs an order (hit testing, counting, rendering, and
//! read-only consumers such as discovery tools) goes through
//! [`traverse_document`].

use alloc::vec::Vec;
use core::iter::FusedIterator;

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::model::{Document, Node, NodeId, NodeRef};

/// Structural address of an artboard or node: an artboard index followed by
/// child indices.
///
/// An empty `indices` addresses the artboard itself.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct NodePath {
    /// Index into [`Document::artboards`].
    pub artboard: usize,
    /// Child indices from the artboard down to the node.
    pub indices: SmallVec<[usize; 8]>,
}

impl NodePath {
    /// Path addressing an artboard.
    #[must_use]
    pub fn artboard(artboard: usize) -> Self {
        Self {
            artboard,
            indices: SmallVec::new(),
        }
    }

    /// Path addressing a node below `artboard`.
    #[must_use]
    pub fn new(artboard: usize, indices: &[usize]) -> Self {
        Self {
            artboard,
            indices: SmallVec::from_slice(indices),
        }
    }

    /// Returns the path of the `index`th child of this path.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self {
            artboard: self.artboard,
            indices,
        }
    }

    /// Returns the parent path, or `None` for an artboard path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.indices.split_last()?;
        Some(Self::new(self.artboard, rest))
    }

    /// Depth of the addressed element; artboards are at depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Whether this path addresses an artboard.
    #[must_use]
    pub fn is_artboard(&self) -> bool {
        self.indices.is_empty()
    }
}

/// One step of a [`Traversal`].
#[derive(Clone, Debug)]
pub struct Visit<'a> {
    /// The visited artboard or node.
    pub node: NodeRef<'a>,
    /// Structural path of `node`.
    pub path: NodePath,
    /// Depth below the document root; artboards are 0.
    pub depth: usize,
    /// Index of the owning artboard.
    pub artboard_index: usize,
}

#[derive(Clone, Debug)]
struct Level<'a> {
    children: &'a [Node],
    next: usize,
}

/// Lazy z-order iterator over a document. See [`traverse_document`].
///
/// The iterator is finite and restartable: clone it before consuming, or call
/// [`traverse_document`] again.
#[derive(Clone, Debug)]
pub struct Traversal<'a> {
    document: &'a Document,
    next_artboard: usize,
    artboard: usize,
    stack: Vec<Level<'a>>,
    path: SmallVec<[usize; 8]>,
}

/// Returns the z-order traversal of `document`.
///
/// ```rust
/// use easel_document::{traverse_document, Artboard, Document, Node, Rect};
///
/// let doc = Document::new("doc", "Demo").with_artboard(
///     Artboard::new("board", Rect::new(0.0, 0.0, 800.0, 600.0))
///         .with_child(
///             Node::frame("outer", Rect::new(0.0, 0.0, 100.0, 100.0))
///                 .with_child(Node::text("label", Rect::new(4.0, 4.0, 50.0, 20.0), "Hi")),
///         )
///         .with_child(Node::frame("sibling", Rect::new(200.0, 0.0, 100.0, 100.0))),
/// );
///
/// let order: Vec<_> = traverse_document(&doc)
///     .map(|v| (v.node.id().as_str(), v.depth))
///     .collect();
/// assert_eq!(
///     order,
///     [("board", 0), ("outer", 1), ("label", 2), ("sibling", 1)]
/// );
/// ```
#[must_use]
pub fn traverse_document(document: &Document) -> Traversal<'_> {
    Traversal {
        document,
        next_artboard: 0,
        artboard: 0,
        stack: Vec::new(),
        path: SmallVec::new(),
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len();
            if let Some(level) = self.stack.last_mut() {
                let children = level.children;
                let index = level.next;
                let Some(node) = children.get(index) else {
                    self.stack.pop();
                    continue;
                };
                level.next += 1;

                self.path.truncate(depth - 1);
                self.path.push(index);
                let visit = Visit {
                    node: NodeRef::Node(node),
                    path: NodePath {
                        artboard: self.artboard,
                        indices: self.path.clone(),
                    },
                    depth,
                    artboard_index: self.artboard,
                };

                let grandchildren = node.children();
                if !grandchildren.is_empty() {
                    self.stack.push(Level {
                        children: grandchildren,
                        next: 0,
                    });
                }
                return Some(visit);
            }

            let artboard_index = self.next_artboard;
            let artboard = self.document.artboards.get(artboard_index)?;
            self.next_artboard += 1;
            self.artboard = artboard_index;
            self.path.clear();
            if !artboard.children.is_empty() {
                self.stack.push(Level {
                    children: &artboard.children,
                    next: 0,
                });
            }
            return Some(Visit {
                node: NodeRef::Artboard(artboard),
                path: NodePath::artboard(artboard_index),
                depth: 0,
                artboard_index,
            });
        }
    }
}

impl FusedIterator for Traversal<'_> {}

/// Total number of artboards and nodes in `document`.
#[must_use]
pub fn count_nodes(document: &Document) -> usize {
    traverse_document(document).count()
}

/// Resolves `path` to the artboard or node it addresses.
#[must_use]
pub fn resolve_path<'a>(document: &'a Document, path: &NodePath) -> Option<NodeRef<'a>> {
    let artboard = document.artboards.get(path.artboard)?;
    let Some((&first, rest)) = path.indices.split_first() else {
        return Some(NodeRef::Artboard(artboard));
    };
    let mut node = artboard.children.get(first)?;
    for &index in rest {
        node = node.children().get(index)?;
    }
    Some(NodeRef::Node(node))
}

/// Resolves `path` to a node for mutation.
///
/// Artboard paths resolve to `None`: artboards are not patchable content.
pub fn resolve_path_mut<'a>(document: &'a mut Document, path: &NodePath) -> Option<&'a mut Node> {
    let artboard = document.artboards.get_mut(path.artboard)?;
    let (&first, rest) = path.indices.split_first()?;
    let mut node = artboard.children.get_mut(first)?;
    for &index in rest {
        node = node.kind.children_mut()?.get_mut(index)?;
    }
    Some(node)
}

/// Finds an artboard or node by id with a full traversal.
///
/// Prefer a registry-backed path lookup on hot paths; this is the fallback.
#[must_use]
pub fn find_by_id<'a>(document: &'a Document, id: &str) -> Option<Visit<'a>> {
    traverse_document(document).find(|visit| visit.node.id().as_str() == id)
}

/// Returns the ancestors of the element at `path`, root first.
///
/// The chain starts at the owning artboard and ends at the direct parent. It
/// is empty for artboard paths and for paths that do not resolve.
#[must_use]
pub fn get_ancestors<'a>(document: &'a Document, path: &NodePath) -> Vec<NodeRef<'a>> {
    let mut out = Vec::new();
    let Some(artboard) = document.artboards.get(path.artboard) else {
        return out;
    };
    let Some((_, parents)) = path.indices.split_last() else {
        return out;
    };

    out.push(NodeRef::Artboard(artboard));
    let mut children = artboard.children.as_slice();
    for &index in parents {
        let Some(node) = children.get(index) else {
            out.clear();
            return out;
        };
        out.push(NodeRef::Node(node));
        children = node.children();
    }

    // The addressed element itself must exist too.
    if path.indices.last().is_some_and(|&last| last >= children.len()) {
        out.clear();
    }
    out
}

/// Returns every node below the element at `path`, in z-order.
///
/// The element itself is not included. Empty for paths that do not resolve.
#[must_use]
pub fn get_descendants<'a>(document: &'a Document, path: &NodePath) -> Vec<&'a Node> {
    // Preorder: the subtree is the run of deeper visits right after the root.
    let depth = path.indices.len();
    traverse_document(document)
        .skip_while(|visit| visit.path != *path)
        .skip(1)
        .take_while(|visit| visit.depth > depth)
        .filter_map(|visit| visit.node.as_node())
        .collect()
}

/// Absolute rectangle of the element at `path`.
///
/// This is the element's frame offset by the origins of its whole ancestor
/// chain, artboard included.
#[must_use]
pub fn absolute_frame(document: &Document, path: &NodePath) -> Option<kurbo::Rect> {
    let artboard = document.artboards.get(path.artboard)?;
    let mut origin = Vec2::ZERO;
    let mut frame = artboard.frame;
    let mut children = artboard.children.as_slice();
    for &index in &path.indices {
        origin += frame.offset();
        let node = children.get(index)?;
        frame = node.frame;
        children = node.children();
    }
    Some(frame.to_kurbo(origin))
}

/// Returns the ids of every artboard and node, in z-order.
#[must_use]
pub fn collect_ids(document: &Document) -> Vec<&NodeId> {
    traverse_document(document).map(|v| v.node.id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Artboard, Rect};
    use alloc::format;

    fn nested() -> Document {
        Document::new("doc", "nested").with_artboard(
            Artboard::new("root", Rect::new(100.0, 100.0, 500.0, 500.0)).with_child(
                Node::frame("mid", Rect::new(10.0, 10.0, 200.0, 200.0)).with_child(
                    Node::frame("leaf", Rect::new(5.0, 5.0, 50.0, 50.0))
                        .with_child(Node::frame("inner", Rect::new(1.0, 1.0, 10.0, 10.0))),
                ),
            ),
        )
    }

    #[test]
    fn traversal_is_restartable() {
        let doc = nested();
        let traversal = traverse_document(&doc);
        let first: Vec<_> = traversal.clone().map(|v| v.path).collect();
        let second: Vec<_> = traversal.map(|v| v.path).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert_eq!(first[3], NodePath::new(0, &[0, 0, 0]));
    }

    #[test]
    fn empty_document_yields_nothing() {
        let doc = Document::new("doc", "empty");
        assert_eq!(count_nodes(&doc), 0);
        assert!(traverse_document(&doc).next().is_none());
    }

    #[test]
    fn ancestors_and_descendants_from_path() {
        let doc = nested();
        let leaf = NodePath::new(0, &[0, 0]);

        let ancestors: Vec<_> = get_ancestors(&doc, &leaf)
            .into_iter()
            .map(|n| n.id().as_str())
            .collect();
        assert_eq!(ancestors, ["root", "mid"]);

        let descendants: Vec<_> = get_descendants(&doc, &leaf)
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(descendants, ["inner"]);

        assert!(get_ancestors(&doc, &NodePath::new(0, &[0, 7])).is_empty());
        assert!(get_descendants(&doc, &NodePath::new(3, &[])).is_empty());
        assert!(get_ancestors(&doc, &NodePath::artboard(0)).is_empty());
    }

    #[test]
    fn descendants_of_a_deep_chain() {
        let mut node = Node::frame("n999", Rect::new(0.0, 0.0, 1.0, 1.0));
        for i in (1..999).rev() {
            node = Node::frame(format!("n{i}"), Rect::new(0.0, 0.0, 1.0, 1.0)).with_child(node);
        }
        let doc = Document::new("doc", "Deep").with_artboard(
            Artboard::new("board", Rect::new(0.0, 0.0, 10.0, 10.0))
                .with_child(node)
                .with_child(Node::frame("after", Rect::new(0.0, 0.0, 1.0, 1.0))),
        );

        let below = get_descendants(&doc, &NodePath::new(0, &[0]));
        assert_eq!(below.len(), 998);
        assert_eq!(below[0].id.as_str(), "n2");
        assert_eq!(below[997].id.as_str(), "n999");
        assert_eq!(get_descendants(&doc, &NodePath::artboard(0)).len(), 1000);
    }

    #[test]
    fn absolute_frame_sums_ancestor_origins() {
        let doc = nested();
        let inner = absolute_frame(&doc, &NodePath::new(0, &[0, 0, 0])).unwrap();
        assert_eq!(inner, kurbo::Rect::new(116.0, 116.0, 126.0, 126.0));
    }

    #[test]
    fn resolve_mut_rejects_artboards() {
        let mut doc = nested();
        assert!(resolve_path_mut(&mut doc, &NodePath::artboard(0)).is_none());
        let leaf = resolve_path_mut(&mut doc, &NodePath::new(0, &[0, 0])).unwrap();
        assert_eq!(leaf.id.as_str(), "leaf");
    }

    #[test]
    fn path_parent_and_child() {
        let path = NodePath::new(1, &[2, 3]);
        assert_eq!(path.parent(), Some(NodePath::new(1, &[2])));
        assert_eq!(path.child(4), NodePath::new(1, &[2, 3, 4]));
        assert_eq!(NodePath::artboard(1).parent(), None);
    }
}
