// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point hit testing in z-order.

use easel_document::{Document, Node, NodeRef, traverse_document};
use kurbo::{Point, Vec2};

/// Returns the topmost visible node whose absolute frame contains `point`.
///
/// Frames are half-open: a point on the right or bottom edge is outside.
/// Invisible nodes never match, but their descendants are still candidates.
/// Artboards are backgrounds and never match.
///
/// ```rust
/// use easel_document::{Artboard, Document, Node, Rect};
/// use easel_render::hit_test;
/// use kurbo::Point;
///
/// let doc = Document::new("doc", "Demo").with_artboard(
///     Artboard::new("board", Rect::new(100.0, 100.0, 400.0, 400.0))
///         .with_child(Node::frame("a", Rect::new(0.0, 0.0, 50.0, 50.0)))
///         .with_child(Node::frame("b", Rect::new(25.0, 25.0, 50.0, 50.0))),
/// );
///
/// // Both frames cover (130, 130); the later sibling is on top.
/// let hit = hit_test(&doc, Point::new(130.0, 130.0)).unwrap();
/// assert_eq!(hit.id.as_str(), "b");
/// assert!(hit_test(&doc, Point::new(10.0, 10.0)).is_none());
/// ```
#[must_use]
pub fn hit_test(document: &Document, point: Point) -> Option<&Node> {
    let mut topmost = None;
    for_each_hit(document, point, |node| topmost = Some(node));
    topmost
}

/// Every visible node containing `point`, topmost first.
#[must_use]
pub fn hit_test_all(document: &Document, point: Point) -> Vec<&Node> {
    let mut hits = Vec::new();
    for_each_hit(document, point, |node| hits.push(node));
    hits.reverse();
    hits
}

/// Walks the paint order once, bottom to top, accumulating parent origins.
fn for_each_hit<'a>(document: &'a Document, point: Point, mut on_hit: impl FnMut(&'a Node)) {
    let mut origins: Vec<Vec2> = Vec::new();
    for visit in traverse_document(document) {
        origins.truncate(visit.depth);
        let parent = origins.last().copied().unwrap_or(Vec2::ZERO);
        let rect = visit.node.frame().to_kurbo(parent);
        origins.push(rect.origin().to_vec2());
        if let NodeRef::Node(node) = visit.node
            && node.visible
            && rect.contains(point)
        {
            on_hit(node);
        }
    }
}
