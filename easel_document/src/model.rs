// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document, artboard, and node types.

use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of a node or artboard.
///
/// Ids are unique across a whole [`Document`] and survive patches. They are
/// owned strings on the wire; hot paths intern them (see `easel_dirty::intern`).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A parent-relative rectangle, as it appears on the wire.
///
/// Absolute geometry is the sum of the origins along the ancestor chain; use
/// [`Rect::to_kurbo`] with the parent's absolute origin to get world space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge, relative to the parent.
    pub x: f64,
    /// Top edge, relative to the parent.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the origin as an offset from the parent's origin.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Converts to an absolute Kurbo rectangle given the parent's absolute origin.
    #[must_use]
    pub fn to_kurbo(&self, parent_origin: Vec2) -> kurbo::Rect {
        let x0 = parent_origin.x + self.x;
        let y0 = parent_origin.y + self.y;
        kurbo::Rect::new(x0, y0, x0 + self.width, y0 + self.height)
    }
}

/// Root container of a design.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Version of the wire schema this document was written against.
    pub schema_version: String,
    /// Document identity.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Top-level canvas regions, in paint order.
    #[serde(default)]
    pub artboards: Vec<Artboard>,
}

impl Document {
    /// Creates an empty document.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema_version: String::from(crate::SCHEMA_VERSION),
            id: id.into(),
            name: name.into(),
            artboards: Vec::new(),
        }
    }

    /// Appends an artboard and returns `self` for chaining.
    #[must_use]
    pub fn with_artboard(mut self, artboard: Artboard) -> Self {
        self.artboards.push(artboard);
        self
    }

    /// Decodes a document from its JSON wire format.
    ///
    /// Structural validation beyond what the types enforce is the job of an
    /// upstream schema validator.
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encodes the document in its JSON wire format.
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A top-level canvas region.
///
/// Artboards take part in traversal and z-order like nodes but are never
/// selectable content themselves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artboard {
    /// Artboard identity, unique within the document.
    pub id: NodeId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Position of the artboard on the canvas.
    pub frame: Rect,
    /// Nodes painted on this artboard, back to front.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Artboard {
    /// Creates an empty artboard.
    pub fn new(id: impl Into<NodeId>, frame: Rect) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            frame,
            children: Vec::new(),
        }
    }

    /// Appends a child node and returns `self` for chaining.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

fn default_visible() -> bool {
    true
}

/// The smallest addressable visual element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Globally unique, stable identity.
    pub id: NodeId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Hidden nodes stay in the tree; only their presentation changes.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Geometry relative to the parent.
    pub frame: Rect,
    /// Variant payload, tagged by `type` on the wire.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl Node {
    /// Creates a visible node with an empty name.
    pub fn new(id: impl Into<NodeId>, frame: Rect, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            visible: true,
            frame,
            kind,
        }
    }

    /// Creates an empty `frame` container.
    pub fn frame(id: impl Into<NodeId>, frame: Rect) -> Self {
        Self::new(
            id,
            frame,
            NodeKind::Frame {
                children: Vec::new(),
                fill: None,
                clips_content: false,
            },
        )
    }

    /// Creates a `text` node with the default text style.
    pub fn text(id: impl Into<NodeId>, frame: Rect, text: impl Into<String>) -> Self {
        Self::new(
            id,
            frame,
            NodeKind::Text {
                text: text.into(),
                text_style: TextStyle::default(),
            },
        )
    }

    /// Appends a child to a container node and returns `self` for chaining.
    ///
    /// Leaf variants silently drop the child; only `frame` and `component`
    /// nodes can own children.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        if let Some(children) = self.kind.children_mut() {
            children.push(child);
        }
        self
    }

    /// Sets visibility and returns `self` for chaining.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        self.kind.tag()
    }

    /// Returns the children of a container node, or an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.kind.children()
    }
}

/// Variant payload of a [`Node`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum NodeKind {
    /// Generic container.
    Frame {
        /// Child nodes, back to front.
        #[serde(default)]
        children: Vec<Node>,
        /// Optional CSS color used as background.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        /// Whether children are clipped to the frame.
        #[serde(default)]
        clips_content: bool,
    },
    /// A run of text.
    Text {
        /// Text content.
        text: String,
        /// Typography.
        #[serde(default)]
        text_style: TextStyle,
    },
    /// Vector path.
    Vector {
        /// SVG path data.
        #[serde(default)]
        path: String,
        /// Optional fill color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        /// Optional stroke color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
    },
    /// Raster image.
    Image {
        /// Image source.
        src: String,
        /// Alternate text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    /// Instance of a reusable component.
    Component {
        /// Identity of the component definition.
        component_id: String,
        /// Child nodes, back to front.
        #[serde(default)]
        children: Vec<Node>,
    },
}

impl NodeKind {
    /// Returns the variant tag.
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Frame { .. } => NodeTag::Frame,
            Self::Text { .. } => NodeTag::Text,
            Self::Vector { .. } => NodeTag::Vector,
            Self::Image { .. } => NodeTag::Image,
            Self::Component { .. } => NodeTag::Component,
        }
    }

    /// Returns the children of a container variant, or an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Frame { children, .. } | Self::Component { children, .. } => children,
            _ => &[],
        }
    }

    /// Returns the children of a container variant for mutation.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Frame { children, .. } | Self::Component { children, .. } => Some(children),
            _ => None,
        }
    }
}

/// Discriminant of [`NodeKind`], cheap to copy and compare.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeTag {
    /// [`NodeKind::Frame`].
    Frame,
    /// [`NodeKind::Text`].
    Text,
    /// [`NodeKind::Vector`].
    Vector,
    /// [`NodeKind::Image`].
    Image,
    /// [`NodeKind::Component`].
    Component,
}

impl NodeTag {
    /// Wire name of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Text => "text",
            Self::Vector => "vector",
            Self::Image => "image",
            Self::Component => "component",
        }
    }

    /// Whether nodes of this variant may own children.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Frame | Self::Component)
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal text alignment.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge.
    #[default]
    Left,
    /// Center.
    Center,
    /// Align to the right edge.
    Right,
    /// Justify.
    Justify,
}

impl TextAlign {
    /// CSS keyword for this alignment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

/// Typography of a text node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Numeric font weight.
    pub font_weight: u16,
    /// Optional CSS color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Horizontal alignment.
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 14.0,
            font_weight: 400,
            color: None,
            align: TextAlign::Left,
        }
    }
}

/// Borrowed view over either an artboard or a node.
///
/// Traversal yields artboards and nodes in one sequence; this type gives them
/// a common surface.
#[derive(Copy, Clone, Debug)]
pub enum NodeRef<'a> {
    /// An artboard (depth 0).
    Artboard(&'a Artboard),
    /// A node inside an artboard.
    Node(&'a Node),
}

impl<'a> NodeRef<'a> {
    /// Identity.
    #[must_use]
    pub fn id(self) -> &'a NodeId {
        match self {
            Self::Artboard(a) => &a.id,
            Self::Node(n) => &n.id,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'a str {
        match self {
            Self::Artboard(a) => &a.name,
            Self::Node(n) => &n.name,
        }
    }

    /// Parent-relative frame.
    #[must_use]
    pub fn frame(self) -> Rect {
        match self {
            Self::Artboard(a) => a.frame,
            Self::Node(n) => n.frame,
        }
    }

    /// Visibility; artboards are always visible.
    #[must_use]
    pub fn visible(self) -> bool {
        match self {
            Self::Artboard(_) => true,
            Self::Node(n) => n.visible,
        }
    }

    /// Children in paint order.
    #[must_use]
    pub fn children(self) -> &'a [Node] {
        match self {
            Self::Artboard(a) => &a.children,
            Self::Node(n) => n.children(),
        }
    }

    /// Variant tag, or `None` for an artboard.
    #[must_use]
    pub fn tag(self) -> Option<NodeTag> {
        match self {
            Self::Artboard(_) => None,
            Self::Node(n) => Some(n.tag()),
        }
    }

    /// Returns the node, or `None` for an artboard.
    #[must_use]
    pub fn as_node(self) -> Option<&'a Node> {
        match self {
            Self::Artboard(_) => None,
            Self::Node(n) => Some(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_to_kurbo_adds_parent_origin() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        let k = r.to_kurbo(Vec2::new(100.0, 200.0));
        assert_eq!(k, kurbo::Rect::new(110.0, 220.0, 140.0, 260.0));
    }

    #[test]
    fn leaf_nodes_drop_children() {
        let text = Node::text("t", Rect::default(), "hi").with_child(Node::frame("f", Rect::default()));
        assert!(text.children().is_empty());

        let frame = Node::frame("a", Rect::default()).with_child(Node::frame("b", Rect::default()));
        assert_eq!(frame.children().len(), 1);
    }

    #[test]
    fn tag_container_capability() {
        assert!(NodeTag::Frame.is_container());
        assert!(NodeTag::Component.is_container());
        assert!(!NodeTag::Text.is_container());
        assert!(!NodeTag::Image.is_container());
        assert!(!NodeTag::Vector.is_container());
    }
}
