// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative element descriptions and their attribute diff.
//!
//! Every node maps to an [`ElementSpec`]: the full set of attributes and the
//! text content its element should carry. The pipeline never writes
//! attributes ad hoc; it builds the next spec and applies the difference to
//! the previous one through [`RenderTarget`].

use std::collections::BTreeMap;
use std::fmt::Write as _;

use easel_document::{NodeKind, NodeRef, NodeTag};
use smallvec::SmallVec;

use crate::error::TargetError;
use crate::target::RenderTarget;

/// Attribute names written by the renderer.
pub mod attr {
    /// Node identity.
    pub const NODE_ID: &str = "data-node-id";
    /// Human-readable node name, omitted when empty.
    pub const NAME: &str = "data-name";
    /// Type-derived class, `{prefix}-{variant}`.
    pub const CLASS: &str = "class";
    /// `"true"` or `"false"`, reflecting the selection.
    pub const ARIA_SELECTED: &str = "aria-selected";
    /// Geometry, visibility, and variant styling.
    pub const STYLE: &str = "style";
    /// Component definition of a `component` node.
    pub const COMPONENT_ID: &str = "data-component-id";
    /// Image source.
    pub const SRC: &str = "src";
    /// Image alternate text.
    pub const ALT: &str = "alt";
    /// SVG path data of a `vector` node.
    pub const PATH: &str = "data-path";
    /// Fill color of a `vector` node.
    pub const FILL: &str = "data-fill";
    /// Stroke color of a `vector` node.
    pub const STROKE: &str = "data-stroke";
}

bitflags::bitflags! {
    /// Presentation state of a registered element.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementState: u8 {
        /// The node is part of the current selection.
        const SELECTED = 0b0000_0001;
        /// The node is invisible; its element is mounted with `display:none`.
        const HIDDEN   = 0b0000_0010;
    }
}

/// What kind of element a node is drawn as.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// An artboard.
    Artboard,
    /// A node of the given variant.
    Node(NodeTag),
}

impl ElementKind {
    /// Kind of element for a visited artboard or node.
    #[must_use]
    pub fn of(node: NodeRef<'_>) -> Self {
        node.tag().map_or(Self::Artboard, Self::Node)
    }

    /// Tag name passed to [`RenderTarget::create_element`].
    #[must_use]
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Artboard => "section",
            Self::Node(NodeTag::Text) => "span",
            Self::Node(NodeTag::Image) => "img",
            Self::Node(_) => "div",
        }
    }

    /// Suffix of the type-derived class.
    #[must_use]
    pub const fn class_suffix(self) -> &'static str {
        match self {
            Self::Artboard => "artboard",
            Self::Node(tag) => tag.as_str(),
        }
    }
}

/// The attributes and text an element should carry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementSpec {
    attributes: BTreeMap<&'static str, String>,
    text: Option<String>,
}

impl ElementSpec {
    /// Describes the element for `node`.
    ///
    /// `class_prefix` produces classes such as `canvas-frame`.
    #[must_use]
    pub fn build(node: NodeRef<'_>, selected: bool, class_prefix: &str) -> Self {
        let mut attributes = BTreeMap::new();
        let kind = ElementKind::of(node);
        attributes.insert(attr::NODE_ID, node.id().as_str().to_owned());
        attributes.insert(
            attr::CLASS,
            format!("{class_prefix}-{}", kind.class_suffix()),
        );
        attributes.insert(attr::ARIA_SELECTED, selected_value(selected).to_owned());
        if !node.name().is_empty() {
            attributes.insert(attr::NAME, node.name().to_owned());
        }

        let frame = node.frame();
        let mut style = format!(
            "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px",
            frame.x, frame.y, frame.width, frame.height
        );
        if !node.visible() {
            style.push_str(";display:none");
        }

        let mut text = None;
        if let Some(n) = node.as_node() {
            match &n.kind {
                NodeKind::Frame {
                    fill,
                    clips_content,
                    ..
                } => {
                    if let Some(fill) = fill {
                        let _ = write!(style, ";background:{fill}");
                    }
                    if *clips_content {
                        style.push_str(";overflow:hidden");
                    }
                }
                NodeKind::Text {
                    text: content,
                    text_style,
                } => {
                    let _ = write!(
                        style,
                        ";font-family:{};font-size:{}px;font-weight:{};text-align:{}",
                        text_style.font_family,
                        text_style.font_size,
                        text_style.font_weight,
                        text_style.align.as_str()
                    );
                    if let Some(color) = &text_style.color {
                        let _ = write!(style, ";color:{color}");
                    }
                    text = Some(content.clone());
                }
                NodeKind::Vector { path, fill, stroke } => {
                    attributes.insert(attr::PATH, path.clone());
                    if let Some(fill) = fill {
                        attributes.insert(attr::FILL, fill.clone());
                    }
                    if let Some(stroke) = stroke {
                        attributes.insert(attr::STROKE, stroke.clone());
                    }
                }
                NodeKind::Image { src, alt } => {
                    attributes.insert(attr::SRC, src.clone());
                    if let Some(alt) = alt {
                        attributes.insert(attr::ALT, alt.clone());
                    }
                }
                NodeKind::Component { component_id, .. } => {
                    attributes.insert(attr::COMPONENT_ID, component_id.clone());
                }
            }
        }
        attributes.insert(attr::STYLE, style);

        Self { attributes, text }
    }

    /// Value of one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Every attribute, sorted by name.
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.attributes.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Records the selection state without rebuilding the spec.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.attributes
            .insert(attr::ARIA_SELECTED, selected_value(selected).to_owned());
    }

    /// Approximate heap footprint of the spec.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        let attributes: usize = self
            .attributes
            .values()
            .map(|v| v.capacity() + size_of::<(&str, String)>())
            .sum();
        attributes + self.text.as_ref().map_or(0, String::capacity)
    }

    /// Operations turning an element described by `self` into one described
    /// by `next`.
    ///
    /// Unchanged attributes produce nothing; diffing a spec with itself is
    /// empty.
    #[must_use]
    pub fn diff<'a>(&self, next: &'a Self) -> SmallVec<[AttrOp<'a>; 8]> {
        let mut ops = SmallVec::new();
        for (&name, value) in &next.attributes {
            if self.attributes.get(name) != Some(value) {
                ops.push(AttrOp::Set {
                    name,
                    value: value.as_str(),
                });
            }
        }
        for &name in self.attributes.keys() {
            if !next.attributes.contains_key(name) {
                ops.push(AttrOp::Remove { name });
            }
        }
        if self.text != next.text {
            ops.push(AttrOp::SetText(next.text.as_deref()));
        }
        ops
    }
}

fn selected_value(selected: bool) -> &'static str {
    if selected { "true" } else { "false" }
}

/// One write produced by [`ElementSpec::diff`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrOp<'a> {
    /// Set an attribute.
    Set {
        /// Attribute name.
        name: &'static str,
        /// New value.
        value: &'a str,
    },
    /// Remove an attribute.
    Remove {
        /// Attribute name.
        name: &'static str,
    },
    /// Replace the text content.
    SetText(Option<&'a str>),
}

/// Applies `ops` to `element`, returning the number of writes.
pub(crate) fn apply_ops<T: RenderTarget>(
    target: &mut T,
    element: &T::Element,
    ops: &[AttrOp<'_>],
) -> Result<usize, TargetError> {
    for op in ops {
        match *op {
            AttrOp::Set { name, value } => target.set_attribute(element, name, value)?,
            AttrOp::Remove { name } => target.remove_attribute(element, name)?,
            AttrOp::SetText(text) => target.set_text(element, text)?,
        }
    }
    Ok(ops.len())
}
