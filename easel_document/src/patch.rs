// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed node patches.
//!
//! A [`NodePatch`] is a tagged union with one patch shape per node variant.
//! Every field is optional; absent fields leave the node untouched. Applying
//! a patch whose variant does not match the node is rejected up front, so a
//! `text` patch can never half-apply to an `image` node.
//!
//! ```rust
//! use easel_document::{Changes, CommonPatch, FramePatch, Node, NodePatch, Rect};
//!
//! let mut node = Node::frame("card", Rect::new(0.0, 0.0, 100.0, 50.0));
//! let patch = NodePatch::Frame(FramePatch {
//!     common: CommonPatch {
//!         frame: Some(Rect::new(10.0, 0.0, 100.0, 50.0)),
//!         ..CommonPatch::default()
//!     },
//!     fill: Some("#ff0000".into()),
//!     ..FramePatch::default()
//! });
//!
//! let changes = node.apply_patch(patch).unwrap();
//! assert!(changes.contains(Changes::GEOMETRY | Changes::STYLE));
//! assert_eq!(node.frame.x, 10.0);
//! ```

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::model::{Node, NodeKind, NodeTag, Rect, TextStyle};

bitflags::bitflags! {
    /// What a successfully applied patch actually changed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Changes: u8 {
        /// The name changed.
        const NAME       = 0b0000_0001;
        /// Visibility flipped.
        const VISIBILITY = 0b0000_0010;
        /// The parent-relative frame changed.
        const GEOMETRY   = 0b0000_0100;
        /// Text, path, image source, or component reference changed.
        const CONTENT    = 0b0000_1000;
        /// Fill, stroke, clipping, or typography changed.
        const STYLE      = 0b0001_0000;
    }
}

/// Failure to apply a [`NodePatch`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PatchError {
    /// The patch targets a different variant than the node has.
    #[error("patch for a {found} node cannot be applied to a {expected} node")]
    VariantMismatch {
        /// Variant of the node being patched.
        expected: NodeTag,
        /// Variant the patch was written for.
        found: NodeTag,
    },
}

/// Fields shared by every node variant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonPatch {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// New parent-relative frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Rect>,
}

/// Patch for [`NodeKind::Frame`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FramePatch {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonPatch,
    /// New fill; an empty string removes the fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// New clipping behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clips_content: Option<bool>,
}

/// Patch for [`NodeKind::Text`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextPatch {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonPatch,
    /// New text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Replacement typography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

/// Patch for [`NodeKind::Vector`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorPatch {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonPatch,
    /// New path data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// New fill; an empty string removes the fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// New stroke; an empty string removes the stroke.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

/// Patch for [`NodeKind::Image`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagePatch {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonPatch,
    /// New source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// New alternate text; an empty string removes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Patch for [`NodeKind::Component`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentPatch {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonPatch,
    /// New component definition reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

/// A partial update for one node, tagged by the variant it targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodePatch {
    /// Patch a frame.
    Frame(FramePatch),
    /// Patch a text node.
    Text(TextPatch),
    /// Patch a vector.
    Vector(VectorPatch),
    /// Patch an image.
    Image(ImagePatch),
    /// Patch a component instance.
    Component(ComponentPatch),
}

impl NodePatch {
    /// Returns the variant this patch targets.
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Frame(_) => NodeTag::Frame,
            Self::Text(_) => NodeTag::Text,
            Self::Vector(_) => NodeTag::Vector,
            Self::Image(_) => NodeTag::Image,
            Self::Component(_) => NodeTag::Component,
        }
    }

    /// Returns the shared fields.
    #[must_use]
    pub fn common(&self) -> &CommonPatch {
        match self {
            Self::Frame(p) => &p.common,
            Self::Text(p) => &p.common,
            Self::Vector(p) => &p.common,
            Self::Image(p) => &p.common,
            Self::Component(p) => &p.common,
        }
    }

    /// Builds a patch for `tag` that only touches the shared fields.
    #[must_use]
    pub fn common_only(tag: NodeTag, common: CommonPatch) -> Self {
        match tag {
            NodeTag::Frame => Self::Frame(FramePatch {
                common,
                ..FramePatch::default()
            }),
            NodeTag::Text => Self::Text(TextPatch {
                common,
                ..TextPatch::default()
            }),
            NodeTag::Vector => Self::Vector(VectorPatch {
                common,
                ..VectorPatch::default()
            }),
            NodeTag::Image => Self::Image(ImagePatch {
                common,
                ..ImagePatch::default()
            }),
            NodeTag::Component => Self::Component(ComponentPatch {
                common,
                ..ComponentPatch::default()
            }),
        }
    }
}

impl From<FramePatch> for NodePatch {
    fn from(patch: FramePatch) -> Self {
        Self::Frame(patch)
    }
}

impl From<TextPatch> for NodePatch {
    fn from(patch: TextPatch) -> Self {
        Self::Text(patch)
    }
}

impl From<VectorPatch> for NodePatch {
    fn from(patch: VectorPatch) -> Self {
        Self::Vector(patch)
    }
}

impl From<ImagePatch> for NodePatch {
    fn from(patch: ImagePatch) -> Self {
        Self::Image(patch)
    }
}

impl From<ComponentPatch> for NodePatch {
    fn from(patch: ComponentPatch) -> Self {
        Self::Component(patch)
    }
}

/// Assigns `value` to `slot` and records `flag` when it differs.
fn assign<T: PartialEq>(slot: &mut T, value: Option<T>, flag: Changes, changes: &mut Changes) {
    if let Some(value) = value
        && *slot != value
    {
        *slot = value;
        *changes |= flag;
    }
}

/// Like [`assign`] for optional attributes, where an empty string clears.
fn assign_optional(
    slot: &mut Option<String>,
    value: Option<String>,
    flag: Changes,
    changes: &mut Changes,
) {
    let Some(value) = value else { return };
    let value = if value.is_empty() { None } else { Some(value) };
    if *slot != value {
        *slot = value;
        *changes |= flag;
    }
}

impl Node {
    /// Applies `patch` in place and reports what changed.
    ///
    /// The node is left untouched when the patch targets another variant.
    /// Applying the same field twice is last-writer-wins.
    pub fn apply_patch(&mut self, patch: NodePatch) -> Result<Changes, PatchError> {
        let expected = self.tag();
        let found = patch.tag();
        if expected != found {
            return Err(PatchError::VariantMismatch { expected, found });
        }

        let mut changes = Changes::empty();
        let common = match (&mut self.kind, patch) {
            (
                NodeKind::Frame {
                    fill,
                    clips_content,
                    ..
                },
                NodePatch::Frame(p),
            ) => {
                assign_optional(fill, p.fill, Changes::STYLE, &mut changes);
                assign(clips_content, p.clips_content, Changes::STYLE, &mut changes);
                p.common
            }
            (NodeKind::Text { text, text_style }, NodePatch::Text(p)) => {
                assign(text, p.text, Changes::CONTENT, &mut changes);
                assign(text_style, p.text_style, Changes::STYLE, &mut changes);
                p.common
            }
            (NodeKind::Vector { path, fill, stroke }, NodePatch::Vector(p)) => {
                assign(path, p.path, Changes::CONTENT, &mut changes);
                assign_optional(fill, p.fill, Changes::STYLE, &mut changes);
                assign_optional(stroke, p.stroke, Changes::STYLE, &mut changes);
                p.common
            }
            (NodeKind::Image { src, alt }, NodePatch::Image(p)) => {
                assign(src, p.src, Changes::CONTENT, &mut changes);
                assign_optional(alt, p.alt, Changes::CONTENT, &mut changes);
                p.common
            }
            (NodeKind::Component { component_id, .. }, NodePatch::Component(p)) => {
                assign(component_id, p.component_id, Changes::CONTENT, &mut changes);
                p.common
            }
            (_, patch) => {
                return Err(PatchError::VariantMismatch {
                    expected,
                    found: patch.tag(),
                });
            }
        };

        assign(&mut self.name, common.name, Changes::NAME, &mut changes);
        assign(&mut self.visible, common.visible, Changes::VISIBILITY, &mut changes);
        assign(&mut self.frame, common.frame, Changes::GEOMETRY, &mut changes);
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn hide() -> CommonPatch {
        CommonPatch {
            visible: Some(false),
            ..CommonPatch::default()
        }
    }

    #[test]
    fn mismatched_variant_is_rejected_without_mutation() {
        let mut node = Node::text("t", Rect::default(), "hello");
        let before = node.clone();

        let err = node
            .apply_patch(NodePatch::common_only(NodeTag::Image, hide()))
            .unwrap_err();

        assert_eq!(
            err,
            PatchError::VariantMismatch {
                expected: NodeTag::Text,
                found: NodeTag::Image,
            }
        );
        assert_eq!(node, before);
    }

    #[test]
    fn reports_only_real_changes() {
        let mut node = Node::frame("f", Rect::new(0.0, 0.0, 10.0, 10.0));

        let same = NodePatch::common_only(
            NodeTag::Frame,
            CommonPatch {
                frame: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
                visible: Some(true),
                ..CommonPatch::default()
            },
        );
        assert_eq!(node.apply_patch(same).unwrap(), Changes::empty());

        let hidden = node
            .apply_patch(NodePatch::common_only(NodeTag::Frame, hide()))
            .unwrap();
        assert_eq!(hidden, Changes::VISIBILITY);
        assert!(!node.visible);
    }

    #[test]
    fn empty_string_clears_optional_attributes() {
        let mut node = Node::frame("f", Rect::default());
        node.apply_patch(
            FramePatch {
                fill: Some("red".into()),
                ..FramePatch::default()
            }
            .into(),
        )
        .unwrap();
        assert!(matches!(&node.kind, NodeKind::Frame { fill: Some(f), .. } if f == "red"));

        let changes = node
            .apply_patch(
                FramePatch {
                    fill: Some(String::new()),
                    ..FramePatch::default()
                }
                .into(),
            )
            .unwrap();
        assert_eq!(changes, Changes::STYLE);
        assert!(matches!(&node.kind, NodeKind::Frame { fill: None, .. }));
    }

    #[test]
    fn last_writer_wins() {
        let mut node = Node::text("t", Rect::default(), "a");
        for text in ["b", "c"] {
            node.apply_patch(
                TextPatch {
                    text: Some(text.into()),
                    ..TextPatch::default()
                }
                .into(),
            )
            .unwrap();
        }
        assert!(matches!(&node.kind, NodeKind::Text { text, .. } if text == "c"));
    }
}
