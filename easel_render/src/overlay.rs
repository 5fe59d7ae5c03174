// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection presentation.
//!
//! Selection is presentation state only. Changing it flips `aria-selected`
//! on the elements in the symmetric difference and nothing else: no node is
//! marked dirty and no flush is scheduled.

use easel_document::NodeId;
use easel_selection::{Selection, SelectionDelta};

use crate::element::{ElementKind, ElementState, attr};
use crate::error::TargetError;
use crate::registry::Registry;
use crate::target::RenderTarget;

/// Outcome of [`SelectionOverlay::apply`].
#[derive(Debug, Default)]
pub(crate) struct OverlayOutcome {
    /// Elements whose `aria-selected` was written.
    pub(crate) flipped: usize,
    /// Writes that failed, with the node they were meant for.
    pub(crate) failures: Vec<(NodeId, TargetError)>,
}

/// The current selection and its reflection on registered elements.
#[derive(Debug, Default)]
pub(crate) struct SelectionOverlay {
    selection: Selection<NodeId>,
}

impl SelectionOverlay {
    pub(crate) fn selection(&self) -> &Selection<NodeId> {
        &self.selection
    }

    /// Forgets the selection without touching any element.
    pub(crate) fn reset(&mut self) {
        let _ = self.selection.clear();
    }

    /// Replaces the selection with `ids`, touching only the elements in the
    /// symmetric difference.
    ///
    /// Artboards are not selectable and are left out. Ids without a
    /// registered element are kept in the selection; they have nothing to
    /// reflect on.
    pub(crate) fn apply<T: RenderTarget>(
        &mut self,
        ids: &[NodeId],
        registry: &mut Registry<T::Element>,
        target: &mut T,
    ) -> OverlayOutcome {
        let selectable = ids.iter().filter(|id| {
            registry
                .get_by_id(id.as_str())
                .is_none_or(|entry| entry.kind != ElementKind::Artboard)
        });
        let next: Vec<NodeId> = selectable.cloned().collect();
        let SelectionDelta { added, removed } = self.selection.replace_with(next);
        let mut outcome = OverlayOutcome::default();
        for (id, selected) in removed
            .into_iter()
            .map(|id| (id, false))
            .chain(added.into_iter().map(|id| (id, true)))
        {
            let Some(entry) = registry.get_by_id_mut(id.as_str()) else {
                continue;
            };
            let value = if selected { "true" } else { "false" };
            match target.set_attribute(&entry.element, attr::ARIA_SELECTED, value) {
                Ok(()) => {
                    entry.spec.set_selected(selected);
                    entry.state.set(ElementState::SELECTED, selected);
                    outcome.flipped += 1;
                }
                Err(err) => outcome.failures.push((id, err)),
            }
        }
        outcome
    }
}
