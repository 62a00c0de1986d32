// SPDX-License-Identifier: MPL-2.0
//! Viewer state owned by the controller.

/// Whether the viewer is showing, and what.
///
/// `current_index` is always a valid index of the controller's image set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewerState {
    #[default]
    Closed,
    Open { current_index: usize, zoomed: bool },
}

impl ViewerState {
    /// Freshly opened at `index`, not zoomed.
    #[must_use]
    pub fn opened_at(index: usize) -> Self {
        ViewerState::Open {
            current_index: index,
            zoomed: false,
        }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, ViewerState::Open { .. })
    }

    #[must_use]
    pub fn current_index(self) -> Option<usize> {
        match self {
            ViewerState::Open { current_index, .. } => Some(current_index),
            ViewerState::Closed => None,
        }
    }

    #[must_use]
    pub fn is_zoomed(self) -> bool {
        matches!(self, ViewerState::Open { zoomed: true, .. })
    }
}
