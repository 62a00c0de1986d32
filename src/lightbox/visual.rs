// SPDX-License-Identifier: MPL-2.0
//! Pure mapping from [`ViewerState`] to the styles it implies.
//!
//! The controller's state is the single source of truth; after every
//! transition it derives a [`VisualState`] and writes it to the surface.

use super::state::ViewerState;
use crate::config::defaults::{UNZOOMED_SCALE, ZOOM_SCALE};
use crate::surface::{ElementId, StyleProperty, Surface};

pub const CURSOR_ZOOM_IN: &str = "zoom-in";
pub const CURSOR_ZOOM_OUT: &str = "zoom-out";
pub const OVERFLOW_SCROLL: &str = "auto";
pub const OVERFLOW_LOCKED: &str = "hidden";

/// Styles of the displayed image and overlay while open.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    pub image_transform: String,
    pub image_cursor: &'static str,
    pub overlay_overflow: &'static str,
}

impl VisualState {
    /// `None` while closed: a closing overlay keeps its last look until hidden.
    #[must_use]
    pub fn of(state: &ViewerState) -> Option<Self> {
        let ViewerState::Open { zoomed, .. } = *state else {
            return None;
        };
        let (scale, image_cursor, overlay_overflow) = if zoomed {
            (ZOOM_SCALE, CURSOR_ZOOM_OUT, OVERFLOW_SCROLL)
        } else {
            (UNZOOMED_SCALE, CURSOR_ZOOM_IN, OVERFLOW_LOCKED)
        };
        Some(Self {
            image_transform: format!("scale({scale})"),
            image_cursor,
            overlay_overflow,
        })
    }

    pub fn apply(&self, surface: &dyn Surface, overlay: ElementId, image: ElementId) {
        surface.set_style(image, StyleProperty::Transform, &self.image_transform);
        surface.set_style(image, StyleProperty::Cursor, self.image_cursor);
        surface.set_style(overlay, StyleProperty::Overflow, self.overlay_overflow);
    }
}
