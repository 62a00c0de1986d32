// SPDX-License-Identifier: MPL-2.0
//! Page scroll lock.
//!
//! Locking pins the body at the current offset so the page cannot scroll
//! behind the overlay; unlocking releases it and scrolls back. Locks do not
//! nest: a second lock keeps the first record, so re-opening while open
//! never captures the pinned offset.

use crate::surface::{StyleProperty, Surface};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollLock {
    record: Option<f64>,
}

impl ScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&mut self, surface: &dyn Surface) {
        if self.record.is_some() {
            return;
        }
        let y = surface.scroll_y();
        let body = surface.body();
        surface.set_style(body, StyleProperty::Position, "fixed");
        surface.set_style(body, StyleProperty::Top, &format!("-{y}px"));
        surface.set_style(body, StyleProperty::Width, "100%");
        self.record = Some(y);
    }

    /// Clears the body pinning; scrolls back only if a lock was held.
    pub fn unlock(&mut self, surface: &dyn Surface) {
        let body = surface.body();
        surface.set_style(body, StyleProperty::Position, "");
        surface.set_style(body, StyleProperty::Top, "");
        surface.set_style(body, StyleProperty::Width, "");
        if let Some(y) = self.record.take() {
            surface.scroll_to(y);
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.record.is_some()
    }

    /// Offset captured by the current lock.
    #[must_use]
    pub fn record(&self) -> Option<f64> {
        self.record
    }
}
