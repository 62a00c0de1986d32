// SPDX-License-Identifier: MPL-2.0
//! Owned listener registration.

use std::fmt;
use std::rc::Rc;

use super::{EventKind, EventTarget, Handler, ListenerId, Surface};

/// A listener attached to a [`Surface`], detached on [`release`](Self::release) or drop.
///
/// Each controller owns its own subscriptions, so several controllers can
/// share one document event stream without removing each other's handlers.
pub struct Subscription {
    surface: Rc<dyn Surface>,
    id: Option<ListenerId>,
}

impl Subscription {
    /// Attaches `handler` and returns the owning handle.
    #[must_use]
    pub fn listen(
        surface: &Rc<dyn Surface>,
        target: EventTarget,
        kind: EventKind,
        handler: Handler,
    ) -> Self {
        let id = surface.add_listener(target, kind, handler);
        Self {
            surface: Rc::clone(surface),
            id: Some(id),
        }
    }

    /// Detaches the listener. Calling it again does nothing.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.surface.remove_listener(id);
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
