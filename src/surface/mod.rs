// SPDX-License-Identifier: MPL-2.0
//! Rendering surface consumed by the controller.
//!
//! The controller never paints anything itself. It drives a [`Surface`]:
//! a document-like tree of elements that can be queried by selector,
//! created, styled, removed, and that dispatches click / keyboard / load /
//! error events to registered listeners with bubble and stop-propagation
//! semantics.
//!
//! [`MemorySurface`] is a complete in-memory implementation used by the
//! test-suite, the benches and the replay binary.

pub mod memory;
pub mod subscription;

use std::rc::Rc;

pub use memory::MemorySurface;
pub use subscription::Subscription;

/// Opaque handle to an element of a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Handle returned by [`Surface::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Events the controller listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Load,
    Error,
}

impl EventKind {
    /// Whether the event travels from its target up to the document.
    #[must_use]
    pub fn bubbles(self) -> bool {
        matches!(self, EventKind::Click | EventKind::KeyDown)
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The document-level event stream (keyboard routing lives here).
    Document,
    Element(ElementId),
}

/// An event as produced by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// Element the event originated on; `None` for document-only events.
    pub target: Option<ElementId>,
    /// DOM key name for [`EventKind::KeyDown`] (e.g. `"Escape"`).
    pub key: Option<String>,
}

impl Event {
    #[must_use]
    pub fn click(target: ElementId) -> Self {
        Self {
            kind: EventKind::Click,
            target: Some(target),
            key: None,
        }
    }

    #[must_use]
    pub fn key_down(key: impl Into<String>) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target: None,
            key: Some(key.into()),
        }
    }

    #[must_use]
    pub fn load(target: ElementId) -> Self {
        Self {
            kind: EventKind::Load,
            target: Some(target),
            key: None,
        }
    }

    #[must_use]
    pub fn error(target: ElementId) -> Self {
        Self {
            kind: EventKind::Error,
            target: Some(target),
            key: None,
        }
    }
}

/// View of an event while it is delivered to one listener.
#[derive(Debug)]
pub struct EventContext<'a> {
    event: &'a Event,
    current_target: EventTarget,
    propagation_stopped: bool,
}

impl<'a> EventContext<'a> {
    #[must_use]
    pub fn new(event: &'a Event, current_target: EventTarget) -> Self {
        Self {
            event,
            current_target,
            propagation_stopped: false,
        }
    }

    #[must_use]
    pub fn event(&self) -> &Event {
        self.event
    }

    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        self.event.target
    }

    #[must_use]
    pub fn current_target(&self) -> EventTarget {
        self.current_target
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.event.key.as_deref()
    }

    /// Prevents delivery to listeners further up the tree.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Moves the context to the next node of the propagation path.
    pub(crate) fn retarget(&mut self, current_target: EventTarget) {
        self.current_target = current_target;
    }
}

/// Listener callback.
pub type Handler = Rc<dyn Fn(&mut EventContext<'_>)>;

/// Style properties the controller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Background,
    Cursor,
    Display,
    Opacity,
    Overflow,
    Position,
    Top,
    Transform,
    Width,
}

/// Document-like rendering surface plus page scroll accessor.
///
/// All methods take `&self`: listeners run while the surface is shared and
/// call back into it. Operations on unknown or detached elements are no-ops.
pub trait Surface {
    /// Root element that page content and the overlay are attached to.
    fn body(&self) -> ElementId;

    /// Elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId>;

    /// Lower-case tag name, `None` for unknown elements.
    fn tag_name(&self, element: ElementId) -> Option<String>;

    fn create_element(&self, tag: &str) -> ElementId;
    fn append_child(&self, parent: ElementId, child: ElementId);

    /// Removes `element` and its subtree from the page. Their ids are not
    /// reused and must not be attached again.
    fn remove_element(&self, element: ElementId);

    /// Removes every child of `element` the way [`Surface::remove_element`] does.
    fn clear_children(&self, element: ElementId);

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attribute(&self, element: ElementId, name: &str, value: &str);
    fn remove_attribute(&self, element: ElementId, name: &str);

    fn add_class(&self, element: ElementId, class: &str);
    fn remove_class(&self, element: ElementId, class: &str);

    fn set_inner_html(&self, element: ElementId, html: &str);

    /// Sets an inline style; an empty value removes it.
    fn set_style(&self, element: ElementId, property: StyleProperty, value: &str);
    fn style(&self, element: ElementId, property: StyleProperty) -> Option<String>;

    /// Forces a synchronous layout read (restarts CSS transitions).
    fn force_layout(&self, element: ElementId);

    fn add_listener(&self, target: EventTarget, kind: EventKind, handler: Handler) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);

    /// Current vertical page scroll offset.
    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, y: f64);
}
