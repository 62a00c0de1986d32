// SPDX-License-Identifier: MPL-2.0
//! Input router: maps pointer and keyboard input to controller messages.

use super::message::Message;
use crate::domain::Step;
use crate::surface::{EventContext, EventTarget};

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Parses a DOM key name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

/// Clickable parts of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Backdrop,
    Image,
    Close,
    Previous,
    Next,
}

impl Control {
    /// Whether the click must not reach the backdrop.
    #[must_use]
    pub fn stops_propagation(self) -> bool {
        !matches!(self, Control::Backdrop)
    }
}

#[must_use]
pub fn route_key(key: Key) -> Option<Message> {
    match key {
        Key::Escape => Some(Message::Close),
        Key::ArrowRight => Some(Message::Navigate(Step::Next)),
        Key::ArrowLeft => Some(Message::Navigate(Step::Previous)),
        Key::Other => None,
    }
}

/// Routes a click delivered to `control`'s listener.
///
/// The backdrop only reacts to clicks on itself, not on its descendants.
pub fn route_click(control: Control, ctx: &mut EventContext<'_>) -> Option<Message> {
    if control.stops_propagation() {
        ctx.stop_propagation();
    }
    match control {
        Control::Backdrop => {
            let on_self = matches!(
                ctx.current_target(),
                EventTarget::Element(el) if ctx.target() == Some(el)
            );
            on_self.then_some(Message::Close)
        }
        Control::Image => Some(Message::ToggleZoom),
        Control::Close => Some(Message::Close),
        Control::Previous => Some(Message::Navigate(Step::Previous)),
        Control::Next => Some(Message::Navigate(Step::Next)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ElementId, Event, EventTarget};

    #[test]
    fn key_names_parse() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_name("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_name("Enter"), Key::Other);
    }

    #[test]
    fn keys_route_to_close_and_navigation() {
        assert_eq!(route_key(Key::Escape), Some(Message::Close));
        assert_eq!(route_key(Key::ArrowRight), Some(Message::Navigate(Step::Next)));
        assert_eq!(route_key(Key::ArrowLeft), Some(Message::Navigate(Step::Previous)));
        assert_eq!(route_key(Key::Other), None);
    }

    #[test]
    fn backdrop_ignores_descendant_clicks() {
        let overlay = ElementId::from_raw(1);
        let image = ElementId::from_raw(2);

        let event = Event::click(image);
        let mut ctx = EventContext::new(&event, EventTarget::Element(overlay));
        assert_eq!(route_click(Control::Backdrop, &mut ctx), None);

        let event = Event::click(overlay);
        let mut ctx = EventContext::new(&event, EventTarget::Element(overlay));
        assert_eq!(route_click(Control::Backdrop, &mut ctx), Some(Message::Close));
        assert!(!ctx.is_propagation_stopped());
    }

    #[test]
    fn controls_stop_propagation() {
        let button = ElementId::from_raw(3);
        let event = Event::click(button);
        for (control, expected) in [
            (Control::Image, Message::ToggleZoom),
            (Control::Close, Message::Close),
            (Control::Previous, Message::Navigate(Step::Previous)),
            (Control::Next, Message::Navigate(Step::Next)),
        ] {
            let mut ctx = EventContext::new(&event, EventTarget::Element(button));
            assert_eq!(route_click(control, &mut ctx), Some(expected));
            assert!(ctx.is_propagation_stopped());
        }
    }
}
