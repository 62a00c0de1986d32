// SPDX-License-Identifier: MPL-2.0
//! The persistent full-screen surface and the content rebuilt on every open.
//!
//! The overlay element is created once and reused. Its children (spinner,
//! image, controls) are torn down and rebuilt by [`Overlay::rebuild`]; the
//! listeners attached to them are owned here and released with them.

use super::icons;
use crate::domain::ImageRef;
use crate::surface::{ElementId, StyleProperty, Subscription, Surface};

pub const OVERLAY_CLASS: &str = "lightbox-overlay";
pub const SPINNER_CLASS: &str = "lightbox-spinner";
pub const IMAGE_CLASS: &str = "lightbox-image";
pub const CLOSE_CLASS: &str = "lightbox-close";
pub const PREVIOUS_CLASS: &str = "lightbox-prev";
pub const NEXT_CLASS: &str = "lightbox-next";
/// Toggled on the image to restart its entrance transition.
pub const ACTIVE_CLASS: &str = "active";

const DISPLAY_SHOWN: &str = "flex";
const DISPLAY_HIDDEN: &str = "none";

/// Which optional controls to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub close: bool,
    pub navigation: bool,
}

/// Accessible labels for the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub close: String,
    pub previous: String,
    pub next: String,
}

/// Elements of one open cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Content {
    pub spinner: ElementId,
    pub image: ElementId,
    pub close: Option<ElementId>,
    pub previous: Option<ElementId>,
    pub next: Option<ElementId>,
}

#[derive(Debug)]
pub struct Overlay {
    element: ElementId,
    content: Option<Content>,
    backdrop: Option<Subscription>,
    content_listeners: Vec<Subscription>,
}

impl Overlay {
    /// Creates the hidden overlay and attaches it to the page.
    pub fn create(surface: &dyn Surface) -> Self {
        let element = surface.create_element("div");
        surface.add_class(element, OVERLAY_CLASS);
        surface.set_style(element, StyleProperty::Display, DISPLAY_HIDDEN);
        surface.set_style(element, StyleProperty::Opacity, "0");
        surface.append_child(surface.body(), element);
        Self {
            element,
            content: None,
            backdrop: None,
            content_listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn set_backdrop_listener(&mut self, subscription: Subscription) {
        self.backdrop = Some(subscription);
    }

    /// Replaces the listeners bound to the current content.
    pub fn set_content_listeners(&mut self, listeners: Vec<Subscription>) {
        self.content_listeners = listeners;
    }

    /// Tears down the previous content and builds spinner, image and controls.
    pub fn rebuild(
        &mut self,
        surface: &dyn Surface,
        image: &ImageRef,
        background: &str,
        controls: Controls,
        labels: &Labels,
    ) -> Content {
        self.content_listeners.clear();
        surface.clear_children(self.element);
        surface.set_style(self.element, StyleProperty::Background, background);

        let spinner = self.append(surface, "div", SPINNER_CLASS);
        let img = self.append(surface, "img", IMAGE_CLASS);
        surface.set_attribute(img, "src", &image.src);

        let close = controls
            .close
            .then(|| self.append_button(surface, CLOSE_CLASS, icons::CLOSE, &labels.close));
        let (previous, next) = if controls.navigation {
            (
                Some(self.append_button(surface, PREVIOUS_CLASS, icons::PREVIOUS, &labels.previous)),
                Some(self.append_button(surface, NEXT_CLASS, icons::NEXT, &labels.next)),
            )
        } else {
            (None, None)
        };

        let content = Content {
            spinner,
            image: img,
            close,
            previous,
            next,
        };
        self.content = Some(content);
        content
    }

    /// Puts the overlay back into the layout.
    pub fn show(&self, surface: &dyn Surface) {
        surface.set_style(self.element, StyleProperty::Display, DISPLAY_SHOWN);
    }

    /// Entrance transition target.
    pub fn reveal(&self, surface: &dyn Surface) {
        surface.set_style(self.element, StyleProperty::Opacity, "1");
    }

    /// Exit transition target.
    pub fn fade_out(&self, surface: &dyn Surface) {
        surface.set_style(self.element, StyleProperty::Opacity, "0");
    }

    /// Takes the overlay out of the layout.
    pub fn hide(&self, surface: &dyn Surface) {
        surface.set_style(self.element, StyleProperty::Display, DISPLAY_HIDDEN);
    }

    /// Removes the overlay from the page and releases every listener.
    pub fn detach(&mut self, surface: &dyn Surface) {
        self.content_listeners.clear();
        if let Some(mut backdrop) = self.backdrop.take() {
            backdrop.release();
        }
        self.content = None;
        surface.remove_element(self.element);
    }

    fn append(&self, surface: &dyn Surface, tag: &str, class: &str) -> ElementId {
        let element = surface.create_element(tag);
        surface.add_class(element, class);
        surface.append_child(self.element, element);
        element
    }

    fn append_button(&self, surface: &dyn Surface, class: &str, icon: &str, label: &str) -> ElementId {
        let button = self.append(surface, "button", class);
        surface.set_attribute(button, "type", "button");
        surface.set_attribute(button, "aria-label", label);
        surface.set_inner_html(button, icon);
        button
    }
}
