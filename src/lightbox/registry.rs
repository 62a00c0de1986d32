// SPDX-License-Identifier: MPL-2.0
//! Thumbnail registry: binds each matching image element to its index.

use std::rc::Rc;

use crate::domain::{ImageRef, ImageSet};
use crate::surface::{ElementId, EventKind, EventTarget, Handler, StyleProperty, Subscription, Surface};

const THUMBNAIL_TAG: &str = "img";
const THUMBNAIL_CURSOR: &str = "pointer";

#[derive(Debug, Default)]
pub struct Registry {
    images: ImageSet,
    thumbnails: Vec<ElementId>,
    bindings: Vec<Subscription>,
}

impl Registry {
    /// Image elements matching `selector`, in document order.
    #[must_use]
    pub fn scan(surface: &dyn Surface, selector: &str) -> Vec<ElementId> {
        surface
            .query_selector_all(selector)
            .into_iter()
            .filter(|el| {
                surface
                    .tag_name(*el)
                    .is_some_and(|tag| tag.eq_ignore_ascii_case(THUMBNAIL_TAG))
            })
            .collect()
    }

    /// Scans the page and attaches `on_activate(index)` as each thumbnail's
    /// click listener. No match yields an empty registry.
    pub fn bind(
        surface: &Rc<dyn Surface>,
        selector: &str,
        mut on_activate: impl FnMut(usize) -> Handler,
    ) -> Self {
        let thumbnails = Self::scan(surface.as_ref(), selector);
        let mut images = Vec::with_capacity(thumbnails.len());
        let mut bindings = Vec::with_capacity(thumbnails.len());

        for (index, element) in thumbnails.iter().copied().enumerate() {
            let src = surface.attribute(element, "src").unwrap_or_default();
            images.push(ImageRef::new(src));
            surface.set_style(element, StyleProperty::Cursor, THUMBNAIL_CURSOR);
            bindings.push(Subscription::listen(
                surface,
                EventTarget::Element(element),
                EventKind::Click,
                on_activate(index),
            ));
        }

        tracing::debug!(selector, count = thumbnails.len(), "Bound thumbnails");
        Self {
            images: ImageSet::new(images),
            thumbnails,
            bindings,
        }
    }

    #[must_use]
    pub fn images(&self) -> &ImageSet {
        &self.images
    }

    #[must_use]
    pub fn thumbnails(&self) -> &[ElementId] {
        &self.thumbnails
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bindings.iter().any(Subscription::is_active)
    }

    /// Detaches every activation listener, drops the interactive cursor and
    /// empties the image set.
    pub fn release(&mut self, surface: &dyn Surface) {
        for binding in &mut self.bindings {
            binding.release();
        }
        self.bindings.clear();
        for element in self.thumbnails.drain(..) {
            surface.set_style(element, StyleProperty::Cursor, "");
        }
        self.images.clear();
    }
}
