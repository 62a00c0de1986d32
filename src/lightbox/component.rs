// SPDX-License-Identifier: MPL-2.0
//! Lightbox controller orchestrating the sub-components.
//!
//! Every listener and deferred callback holds only a weak reference to the
//! controller and feeds a [`Message`] into [`Inner::handle`]; state
//! transitions happen in one place and are followed by a visual refresh.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::input::{self, Control, Key};
use super::loading;
use super::message::Message;
use super::overlay::{Controls, Labels, Overlay, ACTIVE_CLASS};
use super::registry::Registry;
use super::scroll_lock::ScrollLock;
use super::state::ViewerState;
use super::visual::VisualState;
use crate::config::Options;
use crate::domain::{Generation, ImageSet, Step};
use crate::i18n::fluent::{keys, I18n};
use crate::scheduler::Scheduler;
use crate::surface::{
    ElementId, EventContext, EventKind, EventTarget, Handler, Subscription, Surface,
};

/// Image-gallery overlay controller.
///
/// Built from a selector: every matching image element becomes a thumbnail
/// that opens the viewer at its position. Dropping the controller has the
/// same effect as [`Lightbox::destroy`].
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use lightbox::{Lightbox, ManualScheduler, MemorySurface, Options, Surface};
///
/// let page = Rc::new(MemorySurface::new());
/// let thumb = page.add_element(page.body(), "img", &[("class", "thumb"), ("src", "a.jpg")]);
/// let scheduler = Rc::new(ManualScheduler::new());
///
/// let lightbox = Lightbox::new(page.clone(), scheduler, ".thumb", Options::default());
/// page.click(thumb);
/// assert_eq!(lightbox.state().current_index(), Some(0));
///
/// lightbox.destroy();
/// page.click(thumb);
/// assert!(!lightbox.state().is_open());
/// ```
pub struct Lightbox {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    surface: Rc<dyn Surface>,
    scheduler: Rc<dyn Scheduler>,
    options: Options,
    i18n: I18n,
    registry: Registry,
    overlay: Overlay,
    scroll_lock: ScrollLock,
    viewer: ViewerState,
    loading: loading::State,
    generation: Generation,
    keyboard: Option<Subscription>,
    destroyed: bool,
    this: Weak<RefCell<Inner>>,
}

/// Builds a listener that turns an event into a message for the controller.
fn listener(
    this: &Weak<RefCell<Inner>>,
    to_message: impl Fn(&mut EventContext<'_>) -> Option<Message> + 'static,
) -> Handler {
    let this = this.clone();
    Rc::new(move |ctx| {
        if let Some(msg) = to_message(ctx) {
            Inner::send(&this, msg);
        }
    })
}

impl Lightbox {
    /// Binds every image matching `selector` and prepares the hidden overlay.
    ///
    /// Strings are localised according to `options.language`, then the OS locale.
    pub fn new(
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn Scheduler>,
        selector: &str,
        options: Options,
    ) -> Self {
        let i18n = I18n::new(None, &options);
        Self::with_i18n(surface, scheduler, selector, options, i18n)
    }

    /// Same as [`Lightbox::new`] with an explicit localisation bundle.
    pub fn with_i18n(
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn Scheduler>,
        selector: &str,
        options: Options,
        i18n: I18n,
    ) -> Self {
        let inner = Rc::new_cyclic(|this: &Weak<RefCell<Inner>>| {
            let registry = Registry::bind(&surface, selector, |index| {
                listener(this, move |_ctx| Some(Message::Open(index)))
            });

            let mut overlay = Overlay::create(surface.as_ref());
            let backdrop = Subscription::listen(
                &surface,
                EventTarget::Element(overlay.element()),
                EventKind::Click,
                listener(this, |ctx| input::route_click(Control::Backdrop, ctx)),
            );
            overlay.set_backdrop_listener(backdrop);

            RefCell::new(Inner {
                surface,
                scheduler,
                options,
                i18n,
                registry,
                overlay,
                scroll_lock: ScrollLock::new(),
                viewer: ViewerState::Closed,
                loading: loading::State::default(),
                generation: Generation::default(),
                keyboard: None,
                destroyed: false,
                this: this.clone(),
            })
        });
        Self { inner }
    }

    /// Opens the viewer at `index`. Out-of-range indices are ignored.
    pub fn open(&self, index: usize) {
        self.inner.borrow_mut().handle(Message::Open(index));
    }

    pub fn close(&self) {
        self.inner.borrow_mut().handle(Message::Close);
    }

    /// Shows the adjacent image, wrapping around at both ends.
    pub fn change(&self, step: Step) {
        self.inner.borrow_mut().handle(Message::Navigate(step));
    }

    pub fn toggle_zoom(&self) {
        self.inner.borrow_mut().handle(Message::ToggleZoom);
    }

    /// Releases the overlay, the scroll lock and every listener.
    ///
    /// Idempotent; afterwards the controller is inert.
    pub fn destroy(&self) {
        self.inner.borrow_mut().destroy();
    }

    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.inner.borrow().viewer
    }

    #[must_use]
    pub fn images(&self) -> ImageSet {
        self.inner.borrow().registry.images().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().registry.images().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }

    #[must_use]
    pub fn overlay(&self) -> ElementId {
        self.inner.borrow().overlay.element()
    }

    /// Currently displayed image element, if the overlay has content.
    #[must_use]
    pub fn image_element(&self) -> Option<ElementId> {
        self.inner.borrow().overlay.content().map(|c| c.image)
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.inner.borrow().generation
    }

    #[must_use]
    pub fn is_keyboard_active(&self) -> bool {
        self.inner
            .borrow()
            .keyboard
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.inner.borrow().scroll_lock.is_locked()
    }
}

impl fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Lightbox")
            .field("viewer", &inner.viewer)
            .field("images", &inner.registry.images().len())
            .field("generation", &inner.generation)
            .field("destroyed", &inner.destroyed)
            .finish()
    }
}

impl Inner {
    /// Delivers `msg` to a live controller. Messages for a dropped controller
    /// or arriving while it is mid-transition are discarded.
    fn send(this: &Weak<RefCell<Inner>>, msg: Message) {
        let Some(inner) = this.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            tracing::warn!(?msg, "Dropped re-entrant lightbox message");
            return;
        };
        inner.handle(msg);
    }

    fn handle(&mut self, msg: Message) {
        if self.destroyed {
            return;
        }
        match msg {
            Message::Open(index) => self.open(index),
            Message::Close => self.close(),
            Message::Navigate(step) => self.change(step),
            Message::ToggleZoom => self.toggle_zoom(),
            Message::ImageLoaded => self.on_loading(loading::Message::Loaded),
            Message::ImageFailed => self.on_loading(loading::Message::Failed),
            Message::EntranceFrame(generation) => {
                if generation == self.generation && self.viewer.is_open() {
                    self.overlay.reveal(self.surface.as_ref());
                }
            }
            Message::HideElapsed(generation) => {
                if generation == self.generation && !self.viewer.is_open() {
                    self.overlay.hide(self.surface.as_ref());
                } else {
                    tracing::debug!(
                        scheduled = generation.value(),
                        current = self.generation.value(),
                        "Dropped stale overlay hide"
                    );
                }
            }
        }
    }

    fn open(&mut self, index: usize) {
        let Some(image) = self.registry.images().get(index).cloned() else {
            tracing::debug!(index, len = self.registry.images().len(), "Ignored open");
            return;
        };
        self.generation = self.generation.next();

        let surface = Rc::clone(&self.surface);
        let controls = Controls {
            close: self.options.close_button,
            navigation: self.options.navigation && self.registry.images().can_navigate(),
        };
        let labels = Labels {
            close: self.i18n.tr(keys::BUTTON_CLOSE),
            previous: self.i18n.tr(keys::BUTTON_PREVIOUS),
            next: self.i18n.tr(keys::BUTTON_NEXT),
        };
        let content = self.overlay.rebuild(
            surface.as_ref(),
            &image,
            &self.options.overlay_color,
            controls,
            &labels,
        );

        let mut listeners = vec![
            self.listen(content.image, EventKind::Click, |ctx| {
                input::route_click(Control::Image, ctx)
            }),
            self.listen(content.image, EventKind::Load, |_ctx| Some(Message::ImageLoaded)),
            self.listen(content.image, EventKind::Error, |_ctx| Some(Message::ImageFailed)),
        ];
        for (element, control) in [
            (content.close, Control::Close),
            (content.previous, Control::Previous),
            (content.next, Control::Next),
        ] {
            if let Some(element) = element {
                listeners.push(self.listen(element, EventKind::Click, move |ctx| {
                    input::route_click(control, ctx)
                }));
            }
        }
        self.overlay.set_content_listeners(listeners);
        self.loading.handle(loading::Message::Started {
            indicator: content.spinner,
        });

        self.viewer = ViewerState::opened_at(index);
        self.apply_visual();
        self.overlay.show(surface.as_ref());

        let this = self.this.clone();
        let generation = self.generation;
        self.scheduler.request_frame(Box::new(move || {
            Inner::send(&this, Message::EntranceFrame(generation));
        }));

        if self.options.keyboard && self.keyboard.is_none() {
            self.keyboard = Some(Subscription::listen(
                &surface,
                EventTarget::Document,
                EventKind::KeyDown,
                listener(&self.this, |ctx| {
                    ctx.key().map(Key::from_name).and_then(input::route_key)
                }),
            ));
        }
        self.scroll_lock.lock(surface.as_ref());

        tracing::debug!(index, generation = generation.value(), "Opened lightbox");
    }

    fn close(&mut self) {
        if !self.viewer.is_open() {
            return;
        }
        let surface = Rc::clone(&self.surface);
        self.overlay.fade_out(surface.as_ref());
        self.scroll_lock.unlock(surface.as_ref());
        if let Some(mut keyboard) = self.keyboard.take() {
            keyboard.release();
        }
        self.viewer = ViewerState::Closed;
        self.generation = self.generation.next();

        let this = self.this.clone();
        let generation = self.generation;
        self.scheduler.set_timeout(
            self.options.animation().as_duration(),
            Box::new(move || Inner::send(&this, Message::HideElapsed(generation))),
        );

        tracing::debug!(generation = generation.value(), "Closed lightbox");
    }

    fn change(&mut self, step: Step) {
        let Some(current) = self.viewer.current_index() else {
            return;
        };
        let Some(next) = self.registry.images().step_from(current, step) else {
            return;
        };
        let Some(image) = self.overlay.content().map(|c| c.image) else {
            return;
        };
        let src = self
            .registry
            .images()
            .get(next)
            .map(|img| img.src.clone())
            .unwrap_or_default();

        self.viewer = ViewerState::opened_at(next);

        let surface = Rc::clone(&self.surface);
        surface.remove_class(image, ACTIVE_CLASS);
        surface.force_layout(image);
        surface.set_attribute(image, "src", &src);
        surface.add_class(image, ACTIVE_CLASS);
        self.on_loading(loading::Message::SourceChanged);
        self.apply_visual();

        tracing::debug!(from = current, to = next, ?step, "Navigated");
    }

    fn toggle_zoom(&mut self) {
        let ViewerState::Open {
            current_index,
            zoomed,
        } = self.viewer
        else {
            return;
        };
        self.viewer = ViewerState::Open {
            current_index,
            zoomed: !zoomed,
        };
        self.apply_visual();
        tracing::debug!(zoomed = !zoomed, "Toggled zoom");
    }

    fn on_loading(&mut self, msg: loading::Message) {
        let surface = self.surface.as_ref();
        let image = self.overlay.content().map(|c| c.image);
        match self.loading.handle(msg) {
            loading::Effect::None => {}
            loading::Effect::RemoveIndicator(indicator) => surface.remove_element(indicator),
            loading::Effect::ShowFailure { indicator } => {
                if let Some(indicator) = indicator {
                    surface.remove_element(indicator);
                }
                if let Some(image) = image {
                    let src = surface.attribute(image, "src").unwrap_or_default();
                    tracing::warn!(%src, "Image failed to load");
                    surface.set_attribute(image, "alt", &self.i18n.tr(keys::IMAGE_LOAD_FAILED));
                }
            }
            loading::Effect::ClearFailure => {
                if let Some(image) = image {
                    surface.remove_attribute(image, "alt");
                }
            }
        }
    }

    fn apply_visual(&self) {
        let Some(visual) = VisualState::of(&self.viewer) else {
            return;
        };
        if let Some(content) = self.overlay.content() {
            visual.apply(self.surface.as_ref(), self.overlay.element(), content.image);
        }
    }

    fn listen(
        &self,
        element: ElementId,
        kind: EventKind,
        to_message: impl Fn(&mut EventContext<'_>) -> Option<Message> + 'static,
    ) -> Subscription {
        Subscription::listen(
            &self.surface,
            EventTarget::Element(element),
            kind,
            listener(&self.this, to_message),
        )
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        let surface = Rc::clone(&self.surface);
        self.scroll_lock.unlock(surface.as_ref());
        self.overlay.detach(surface.as_ref());
        if let Some(mut keyboard) = self.keyboard.take() {
            keyboard.release();
        }
        self.registry.release(surface.as_ref());
        self.viewer = ViewerState::Closed;
        self.loading = loading::State::default();
        self.generation = self.generation.next();
        self.destroyed = true;
        tracing::debug!("Destroyed lightbox");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::surface::{MemorySurface, StyleProperty};
    use std::time::Duration;

    struct Page {
        surface: Rc<MemorySurface>,
        scheduler: Rc<ManualScheduler>,
        thumbs: Vec<ElementId>,
    }

    fn page(n: usize) -> Page {
        let surface = Rc::new(MemorySurface::new());
        let body = surface.body();
        let thumbs = (0..n)
            .map(|i| {
                let src = format!("img-{i}.jpg");
                surface.add_element(body, "img", &[("class", "thumb"), ("src", src.as_str())])
            })
            .collect();
        Page {
            surface,
            scheduler: Rc::new(ManualScheduler::new()),
            thumbs,
        }
    }

    fn lightbox(page: &Page, options: Options) -> Lightbox {
        let i18n = I18n::new(Some("en-US".to_string()), &options);
        Lightbox::with_i18n(
            page.surface.clone(),
            page.scheduler.clone(),
            ".thumb",
            options,
            i18n,
        )
    }

    fn src_of(page: &Page, lb: &Lightbox) -> Option<String> {
        lb.image_element()
            .and_then(|img| page.surface.attribute(img, "src"))
    }

    #[test]
    fn thumbnail_click_opens_at_its_index() {
        let page = page(3);
        let lb = lightbox(&page, Options::default());

        page.surface.click(page.thumbs[1]);

        assert_eq!(lb.state(), ViewerState::opened_at(1));
        assert_eq!(src_of(&page, &lb).as_deref(), Some("img-1.jpg"));
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Display).as_deref(),
            Some("flex")
        );
    }

    #[test]
    fn entrance_opacity_waits_for_next_frame() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(0);

        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Opacity).as_deref(),
            Some("0")
        );
        page.scheduler.run_frame();
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Opacity).as_deref(),
            Some("1")
        );
    }

    #[test]
    fn close_before_first_frame_never_reveals() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        lb.close();
        page.scheduler.run_frame();
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Opacity).as_deref(),
            Some("0")
        );
    }

    #[test]
    fn close_unlocks_immediately_and_hides_after_delay() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        page.scheduler.run_frame();

        lb.close();
        assert!(!lb.state().is_open());
        assert!(!lb.is_scroll_locked());
        assert!(!lb.is_keyboard_active());
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Display).as_deref(),
            Some("flex")
        );

        page.scheduler.advance(Duration::from_millis(300));
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Display).as_deref(),
            Some("none")
        );
    }

    #[test]
    fn reopen_during_fade_is_not_hidden_by_stale_timer() {
        let page = page(3);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        lb.close();
        page.scheduler.advance(Duration::from_millis(100));
        lb.open(2);
        page.scheduler.advance(Duration::from_millis(500));

        assert_eq!(lb.state(), ViewerState::opened_at(2));
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Display).as_deref(),
            Some("flex")
        );
    }

    #[test]
    fn custom_animation_duration_is_used() {
        let page = page(1);
        let lb = lightbox(
            &page,
            Options {
                animation_duration: 50,
                ..Options::default()
            },
        );
        lb.open(0);
        lb.close();
        page.scheduler.advance(Duration::from_millis(50));
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Display).as_deref(),
            Some("none")
        );
    }

    #[test]
    fn close_when_closed_is_noop() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        let before = lb.generation();
        lb.close();
        assert_eq!(lb.generation(), before);
        assert_eq!(page.scheduler.pending_timers(), 0);
    }

    #[test]
    fn open_out_of_range_is_ignored() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(2);
        assert_eq!(lb.state(), ViewerState::Closed);
        assert!(!lb.is_scroll_locked());
    }

    #[test]
    fn navigation_swaps_source_and_restarts_transition() {
        let page = page(3);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        let image = lb.image_element().expect("content built");
        let reads = page.surface.layout_reads();

        lb.change(Step::Previous);

        assert_eq!(lb.state().current_index(), Some(2));
        assert_eq!(lb.image_element(), Some(image));
        assert_eq!(src_of(&page, &lb).as_deref(), Some("img-2.jpg"));
        assert!(page.surface.has_class(image, ACTIVE_CLASS));
        assert_eq!(page.surface.layout_reads(), reads + 1);
    }

    #[test]
    fn navigation_resets_zoom_visuals() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        lb.toggle_zoom();
        assert!(lb.state().is_zoomed());

        lb.change(Step::Next);

        let image = lb.image_element().expect("content built");
        assert!(!lb.state().is_zoomed());
        assert_eq!(
            page.surface.style(image, StyleProperty::Transform).as_deref(),
            Some("scale(1)")
        );
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Overflow).as_deref(),
            Some("hidden")
        );
    }

    #[test]
    fn image_click_toggles_zoom_without_closing() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        let image = lb.image_element().expect("content built");

        page.surface.click(image);
        assert!(lb.state().is_zoomed());
        assert_eq!(
            page.surface.style(image, StyleProperty::Cursor).as_deref(),
            Some("zoom-out")
        );
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Overflow).as_deref(),
            Some("auto")
        );

        page.surface.click(image);
        assert_eq!(lb.state(), ViewerState::opened_at(0));
        assert_eq!(
            page.surface.style(image, StyleProperty::Cursor).as_deref(),
            Some("zoom-in")
        );
    }

    #[test]
    fn backdrop_click_closes_but_buttons_do_not_leak() {
        let page = page(3);
        let lb = lightbox(&page, Options::default());
        lb.open(0);

        let next = page.surface.find_by_class("lightbox-next").expect("next button");
        page.surface.click(next);
        assert_eq!(lb.state().current_index(), Some(1));

        page.surface.click(lb.overlay());
        assert!(!lb.state().is_open());
    }

    #[test]
    fn close_button_closes() {
        let page = page(1);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        let close = page.surface.find_by_class("lightbox-close").expect("close button");
        page.surface.click(close);
        assert!(!lb.state().is_open());
    }

    #[test]
    fn close_button_can_be_disabled() {
        let page = page(2);
        let lb = lightbox(
            &page,
            Options {
                close_button: false,
                ..Options::default()
            },
        );
        lb.open(0);
        assert!(page.surface.find_by_class("lightbox-close").is_none());
    }

    #[test]
    fn load_removes_spinner() {
        let page = page(1);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        let spinner = page.surface.find_by_class("lightbox-spinner").expect("spinner");
        page.surface.fire_load(lb.image_element().expect("image"));
        assert!(!page.surface.is_attached(spinner));
    }

    #[test]
    fn failed_load_shows_placeholder_and_keeps_navigation() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        let image = lb.image_element().expect("image");
        let spinner = page.surface.find_by_class("lightbox-spinner").expect("spinner");

        page.surface.fire_error(image);
        assert!(!page.surface.is_attached(spinner));
        assert_eq!(
            page.surface.attribute(image, "alt").as_deref(),
            Some("Failed to load image")
        );

        lb.change(Step::Next);
        assert_eq!(lb.state().current_index(), Some(1));
        assert_eq!(page.surface.attribute(image, "alt"), None);
    }

    #[test]
    fn keyboard_listener_is_single_and_scoped_to_open() {
        let page = page(3);
        let lb = lightbox(&page, Options::default());
        let keydown = |s: &MemorySurface| s.listeners_on(EventTarget::Document, EventKind::KeyDown);

        assert_eq!(keydown(&page.surface), 0);
        lb.open(0);
        lb.open(1);
        assert_eq!(keydown(&page.surface), 1);
        lb.close();
        assert_eq!(keydown(&page.surface), 0);
    }

    #[test]
    fn other_keys_are_ignored() {
        let page = page(3);
        let lb = lightbox(&page, Options::default());
        lb.open(1);
        page.surface.key_down("Enter");
        assert_eq!(lb.state(), ViewerState::opened_at(1));
    }

    #[test]
    fn reopen_while_open_keeps_original_scroll_record() {
        let page = page(2);
        page.surface.set_scroll_y(640.0);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        page.surface.set_scroll_y(0.0);
        lb.open(1);
        lb.close();
        assert_eq!(page.surface.scroll_y(), 640.0);
    }

    #[test]
    fn overlay_color_is_applied() {
        let page = page(1);
        let lb = lightbox(
            &page,
            Options {
                overlay_color: "rgba(0, 0, 0, 0.9)".to_string(),
                ..Options::default()
            },
        );
        lb.open(0);
        assert_eq!(
            page.surface.style(lb.overlay(), StyleProperty::Background).as_deref(),
            Some("rgba(0, 0, 0, 0.9)")
        );
    }

    #[test]
    fn destroy_is_idempotent_and_inert() {
        let page = page(2);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        lb.close();

        lb.destroy();
        lb.destroy();
        page.scheduler.run_until_idle();
        page.surface.click(page.thumbs[0]);
        lb.open(0);
        lb.change(Step::Next);

        assert!(lb.is_destroyed());
        assert!(lb.is_empty());
        assert_eq!(lb.state(), ViewerState::Closed);
        assert!(!page.surface.is_attached(lb.overlay()));
        assert_eq!(page.surface.listener_count(), 0);
    }

    #[test]
    fn destroy_while_open_restores_scroll() {
        let page = page(2);
        page.surface.set_scroll_y(200.0);
        let lb = lightbox(&page, Options::default());
        lb.open(1);
        page.surface.set_scroll_y(0.0);

        lb.destroy();
        assert_eq!(page.surface.scroll_y(), 200.0);
        assert_eq!(page.surface.style(page.surface.body(), StyleProperty::Position), None);
    }

    #[test]
    fn dropping_controller_releases_listeners() {
        let page = page(2);
        {
            let lb = lightbox(&page, Options::default());
            lb.open(0);
        }
        assert_eq!(page.surface.listener_count(), 0);
        page.scheduler.run_until_idle();
    }

    #[test]
    fn repeated_cycles_keep_element_count_stable() {
        let page = page(3);
        let lb = lightbox(&page, Options::default());
        lb.open(0);
        page.surface.fire_load(lb.image_element().expect("image"));
        lb.close();
        page.scheduler.run_until_idle();
        let settled = page.surface.element_count();
        let listeners = page.surface.listener_count();

        for i in 0..200 {
            lb.open(i % 3);
            page.scheduler.run_frame();
            page.surface.fire_load(lb.image_element().expect("image"));
            lb.change(Step::Next);
            lb.close();
            page.scheduler.run_until_idle();
        }

        assert_eq!(page.surface.element_count(), settled);
        assert_eq!(page.surface.listener_count(), listeners);

        lb.destroy();
        // body and the three thumbnails
        assert_eq!(page.surface.element_count(), 4);
    }
}
