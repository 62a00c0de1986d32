// SPDX-License-Identifier: MPL-2.0
//! Scripted interaction replay against an in-memory page.
//!
//! Used by the `lightbox-replay` binary; each [`Action`] is parsed from a
//! short textual step (`click:0`, `key:ArrowRight`, `wait:300`, ...).

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use crate::config::Options;
use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::lightbox::overlay::{CLOSE_CLASS, NEXT_CLASS, PREVIOUS_CLASS};
use crate::lightbox::{Lightbox, ViewerState};
use crate::scheduler::ManualScheduler;
use crate::surface::{ElementId, MemorySurface, StyleProperty, Surface};

/// Class carried by every generated thumbnail.
pub const THUMBNAIL_SELECTOR: &str = ".thumb";

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ClickThumbnail(usize),
    Key(String),
    Wait(Duration),
    Frame,
    ClickImage,
    ClickBackdrop,
    ClickClose,
    ClickPrevious,
    ClickNext,
    Load,
    Error,
    Destroy,
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(step: &str) -> Result<Self> {
        let (name, arg) = match step.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (step, None),
        };
        let action = match (name, arg) {
            ("click", Some(arg)) => Action::ClickThumbnail(
                arg.parse()
                    .map_err(|_| Error::invalid_script(step, "thumbnail index must be a number"))?,
            ),
            ("key", Some(arg)) if !arg.is_empty() => Action::Key(arg.to_string()),
            ("wait", Some(arg)) => Action::Wait(Duration::from_millis(
                arg.parse()
                    .map_err(|_| Error::invalid_script(step, "wait takes milliseconds"))?,
            )),
            ("frame", None) => Action::Frame,
            ("image", None) => Action::ClickImage,
            ("backdrop", None) => Action::ClickBackdrop,
            ("close", None) => Action::ClickClose,
            ("prev", None) => Action::ClickPrevious,
            ("next", None) => Action::ClickNext,
            ("load", None) => Action::Load,
            ("error", None) => Action::Error,
            ("destroy", None) => Action::Destroy,
            ("click" | "key" | "wait", _) => {
                return Err(Error::invalid_script(step, "missing argument"))
            }
            _ => return Err(Error::invalid_script(step, "unknown step")),
        };
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ClickThumbnail(index) => write!(f, "click:{index}"),
            Action::Key(key) => write!(f, "key:{key}"),
            Action::Wait(delay) => write!(f, "wait:{}", delay.as_millis()),
            Action::Frame => f.write_str("frame"),
            Action::ClickImage => f.write_str("image"),
            Action::ClickBackdrop => f.write_str("backdrop"),
            Action::ClickClose => f.write_str("close"),
            Action::ClickPrevious => f.write_str("prev"),
            Action::ClickNext => f.write_str("next"),
            Action::Load => f.write_str("load"),
            Action::Error => f.write_str("error"),
            Action::Destroy => f.write_str("destroy"),
        }
    }
}

/// Parses every step, failing on the first malformed one.
pub fn parse_script<S: AsRef<str>>(steps: &[S]) -> Result<Vec<Action>> {
    steps.iter().map(|step| step.as_ref().parse()).collect()
}

/// Observable state after a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub state: ViewerState,
    pub display: Option<String>,
    pub opacity: Option<String>,
    pub src: Option<String>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            ViewerState::Closed => f.write_str("closed")?,
            ViewerState::Open {
                current_index,
                zoomed,
            } => write!(f, "open index={current_index} zoomed={zoomed}")?,
        }
        write!(
            f,
            " display={} opacity={}",
            self.display.as_deref().unwrap_or("-"),
            self.opacity.as_deref().unwrap_or("-"),
        )?;
        if let Some(src) = &self.src {
            write!(f, " src={src}")?;
        }
        Ok(())
    }
}

/// A generated page, its scheduler and the controller bound to it.
#[derive(Debug)]
pub struct Replay {
    surface: Rc<MemorySurface>,
    scheduler: Rc<ManualScheduler>,
    thumbnails: Vec<ElementId>,
    lightbox: Lightbox,
}

impl Replay {
    /// Builds a page of `images` thumbnails named `image-<i>.jpg`.
    pub fn new(images: usize, options: Options, i18n: I18n) -> Self {
        let surface = Rc::new(MemorySurface::new());
        let body = surface.body();
        let thumbnails = (0..images)
            .map(|i| {
                let src = format!("image-{i}.jpg");
                surface.add_element(body, "img", &[("class", "thumb"), ("src", src.as_str())])
            })
            .collect();
        let scheduler = Rc::new(ManualScheduler::new());
        let lightbox = Lightbox::with_i18n(
            surface.clone(),
            scheduler.clone(),
            THUMBNAIL_SELECTOR,
            options,
            i18n,
        );
        Self {
            surface,
            scheduler,
            thumbnails,
            lightbox,
        }
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Rejects steps that reference thumbnails the page does not have.
    pub fn check(&self, actions: &[Action]) -> Result<()> {
        for action in actions {
            if let Action::ClickThumbnail(index) = action {
                if *index >= self.thumbnails.len() {
                    return Err(Error::invalid_script(
                        action.to_string(),
                        "no such thumbnail",
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn apply(&self, action: &Action) -> Snapshot {
        let surface = self.surface.as_ref();
        match action {
            Action::ClickThumbnail(index) => {
                if let Some(thumb) = self.thumbnails.get(*index) {
                    surface.click(*thumb);
                }
            }
            Action::Key(key) => {
                surface.key_down(key);
            }
            Action::Wait(delay) => {
                self.scheduler.advance(*delay);
            }
            Action::Frame => {
                self.scheduler.run_frame();
            }
            Action::ClickImage => self.click(self.lightbox.image_element()),
            Action::ClickBackdrop => self.click(Some(self.lightbox.overlay())),
            Action::ClickClose => self.click(surface.find_by_class(CLOSE_CLASS)),
            Action::ClickPrevious => self.click(surface.find_by_class(PREVIOUS_CLASS)),
            Action::ClickNext => self.click(surface.find_by_class(NEXT_CLASS)),
            Action::Load => {
                if let Some(image) = self.lightbox.image_element() {
                    surface.fire_load(image);
                }
            }
            Action::Error => {
                if let Some(image) = self.lightbox.image_element() {
                    surface.fire_error(image);
                }
            }
            Action::Destroy => self.lightbox.destroy(),
        }
        self.snapshot()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let overlay = self.lightbox.overlay();
        let attached = self.surface.is_attached(overlay);
        Snapshot {
            state: self.lightbox.state(),
            display: attached
                .then(|| self.surface.style(overlay, StyleProperty::Display))
                .flatten(),
            opacity: attached
                .then(|| self.surface.style(overlay, StyleProperty::Opacity))
                .flatten(),
            src: self
                .lightbox
                .image_element()
                .and_then(|image| self.surface.attribute(image, "src")),
        }
    }

    fn click(&self, element: Option<ElementId>) {
        match element {
            Some(element) if self.surface.is_attached(element) => {
                self.surface.click(element);
            }
            _ => tracing::info!("Nothing to click"),
        }
    }
}
