// SPDX-License-Identifier: MPL-2.0
//! `lightbox` is a headless image-gallery overlay controller.
//!
//! It turns a set of thumbnail images into a full-screen viewer with
//! keyboard navigation, click-to-zoom, scroll locking and fade transitions.
//! Rendering and timing are delegated to a [`Surface`] and a [`Scheduler`],
//! so the same controller runs against a real page or the in-memory
//! implementations shipped here.

#![doc(html_root_url = "https://docs.rs/lightbox/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod lightbox;
pub mod replay;
pub mod scheduler;
pub mod surface;

pub use config::Options;
pub use domain::Step;
pub use lightbox::{Lightbox, ViewerState};
pub use scheduler::{ManualScheduler, Scheduler};
pub use surface::{MemorySurface, Surface};
