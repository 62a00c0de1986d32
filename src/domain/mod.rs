// SPDX-License-Identifier: MPL-2.0
//! Domain layer: pure types with no dependency on a rendering surface.
//!
//! - [`gallery`]: [`ImageSet`], [`ImageRef`], [`Step`]
//! - [`newtypes`]: [`AnimationDuration`], [`Generation`]

pub mod gallery;
pub mod newtypes;

pub use gallery::{step_index, ImageRef, ImageSet, Step};
pub use newtypes::{AnimationDuration, Generation};
