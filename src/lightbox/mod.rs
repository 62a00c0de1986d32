// SPDX-License-Identifier: MPL-2.0
//! Lightbox controller and its sub-components.
//!
//! # Architecture
//!
//! ```text
//! Lightbox (component.rs)
//! ├── registry.rs     thumbnails matched by selector, click → Open(index)
//! ├── overlay.rs      persistent overlay element, content rebuilt per open
//! │   └── loading.rs  spinner / failure placeholder of the displayed image
//! ├── state.rs        Closed | Open { current_index, zoomed }
//! ├── visual.rs       state → transform, cursor and overflow styles
//! ├── scroll_lock.rs  freezes page scroll while open, restores on close
//! └── input.rs        clicks and keys → Message
//! ```
//!
//! Listeners and scheduled callbacks communicate with the controller only
//! through [`Message`]. Deferred callbacks carry the [`Generation`] current
//! when they were scheduled and are ignored once it has moved on.
//!
//! [`Generation`]: crate::domain::Generation

mod component;
pub mod icons;
pub mod input;
pub mod loading;
pub mod message;
pub mod overlay;
pub mod registry;
pub mod scroll_lock;
pub mod state;
pub mod visual;

pub use component::Lightbox;
pub use input::{Control, Key};
pub use message::Message;
pub use state::ViewerState;
