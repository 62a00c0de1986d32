// SPDX-License-Identifier: MPL-2.0
//! Messages delivered to the controller by listeners and deferred callbacks.

use crate::domain::{Generation, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A thumbnail was activated.
    Open(usize),
    /// Backdrop, close control or Escape.
    Close,
    /// Prev/next control or arrow key.
    Navigate(Step),
    /// The displayed image was clicked.
    ToggleZoom,
    ImageLoaded,
    ImageFailed,
    /// Next-frame callback scheduled by an open.
    EntranceFrame(Generation),
    /// Delayed hide scheduled by a close.
    HideElapsed(Generation),
}
