// SPDX-License-Identifier: MPL-2.0
//! Loading indicator state for the displayed image.

use crate::surface::ElementId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Spinner element while the first load is pending.
    indicator: Option<ElementId>,
    /// Whether the current source failed to load.
    failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A new image element started loading behind `indicator`.
    Started { indicator: ElementId },
    /// The displayed source changed without rebuilding the element.
    SourceChanged,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Remove the indicator element from the overlay.
    RemoveIndicator(ElementId),
    /// Remove the indicator (if any) and show the failure placeholder.
    ShowFailure { indicator: Option<ElementId> },
    /// Drop a failure placeholder left by the previous source.
    ClearFailure,
}

impl State {
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Started { indicator } => {
                self.indicator = Some(indicator);
                self.failed = false;
                Effect::None
            }
            Message::SourceChanged => {
                if std::mem::take(&mut self.failed) {
                    Effect::ClearFailure
                } else {
                    Effect::None
                }
            }
            Message::Loaded => match self.indicator.take() {
                Some(indicator) => Effect::RemoveIndicator(indicator),
                None => Effect::None,
            },
            Message::Failed => {
                self.failed = true;
                Effect::ShowFailure {
                    indicator: self.indicator.take(),
                }
            }
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.indicator.is_some()
    }

    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failed
    }
}
