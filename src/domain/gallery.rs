// SPDX-License-Identifier: MPL-2.0
//! Gallery types: the ordered image set and navigation steps.

/// One entry of the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Source URL displayed when this entry is opened.
    pub src: String,
}

impl ImageRef {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
}

impl Step {
    /// Signed offset of the step (`-1` or `+1`).
    #[must_use]
    pub fn offset(self) -> isize {
        match self {
            Step::Previous => -1,
            Step::Next => 1,
        }
    }

    /// The step going the other way.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Step::Previous => Step::Next,
            Step::Next => Step::Previous,
        }
    }
}

/// Ordered, fixed set of images, indexed `0..len()`.
///
/// An empty set is valid: opening and navigating simply do nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    images: Vec<ImageRef>,
}

impl ImageSet {
    #[must_use]
    pub fn new(images: Vec<ImageRef>) -> Self {
        Self { images }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ImageRef> {
        self.images.get(index)
    }

    /// Whether prev/next navigation has anywhere to go.
    #[must_use]
    pub fn can_navigate(&self) -> bool {
        self.images.len() > 1
    }

    /// Index reached from `current` by `step`, wrapping at both ends.
    ///
    /// Returns `None` when fewer than two images exist or `current` is out of range.
    #[must_use]
    pub fn step_from(&self, current: usize, step: Step) -> Option<usize> {
        step_index(current, step, self.images.len())
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }
}

/// `(current + step + len) mod len`, computed without leaving `usize`.
#[must_use]
pub fn step_index(current: usize, step: Step, len: usize) -> Option<usize> {
    if len < 2 || current >= len {
        return None;
    }
    let shifted = (current + len).checked_add_signed(step.offset())?;
    Some(shifted % len)
}
