// SPDX-License-Identifier: MPL-2.0
//! Value objects shared by the controller sub-components.

use std::time::Duration;

use crate::config::defaults::{
    DEFAULT_ANIMATION_DURATION_MS, MAX_ANIMATION_DURATION_MS, MIN_ANIMATION_DURATION_MS,
};

// =============================================================================
// AnimationDuration
// =============================================================================

/// Length of the overlay fade-out, in milliseconds.
///
/// Values are clamped to the supported range on construction.
///
/// # Example
///
/// ```
/// use lightbox::domain::AnimationDuration;
///
/// assert_eq!(AnimationDuration::new(250).millis(), 250);
/// assert_eq!(AnimationDuration::new(60_000).millis(), 5_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationDuration(u64);

impl AnimationDuration {
    /// Creates a duration, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_ANIMATION_DURATION_MS, MAX_ANIMATION_DURATION_MS))
    }

    /// Returns the raw value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for AnimationDuration {
    fn default() -> Self {
        Self(DEFAULT_ANIMATION_DURATION_MS)
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Monotonic lifecycle counter.
///
/// Every open, close and destroy moves to the next generation. Deferred
/// callbacks capture the generation current at schedule time and are dropped
/// when it no longer matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Returns the following generation.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_duration_clamps() {
        assert_eq!(AnimationDuration::new(0).millis(), MIN_ANIMATION_DURATION_MS);
        assert_eq!(
            AnimationDuration::new(u64::MAX).millis(),
            MAX_ANIMATION_DURATION_MS
        );
    }

    #[test]
    fn animation_duration_default_is_300ms() {
        assert_eq!(
            AnimationDuration::default().as_duration(),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn generation_is_monotonic() {
        let first = Generation::default();
        let second = first.next();
        assert!(second > first);
        assert_ne!(second.next(), second);
    }
}
