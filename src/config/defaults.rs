// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Overlay**: backdrop color and fade timing
//! - **Controls**: which controls are rendered by default
//! - **Zoom**: scale applied by the click-to-zoom toggle

// ==========================================================================
// Overlay Defaults
// ==========================================================================

/// Default overlay background. Empty means "leave it to the stylesheet".
pub const DEFAULT_OVERLAY_COLOR: &str = "";

/// Default fade duration of the overlay exit transition (in milliseconds).
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 300;

/// Minimum fade duration (in milliseconds).
pub const MIN_ANIMATION_DURATION_MS: u64 = 0;

/// Maximum fade duration (in milliseconds).
pub const MAX_ANIMATION_DURATION_MS: u64 = 5_000;

// ==========================================================================
// Control Defaults
// ==========================================================================

/// Whether a close control is rendered.
pub const DEFAULT_CLOSE_BUTTON: bool = true;

/// Whether Escape / arrow keys are routed while open.
pub const DEFAULT_KEYBOARD: bool = true;

/// Whether prev/next controls are rendered (only when more than one image exists).
pub const DEFAULT_NAVIGATION: bool = true;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Scale factor applied to the displayed image while zoomed.
pub const ZOOM_SCALE: f32 = 2.0;

/// Scale factor of the displayed image while not zoomed.
pub const UNZOOMED_SCALE: f32 = 1.0;
