// SPDX-License-Identifier: MPL-2.0
//! Inline SVG markup for the overlay controls.

pub const CLOSE: &str = r##"<svg width="20" height="20" viewBox="0 0 20 20" aria-hidden="true"><path d="M2 2L18 18M18 2L2 18" stroke="#fff" stroke-width="1.5"/></svg>"##;

pub const PREVIOUS: &str = r##"<svg width="14" height="24" viewBox="0 0 14 24" aria-hidden="true"><path d="M12.5 1.5L1.5 12L12.5 22.5" fill="none" stroke="#fff" stroke-width="1.5"/></svg>"##;

pub const NEXT: &str = r##"<svg width="14" height="24" viewBox="0 0 14 24" aria-hidden="true"><path d="M1.5 1.5L12.5 12L1.5 22.5" fill="none" stroke="#fff" stroke-width="1.5"/></svg>"##;
