// SPDX-License-Identifier: MPL-2.0
//! Localisation of the user-visible strings the overlay renders.
//!
//! Uses the Fluent localisation system with `.ftl` resources embedded at
//! build time. Locale resolution order: explicit argument, options, OS
//! locale, then `en-US`.

pub mod fluent;
