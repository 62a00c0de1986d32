// SPDX-License-Identifier: MPL-2.0
//! Controller options and their TOML persistence.
//!
//! Options are resolved once, when a [`Lightbox`](crate::Lightbox) is built,
//! and are read-only afterwards. Field names follow the recognised option
//! keys (`overlayColor`, `closeButton`, `keyboard`, `navigation`); any key
//! left out takes its default.
//!
//! # Examples
//!
//! ```no_run
//! use lightbox::config::{self, Options};
//! use std::path::PathBuf;
//!
//! let mut options = config::load().unwrap_or_default();
//! options.overlay_color = "rgba(0, 0, 0, 0.9)".to_string();
//!
//! let path = PathBuf::from("./lightbox.toml");
//! config::save_to_path(&options, &path).expect("Failed to save options");
//! let loaded = config::load_from_path(&path).expect("Failed to load options");
//! assert_eq!(loaded.overlay_color, options.overlay_color);
//! ```

pub mod defaults;

use crate::domain::AnimationDuration;
use crate::error::{Error, Result};
use defaults::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_CLOSE_BUTTON, DEFAULT_KEYBOARD, DEFAULT_NAVIGATION,
    DEFAULT_OVERLAY_COLOR,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "lightbox.toml";
const APP_NAME: &str = "Lightbox";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// CSS color applied to the overlay backdrop; empty leaves it to the stylesheet.
    pub overlay_color: String,
    /// Render a close control.
    pub close_button: bool,
    /// Route Escape / ArrowLeft / ArrowRight while open.
    pub keyboard: bool,
    /// Render prev/next controls when more than one image exists.
    pub navigation: bool,
    /// Fade-out length before the overlay leaves the layout, in milliseconds.
    pub animation_duration: u64,
    /// Locale for user-visible strings (e.g. `"fr"`); `None` follows the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            overlay_color: DEFAULT_OVERLAY_COLOR.to_string(),
            close_button: DEFAULT_CLOSE_BUTTON,
            keyboard: DEFAULT_KEYBOARD,
            navigation: DEFAULT_NAVIGATION,
            animation_duration: DEFAULT_ANIMATION_DURATION_MS,
            language: None,
        }
    }
}

impl Options {
    /// Fade duration as a clamped value object.
    #[must_use]
    pub fn animation(&self) -> AnimationDuration {
        AnimationDuration::new(self.animation_duration)
    }

    /// Parses options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] when the text is not valid TOML for [`Options`].
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: PathBuf::new(),
            source,
        })
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads options from the platform config directory, or defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load() -> Result<Options> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Options::default())
}

/// Saves options to the platform config directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save(options: &Options) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(options, &path);
    }
    Ok(())
}

/// Loads options from `path`. Malformed TOML falls back to defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Options> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(options) => Ok(options),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Invalid options file, using defaults");
            Ok(Options::default())
        }
    }
}

/// Saves options to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(options: &Options, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options)?;
    fs::write(path, content)?;
    Ok(())
}
