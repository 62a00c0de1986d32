// SPDX-License-Identifier: MPL-2.0
//! Crate error type.
//!
//! The controller itself never fails: every misuse degrades to a no-op.
//! Errors only surface from configuration IO and from the replay driver's
//! argument and script parsing.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid arguments: {0}")]
    Arguments(#[from] pico_args::Error),

    #[error("invalid replay step `{step}`: {reason}")]
    InvalidScript { step: String, reason: &'static str },
}

impl Error {
    /// Builds an [`Error::InvalidScript`] for the given step text.
    #[must_use]
    pub fn invalid_script(step: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidScript {
            step: step.into(),
            reason,
        }
    }
}
