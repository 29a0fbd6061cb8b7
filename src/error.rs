//! Error types for label rendering.
//!
//! Only unrecoverable conditions show up here. Font fallbacks and the
//! auto-fit size floor are degradations: they are logged and rendering
//! carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rendering operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested print width can not hold any pixel.
    ///
    /// Rejected at the API boundary, before any font is loaded or any
    /// canvas is allocated.
    #[error("Invalid target width: {0}")]
    InvalidTargetWidth(u32),

    #[error("Invalid font size: {0}")]
    InvalidFontSize(u32),

    /// Invalid configuration parameter provided.
    #[error("Invalid configuration parameter: {0}")]
    InvalidConfig(String),

    /// A single font candidate could not be opened or parsed.
    ///
    /// The resolver swallows this and moves on to the next candidate, so it
    /// only surfaces from direct calls to [`crate::FontFace::open`].
    #[error("Could not load font {path:?}: {reason}")]
    FontLoad { path: PathBuf, reason: String },

    /// The text-measurement capability failed for a line.
    #[error("Could not measure line {line:?}: {reason}")]
    Measurement { line: String, reason: String },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn font_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::FontLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn measurement(line: &str, reason: impl ToString) -> Self {
        Error::Measurement {
            line: line.to_string(),
            reason: reason.to_string(),
        }
    }
}
