//! Error types for the viewer core.
//!
//! None of these are fatal. The coordinator clamps out-of-range input,
//! defers work on surfaces that are not laid out yet and ignores input that
//! does not fit the current mode; these variants exist so the inner layers
//! can report which of those happened.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::SurfaceId;

/// Errors that can occur inside the viewer core.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// The bound image element has no layout box yet
    #[error("Surface {surface:?} is not ready: bound element has no layout box")]
    SurfaceNotReady {
        /// The surface that could not be sized or drawn
        surface: SurfaceId,
    },

    /// Input that does not apply in the current view or drawing mode
    #[error("Invalid mode transition: {message}")]
    InvalidModeTransition {
        /// What was attempted
        message: String,
    },

    /// A color string that could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(#[from] dualview_ui::ColorError),

    /// A drawing backend that could not be bound
    #[error("Surface setup failed: {0}")]
    SurfaceSetup(#[from] dualview_ui::SurfaceError),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error while reading config or session files
    #[error("IO error reading {path:?}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config written by a newer version of the viewer
    #[error("Config version mismatch: expected at most {expected}, found {found}")]
    VersionMismatch {
        /// Highest supported version
        expected: u32,
        /// Version found in the file
        found: u32,
    },
}

impl ViewerError {
    /// Create an invalid mode transition error with a message.
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidModeTransition {
            message: message.into(),
        }
    }

    /// Create an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
