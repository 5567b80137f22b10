//! Error types for the shortcuts library.
//!
//! Missing optional resources (wallpaper, source art, shortcut sub-files) are
//! never errors; they are handled where they are read. Everything that reaches
//! this enum is something the caller has to decide about.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the shortcuts library.
#[derive(Debug, Error)]
pub enum ShortcutError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a shortcut directory: {0}")]
    NotAShortcut(PathBuf),

    #[error("Folder exists and is not a shortcut: {0}")]
    FolderInUse(PathBuf),

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Artwork errors
    #[error("Image error at {path:?}: {message}")]
    Image {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<image::ImageError>,
    },

    // Shortcut errors
    #[error("A shortcut for \"{display}\" ({tag}) already exists")]
    AlreadyExists { display: String, tag: String },

    #[error("\"{query}\" matches more than one shortcut: {}", .candidates.join(", "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

impl From<std::io::Error> for ShortcutError {
    fn from(err: std::io::Error) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ShortcutError {
    fn from(err: serde_json::Error) -> Self {
        ShortcutError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<image::ImageError> for ShortcutError {
    fn from(err: image::ImageError) -> Self {
        ShortcutError::Image {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl ShortcutError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ShortcutError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an IO error with a short description of the failed step.
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ShortcutError::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an image error with path context.
    pub fn image_with_path(err: image::ImageError, path: impl Into<PathBuf>) -> Self {
        ShortcutError::Image {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ShortcutError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the caller can expect a retry of the same call to behave differently.
    ///
    /// Only filesystem failures qualify; validation and duplicate errors are
    /// deterministic.
    pub fn is_transient(&self) -> bool {
        matches!(self, ShortcutError::Io { .. } | ShortcutError::Image { .. })
    }
}
