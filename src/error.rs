//! Global error handling for filexport
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for filexport operations
#[derive(Error, Debug)]
pub enum FileExportError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A file in the batch could not be read; the whole batch is discarded
    #[error("Failed to read {name}: {source}")]
    Read {
        /// Declared name of the file that failed
        name: String,
        /// Underlying IO failure
        #[source]
        source: io::Error,
    },

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export format tag that is not one of json, xml or markdown
    #[error("Unknown export format: {0} (expected json, xml or markdown)")]
    UnknownFormat(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for filexport operations
pub type Result<T> = std::result::Result<T, FileExportError>;

/// Creates a FileExportError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FileExportError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
