//! Structured error types for comparisons, configuration and reporting.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // I/O errors
    IoError,
    LoadFailed,

    // Configuration errors
    ConfigValidation,
    ConfigParse,
    ConfigAlreadyExists,

    // Reporting errors
    UnsupportedFormat,
    EncodeFailed,
}

/// Every failure the library can surface to the CLI.
#[derive(Debug, Error)]
pub enum DiffError {
    /// File read, write or create failure.
    #[error("{op}: {source}")]
    Io {
        op: String,
        #[source]
        source: io::Error,
    },

    /// A loader failure, tagged with which side of the comparison failed.
    #[error("failed to load {role} data: {source}")]
    Load {
        role: &'static str,
        #[source]
        source: Box<DiffError>,
    },

    #[error("invalid configuration: {0}")]
    ConfigValidation(String),

    #[error("failed to parse config file {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("config file already exists: {}", .0.display())]
    ConfigAlreadyExists(PathBuf),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to encode {format} report: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
}

impl DiffError {
    pub fn io(op: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            op: op.into(),
            source,
        }
    }

    pub fn load(role: &'static str, source: DiffError) -> Self {
        Self::Load {
            role,
            source: Box::new(source),
        }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::ConfigValidation(reason.into())
    }

    pub fn encode(format: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Encode {
            format,
            message: err.to_string(),
        }
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DiffError::Io { .. } => ErrorCode::IoError,
            DiffError::Load { .. } => ErrorCode::LoadFailed,
            DiffError::ConfigValidation(_) => ErrorCode::ConfigValidation,
            DiffError::ConfigParse { .. } => ErrorCode::ConfigParse,
            DiffError::ConfigAlreadyExists(_) => ErrorCode::ConfigAlreadyExists,
            DiffError::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            DiffError::Encode { .. } => ErrorCode::EncodeFailed,
        }
    }
}

/// Result type for library operations.
pub type DiffResult<T> = std::result::Result<T, DiffError>;
