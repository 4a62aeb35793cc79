//! Unified error types for SMITE with fail-open philosophy.
//!
//! Hooks must never interrupt the host workflow. Errors are carried as
//! values up to the top-level wrapper, which logs them and still reports
//! success. Recovered errors (bad payloads, missing state) never reach
//! this type at all; they are modelled as explicit fallback variants.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for SMITE operations.
#[derive(Error, Debug)]
pub enum SmiteError {
    /// I/O errors from state or config file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// JSON serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },
}

/// A specialized Result type for SMITE operations.
pub type Result<T> = std::result::Result<T, SmiteError>;

impl SmiteError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<io::Error> for SmiteError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for SmiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Logs the error and substitutes a safe value instead of propagating.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the SMITE CLI.
pub mod exit_codes {
    /// The only status a hook ever reports, on success and failure alike.
    pub const SUCCESS: i32 = 0;

    /// Non-hook commands (`status`, `init`) report failures with this.
    pub const ERROR: i32 = 1;
}
