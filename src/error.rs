//! Error types for the to-do manager.
//!
//! Recoverable errors (unknown id, bad input, bad status) are reported by the
//! shell and the menu loop carries on. Storage failures are fatal and end the
//! process with a non-zero exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes.
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Main error type for task operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Task with ID {0} not found!")]
    NotFound(u64),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Status must be 'Complete' or 'Incomplete', got '{0}'")]
    InvalidStatus(String),

    #[error("Failed to write task file {path}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the shell should report this error and return to the menu.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::InvalidInput(_) | Error::InvalidStatus(_)
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }
}

/// Result type alias for task operations.
pub type Result<T> = std::result::Result<T, Error>;
