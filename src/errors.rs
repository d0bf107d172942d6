// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

/// Classification code surfaced when a script runs and exits non-zero.
///
/// Fixed so callers can tell "your script failed" apart from executor
/// errors at the process boundary.
pub const SCRIPT_FAILURE_CODE: i32 = 4;

#[derive(Error, Debug)]
pub enum ShuttleError {
    /// Environment construction failed before any process was started.
    #[error("failed setting up cmd env variables: {0}")]
    Setup(#[source] anyhow::Error),

    /// The script ran to completion and exited non-zero.
    #[error(
        "Failed executing script `{script_name}`: shell script `{script}`\nExit code: {exit_code}"
    )]
    ScriptFailure {
        script_name: String,
        script: String,
        exit_code: i32,
    },

    /// The caller's cancellation signal fired before the script finished.
    #[error("context cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShuttleError {
    /// Exit code this error maps to at the process boundary.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShuttleError::ScriptFailure { .. } => SCRIPT_FAILURE_CODE,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShuttleError>;
