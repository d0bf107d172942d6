// src/exec/context.rs

//! Immutable description of one shell-action invocation.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

/// Everything the executor needs to run one action.
///
/// Owned by the caller; the executor never mutates it.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Shell fragment to execute via `sh -c`.
    pub script: String,

    /// Identifier used in diagnostics and failure messages.
    pub script_name: String,

    /// Absolute project directory; the script runs with this as its
    /// working directory.
    pub project_path: PathBuf,

    /// Resolved local plan directory.
    pub local_plan_path: PathBuf,

    /// Scratch directory handed to the script as `tmp`/`shuttle_tmp`.
    pub temp_directory_path: PathBuf,

    /// Extra `KEY=VALUE` variables for the script. Keys are unique; order
    /// is irrelevant.
    pub args: HashMap<String, String>,

    /// Correlation id propagated to the child as `SHUTTLE_CONTEXT_ID`.
    pub context_id: String,

    /// Caller-owned cancellation signal; cancelling it stops the script.
    pub cancellation: CancellationToken,
}

/// Final state of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
    /// Exit code; `-1` when the process was terminated by a signal.
    pub code: i32,

    /// True when the process did not exit on its own (killed or stopped).
    pub stopped: bool,
}
