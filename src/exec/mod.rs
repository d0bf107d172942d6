// src/exec/mod.rs

//! Supervised shell-action execution.
//!
//! This module launches a user-supplied shell fragment as a child process,
//! streams its output while it runs, and supports cooperative cancellation.
//!
//! - [`context`] defines the immutable [`ExecutionContext`] and exit status.
//! - [`env`] builds the deterministic child environment.
//! - [`pathconv`] translates Windows paths for Git Bash.
//! - [`runner`] owns the child process lifecycle.
//! - [`pump`] drains stdout/stderr into the UI sink.
//! - [`shell`] is the coordinator that ties everything together.

pub mod context;
pub mod env;
pub mod pathconv;
pub mod pump;
pub mod runner;
pub mod shell;

pub use context::{ExecutionContext, ExitStatus};
pub use pathconv::PathResolver;
pub use runner::ProcessHandle;
pub use shell::execute_shell;
