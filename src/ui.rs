// src/ui.rs

//! UI sink the executor reports through.
//!
//! The executor never prints directly; it hands lines to a [`UiSink`] so
//! the binary can render to the terminal while tests capture everything.

use std::sync::Arc;

/// Line-oriented sink for script output and executor diagnostics.
pub trait UiSink: Send + Sync {
    /// Low-importance diagnostics, e.g. the constructed command line.
    fn verbose(&self, line: &str);

    /// A stdout line produced by the script.
    fn output(&self, line: &str);

    /// A stderr line produced by the script. Not an error: shells commonly
    /// emit diagnostics on stderr without failing.
    fn info(&self, line: &str);

    /// Executor-level errors, e.g. a failed stop request.
    fn error(&self, line: &str);
}

pub type SharedUi = Arc<dyn UiSink>;

/// Terminal UI used by the binary.
///
/// Script stdout goes to stdout so it can be piped; everything else goes
/// to stderr or the log.
pub struct ConsoleUi;

impl UiSink for ConsoleUi {
    fn verbose(&self, line: &str) {
        tracing::debug!("{line}");
    }

    fn output(&self, line: &str) {
        println!("{line}");
    }

    fn info(&self, line: &str) {
        eprintln!("{line}");
    }

    fn error(&self, line: &str) {
        eprintln!("error: {line}");
    }
}
