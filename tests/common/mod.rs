#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, Once};

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt};

use shuttle_exec::exec::ExecutionContext;
use shuttle_exec::ui::UiSink;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// One line received by the recording sink, tagged with its level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiLine {
    Verbose(String),
    Output(String),
    Info(String),
    Error(String),
}

/// UI sink that records every line for assertions.
#[derive(Debug, Default)]
pub struct RecordingUi {
    lines: Mutex<Vec<UiLine>>,
}

impl RecordingUi {
    pub fn new() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<UiLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn outputs(&self) -> Vec<String> {
        self.collect(|l| match l {
            UiLine::Output(s) => Some(s),
            _ => None,
        })
    }

    pub fn infos(&self) -> Vec<String> {
        self.collect(|l| match l {
            UiLine::Info(s) => Some(s),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.collect(|l| match l {
            UiLine::Error(s) => Some(s),
            _ => None,
        })
    }

    fn collect(&self, pick: fn(UiLine) -> Option<String>) -> Vec<String> {
        self.lines.lock().unwrap().iter().cloned().filter_map(pick).collect()
    }
}

impl UiSink for RecordingUi {
    fn verbose(&self, line: &str) {
        self.lines.lock().unwrap().push(UiLine::Verbose(line.to_string()));
    }

    fn output(&self, line: &str) {
        self.lines.lock().unwrap().push(UiLine::Output(line.to_string()));
    }

    fn info(&self, line: &str) {
        self.lines.lock().unwrap().push(UiLine::Info(line.to_string()));
    }

    fn error(&self, line: &str) {
        self.lines.lock().unwrap().push(UiLine::Error(line.to_string()));
    }
}

/// Execution context for a test script rooted at `project`.
pub fn test_context(script: &str, project: &Path) -> ExecutionContext {
    ExecutionContext {
        script: script.to_string(),
        script_name: "test-script".to_string(),
        project_path: project.to_path_buf(),
        local_plan_path: project.join("plan"),
        temp_directory_path: project.join("tmp"),
        args: HashMap::new(),
        context_id: "test-context".to_string(),
        cancellation: CancellationToken::new(),
    }
}
