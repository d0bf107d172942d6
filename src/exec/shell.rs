// src/exec/shell.rs

//! Shell action execution.
//!
//! Ties the environment builder, process runner, output pump and
//! cancellation watcher together and blocks until the script completes or
//! the caller cancels.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{Result, ShuttleError};
use crate::exec::context::{ExecutionContext, ExitStatus};
use crate::exec::env::{build_environment, own_executable_dir};
use crate::exec::pathconv::PathResolver;
use crate::exec::pump::spawn_output_pump;
use crate::exec::runner::{ProcessHandle, StopHandle};
use crate::ui::SharedUi;

/// Execute one shell action.
///
/// On natural completion (success or failure) this returns only after
/// every output line has reached the UI sink. On cancellation the stop
/// request is best-effort and draining is not waited for; the stop request
/// may still be in flight when this returns.
///
/// The working-directory change is embedded in the script text with
/// single-quote wrapping, so project paths containing a single quote are
/// not supported.
pub async fn execute_shell(ctx: &ExecutionContext, ui: SharedUi) -> Result<()> {
    let resolver = PathResolver::for_host();
    let shuttle_dir = own_executable_dir().map_err(ShuttleError::Setup)?;
    let env = build_environment(ctx, resolver, &shuttle_dir)
        .await
        .map_err(ShuttleError::Setup)?;

    let command = format!("cd '{}'; {}", ctx.project_path.display(), ctx.script);
    ui.verbose(&format!("Starting shell command: sh -c {command}"));

    let ProcessHandle {
        stdout,
        stderr,
        status,
        stop,
    } = ProcessHandle::spawn(&command, &env)?;

    let drained = spawn_output_pump(stdout, stderr, ui.clone());
    spawn_cancel_watcher(
        ctx.cancellation.clone(),
        drained.clone(),
        stop,
        ctx.script.clone(),
        ui,
    );

    tokio::select! {
        status = status => {
            // Every line the child produced must reach the sink before we
            // report the outcome.
            drained.cancelled().await;

            let status = status.unwrap_or(ExitStatus { code: -1, stopped: true });
            if status.code > 0 {
                return Err(ShuttleError::ScriptFailure {
                    script_name: ctx.script_name.clone(),
                    script: ctx.script.clone(),
                    exit_code: status.code,
                });
            }
            Ok(())
        }
        _ = ctx.cancellation.cancelled() => Err(ShuttleError::Cancelled),
    }
}

/// Race the caller's cancellation against pump completion.
///
/// If cancellation wins, stop the process; a failed stop is reported to the
/// UI but never overrides the cancellation outcome. If the pump finishes
/// first there is nothing left to cancel.
fn spawn_cancel_watcher(
    cancellation: CancellationToken,
    drained: CancellationToken,
    stop: StopHandle,
    script: String,
    ui: SharedUi,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancellation.cancelled() => {
                if let Err(err) = stop.stop().await {
                    ui.error(&format!("Failed to stop script '{script}': {err}"));
                }
            }
            _ = drained.cancelled() => {
                debug!("output drained before cancellation; nothing to stop");
            }
        }
    });
}
