// src/exec/pump.rs

//! Multiplexes the child's stdout and stderr line streams into the UI sink.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::ui::SharedUi;

/// Spawn the output pump.
///
/// Stdout lines are forwarded as output, stderr lines as info. Lines from
/// the same stream keep their emission order; no ordering is guaranteed
/// between interleaved streams beyond arrival order.
///
/// The returned token is cancelled once **both** streams have closed; it
/// is observed by the coordinator (drain-before-return) and by the
/// cancellation watcher (nothing left to stop).
pub fn spawn_output_pump(
    mut stdout: mpsc::Receiver<String>,
    mut stderr: mpsc::Receiver<String>,
    ui: SharedUi,
) -> CancellationToken {
    let drained = CancellationToken::new();
    let done = drained.clone();

    tokio::spawn(async move {
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout.recv(), if stdout_open => match line {
                    Some(line) => ui.output(&line),
                    None => stdout_open = false,
                },
                line = stderr.recv(), if stderr_open => match line {
                    Some(line) => ui.info(&line),
                    None => stderr_open = false,
                },
            }
        }

        done.cancel();
    });

    drained
}
