// src/exec/runner.rs

//! Child process lifecycle: spawn, streamed output, stop, exit status.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::exec::context::ExitStatus;

/// Read buffer for child output. Generously sized so scripts producing
/// very long single lines are delivered without truncation or stalls.
pub const LINE_BUFFER_SIZE: usize = 512_000;

const LINE_CHANNEL_CAPACITY: usize = 1024;

/// Handle to a spawned script process.
///
/// The line receivers close independently of each other once their pipe
/// reaches end-of-stream; `status` fires once with the final exit status.
pub struct ProcessHandle {
    /// Stdout lines, in emission order.
    pub stdout: mpsc::Receiver<String>,
    /// Stderr lines, in emission order.
    pub stderr: mpsc::Receiver<String>,
    /// One-shot completion signal carrying the exit status.
    pub status: oneshot::Receiver<ExitStatus>,
    /// Best-effort termination handle.
    pub stop: StopHandle,
}

impl ProcessHandle {
    /// Spawn `sh -c <command>` with exactly the given environment.
    ///
    /// Entries are `NAME=VALUE`; later entries shadow earlier ones with the
    /// same name. Output is streamed, never buffered in the child.
    pub fn spawn(command: &str, env: &[String]) -> io::Result<ProcessHandle> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env_clear();

        for entry in env {
            if let Some((name, value)) = entry.split_once('=') {
                cmd.env(name, value);
            }
        }

        let mut child = cmd.spawn()?;
        let stdout = spawn_line_reader(child.stdout.take());
        let stderr = spawn_line_reader(child.stderr.take());
        let (status, stop) = spawn_waiter(child);

        Ok(ProcessHandle {
            stdout,
            stderr,
            status,
            stop,
        })
    }
}

/// Requests best-effort termination of the child.
///
/// Idempotent: the first request sends the kill signal, later requests (or
/// requests after the process has already exited) succeed without effect.
#[derive(Clone)]
pub struct StopHandle {
    tx: mpsc::Sender<oneshot::Sender<io::Result<()>>>,
}

impl StopHandle {
    /// Send a termination request. Does not wait for the process to die.
    pub async fn stop(&self) -> io::Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(ack_tx).await.is_err() {
            // Waiter is gone: the process already exited.
            return Ok(());
        }
        ack_rx.await.unwrap_or(Ok(()))
    }
}

/// Pump one output pipe into a line channel until end-of-stream.
///
/// Lines are read as raw bytes and converted lossily, so a line containing
/// invalid UTF-8 is delivered (with replacement characters) instead of
/// ending the stream and dropping everything after it. The channel closes
/// when the pipe is drained; a missing pipe yields an immediately-closed
/// channel.
fn spawn_line_reader<R>(stream: Option<R>) -> mpsc::Receiver<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_CHANNEL_CAPACITY);
    if let Some(stream) = stream {
        tokio::spawn(async move {
            let mut reader = BufReader::with_capacity(LINE_BUFFER_SIZE, stream);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf).await {
                    Ok(0) => break,
                    Ok(_) => {
                        if buf.last() == Some(&b'\n') {
                            buf.pop();
                            if buf.last() == Some(&b'\r') {
                                buf.pop();
                            }
                        }
                        let line = String::from_utf8_lossy(&buf).into_owned();
                        if tx.send(line).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "reading child output failed");
                        break;
                    }
                }
            }
        });
    }
    rx
}

/// Own the child in a single task: wait for exit and serve stop requests.
///
/// Single ownership means no lock is needed around the child; stop requests
/// travel over a channel and are acknowledged with the kill result.
fn spawn_waiter(mut child: Child) -> (oneshot::Receiver<ExitStatus>, StopHandle) {
    let (status_tx, status_rx) = oneshot::channel();
    let (stop_tx, mut stop_rx) = mpsc::channel::<oneshot::Sender<io::Result<()>>>(1);

    tokio::spawn(async move {
        let mut killed = false;
        let status = loop {
            tokio::select! {
                res = child.wait() => {
                    break match res {
                        Ok(status) => ExitStatus {
                            code: status.code().unwrap_or(-1),
                            stopped: killed || status.code().is_none(),
                        },
                        Err(err) => {
                            debug!(error = %err, "waiting on child process failed");
                            ExitStatus { code: -1, stopped: true }
                        }
                    };
                }
                Some(ack) = stop_rx.recv() => {
                    let res = if killed { Ok(()) } else { child.start_kill() };
                    killed = true;
                    let _ = ack.send(res);
                }
            }
        };
        let _ = status_tx.send(status);
    });

    (status_rx, StopHandle { tx: stop_tx })
}
