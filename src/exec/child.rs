// src/exec/child.rs

//! Runs the real pipeline executable.

use std::future::Future;
use std::io::{self, BufRead, BufReader, PipeReader};
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::engine::RunEvent;
use crate::types::{FailureKind, RunOutcome};

use super::backend::{Invocation, ProcessBackend};
use super::protocol::LineFold;

/// Production backend: one OS process per run.
#[derive(Debug, Clone, Default)]
pub struct ChildProcessBackend;

impl ChildProcessBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessBackend for ChildProcessBackend {
    fn run(
        &mut self,
        invocation: Invocation,
        events: mpsc::UnboundedSender<RunEvent>,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + '_>> {
        Box::pin(run_child(invocation, events))
    }
}

/// Spawn the executable, fold its combined output and wait for it to exit.
///
/// stdout and stderr share one OS pipe, so lines reach the fold in the order
/// the child wrote them. The pipe is read to EOF before the process is
/// awaited, so a chatty child can never block on a full pipe.
pub async fn run_child(
    invocation: Invocation,
    events: mpsc::UnboundedSender<RunEvent>,
) -> RunOutcome {
    info!(
        executable = %invocation.program.display(),
        args = ?invocation.args,
        cwd = %invocation.working_dir.display(),
        "starting pipeline process"
    );

    let (reader, writer) = match combined_output_pipe() {
        Ok(pipe) => pipe,
        Err(e) => {
            error!(error = %e, "failed to create the output pipe");
            return RunOutcome::failure(
                FailureKind::StreamUnavailable,
                format!("could not open the process output stream: {e}"),
            );
        }
    };

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .current_dir(&invocation.working_dir)
        .stdin(Stdio::null())
        .stdout(writer.stdout)
        .stderr(writer.stderr);
    hide_console_window(&mut cmd);

    let spawned = cmd.spawn();
    // The command holds the parent's copies of the write end; the reader only
    // sees EOF once they are gone.
    drop(cmd);

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            error!(
                executable = %invocation.program.display(),
                error = %e,
                "failed to spawn pipeline process"
            );
            return RunOutcome::failure(
                FailureKind::SpawnFailed,
                format!("could not start {}: {e}", invocation.program.display()),
            );
        }
    };

    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    spawn_line_reader(reader, line_tx);

    let mut fold = LineFold::new();
    while let Some(line) = line_rx.recv().await {
        debug!("output: {}", line.trim_end());
        if let Some(event) = fold.push(&line) {
            debug!(percent = event.percent, "pipeline progress");
            // A caller that stopped listening does not stop the run.
            let _ = events.send(RunEvent::Progress(event));
        }
    }

    let status = match child.wait().await {
        Ok(status) => status,
        Err(e) => {
            error!(error = %e, "waiting for pipeline process failed");
            return RunOutcome::failure(
                FailureKind::StreamUnavailable,
                format!("waiting for the pipeline process failed: {e}"),
            );
        }
    };

    info!(
        exit_code = status.code().unwrap_or(-1),
        success = status.success(),
        "pipeline process exited"
    );

    fold.finish(status.code())
}

/// Write ends handed to the child, one per output stream.
struct PipeWriters {
    stdout: Stdio,
    stderr: Stdio,
}

fn combined_output_pipe() -> io::Result<(PipeReader, PipeWriters)> {
    let (reader, writer) = io::pipe()?;
    let stderr = writer.try_clone()?;
    Ok((
        reader,
        PipeWriters {
            stdout: Stdio::from(writer),
            stderr: Stdio::from(stderr),
        },
    ))
}

/// Forward every line of `pipe` to `tx` until EOF.
///
/// Runs on the blocking pool. Bytes are decoded lossily so a stray non-UTF-8
/// byte does not end the run.
fn spawn_line_reader(pipe: PipeReader, tx: mpsc::UnboundedSender<String>) {
    tokio::task::spawn_blocking(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "reading pipeline output failed");
                    break;
                }
            }
        }

        debug!("output reader finished");
    });
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}
