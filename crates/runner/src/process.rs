// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Subject process execution.
//!
//! Spawns the subject with stdin closed and drains stdout and stderr
//! concurrently in fixed-size chunks. Draining one stream at a time risks a
//! pipe-buffer deadlock when the unread stream fills while the child blocks
//! writing to it, so both reads are multiplexed over one readiness wait.
//! Output is returned as raw bytes; no encoding is assumed.

use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

const READ_CHUNK: usize = 4096;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {command}: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    #[error("I/O error capturing output: {0}")]
    Capture(#[from] std::io::Error),
}

/// Output of one completed invocation.
#[derive(Debug)]
pub struct Captured {
    /// Exit code; a signal death maps to `128 + signo`.
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Result of one invocation against an optional deadline.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(Captured),
    /// Deadline exceeded; the child was force-killed. Holds whatever output
    /// was captured before the kill.
    TimedOut { stdout: Vec<u8>, stderr: Vec<u8> },
}

/// Run `argv` to completion, capturing both streams.
///
/// With `deadline` set, a run exceeding it is killed and reported as
/// [`RunOutcome::TimedOut`]; with `None` a hung subject blocks forever.
pub async fn run(argv: &[String], deadline: Option<Duration>) -> Result<RunOutcome, ProcessError> {
    let (program, args) = match argv.split_first() {
        Some(split) => split,
        None => {
            return Err(ProcessError::Launch {
                command: String::new(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty argv"),
            })
        }
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessError::Launch {
            command: argv.join(" "),
            source,
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let mut out_buf = Vec::new();
    let mut err_buf = Vec::new();

    // Both drains progress under a single readiness-multiplexed wait; each
    // stream leaves the set on its zero-length read. The child is reaped
    // only after both streams hit end-of-stream.
    let capture = async {
        tokio::try_join!(
            drain_into(stdout, &mut out_buf),
            drain_into(stderr, &mut err_buf)
        )?;
        child.wait().await
    };

    let status = match deadline {
        None => capture.await?,
        Some(limit) => match tokio::time::timeout(limit, capture).await {
            Ok(done) => done?,
            Err(_) => {
                let _ = child.start_kill();
                let _ = child.wait().await;
                return Ok(RunOutcome::TimedOut {
                    stdout: out_buf,
                    stderr: err_buf,
                });
            }
        },
    };

    Ok(RunOutcome::Completed(Captured {
        exit_code: exit_code_of(status),
        stdout: out_buf,
        stderr: err_buf,
    }))
}

async fn drain_into<R: AsyncRead + Unpin>(
    stream: Option<R>,
    buf: &mut Vec<u8>,
) -> std::io::Result<()> {
    let Some(mut stream) = stream else {
        return Ok(());
    };
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(()); // end-of-stream
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn exit_code_of(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signo) = status.signal() {
            return 128 + signo;
        }
    }
    status.code().unwrap_or(1)
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
