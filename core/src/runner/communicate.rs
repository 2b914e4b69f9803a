//! Deadlock-free single-shot exchange with a spawned child process.
//!
//! The child may start emitting output before it has consumed all of its
//! input, and pipe buffers are bounded, so the stdin write and the two drains
//! run as separate tasks. A strictly sequential write-then-read would wedge
//! once both sides block on full pipes.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Child;
use tokio::task::JoinHandle;

use crate::error::RunnerError;

use super::InvocationResult;

/// Writes `input` to the child's stdin, closes it, drains stdout and stderr
/// to EOF concurrently, and waits for the child to exit.
///
/// A broken pipe on stdin is not an error here: it means the child stopped
/// reading early, and its exit status carries the story.
pub async fn communicate(mut child: Child, input: Vec<u8>) -> Result<InvocationResult, RunnerError> {
    let stdin = child.stdin.take();
    let out_task = drain(child.stdout.take(), "stdout");
    let err_task = drain(child.stderr.take(), "stderr");

    let write_task: JoinHandle<Result<(), std::io::Error>> = tokio::spawn(async move {
        if let Some(mut stdin) = stdin {
            stdin.write_all(&input).await?;
            // Dropping the handle after shutdown closes the pipe, signalling
            // end-of-input to the child.
            stdin.shutdown().await?;
        }
        Ok(())
    });

    // Join all three tasks and reap the child before inspecting any failure:
    // an early return must not leave detached tasks or an unwaited process.
    let write_res = write_task.await;
    let out_res = out_task.await;
    let err_res = err_task.await;
    let wait_res = child.wait().await;

    match write_res.map_err(|e| join_failure("stdin", e))? {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            return Err(RunnerError::StreamIo {
                stream: "stdin",
                source: e,
            })
        }
        Ok(()) => {}
    }

    let stdout = out_res.map_err(|e| join_failure("stdout", e))??;
    let stderr = err_res.map_err(|e| join_failure("stderr", e))??;

    let status = wait_res.map_err(|e| RunnerError::StreamIo {
        stream: "wait",
        source: e,
    })?;
    let exit_code = normalize_exit(status);
    tracing::debug!(
        exit_code,
        stdout_bytes = stdout.len(),
        stderr_bytes = stderr.len(),
        "model runner exited"
    );

    Ok(InvocationResult {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        exit_code,
    })
}

fn drain<R>(
    rd: Option<R>,
    label: &'static str,
) -> JoinHandle<Result<Vec<u8>, RunnerError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut rd) = rd {
            rd.read_to_end(&mut buf)
                .await
                .map_err(|e| RunnerError::StreamIo {
                    stream: label,
                    source: e,
                })?;
        }
        Ok(buf)
    })
}

fn join_failure(stream: &'static str, e: tokio::task::JoinError) -> RunnerError {
    RunnerError::StreamIo {
        stream,
        source: std::io::Error::other(e),
    }
}

fn normalize_exit(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else if let Some(sig) = status.signal() {
            128 + sig
        } else {
            1
        }
    }
    #[cfg(windows)]
    {
        status.code().unwrap_or(1)
    }
}
