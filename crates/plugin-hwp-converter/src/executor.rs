//! Engine process execution.
//!
//! Runs the external engine as a child process, accumulates its output
//! streams, and resolves exactly once with either a launch failure or the
//! exit status plus captured output. A non-zero exit is data, not an error.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::models::{EngineInvocation, EngineResult, InvocationOutcome};

/// Read buffer size for engine output streams.
const CHUNK_SIZE: usize = 8 * 1024;

/// Trait for anything that can run an engine invocation to completion.
#[async_trait]
pub trait EngineRunner: Send + Sync + std::fmt::Debug {
    /// Run `invocation` and resolve with its single terminal outcome.
    async fn invoke(&self, invocation: &EngineInvocation) -> InvocationOutcome;
}

/// Runs engine invocations as OS processes.
///
/// There is no timeout and no cancellation: a started engine runs until it
/// exits. Each call owns its child process, so calls may run concurrently.
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    /// Create a new invoker.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EngineRunner for ProcessInvoker {
    async fn invoke(&self, invocation: &EngineInvocation) -> InvocationOutcome {
        let mut cmd = Command::new(&invocation.executable);

        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x08000000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd.args(&invocation.args)
            .current_dir(&invocation.working_directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(
            executable = %invocation.executable,
            args = ?invocation.args,
            cwd = %invocation.working_directory,
            "Spawning engine process"
        );

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                error!(
                    executable = %invocation.executable,
                    error = %e,
                    "Failed to start engine process"
                );
                return InvocationOutcome::LaunchFailure {
                    message: e.to_string(),
                };
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Drain both pipes while waiting so a chatty engine cannot block on a
        // full pipe buffer.
        let (status, stdout, stderr) = tokio::join!(
            child.wait(),
            collect_stream(stdout, StreamKind::Stdout),
            collect_stream(stderr, StreamKind::Stderr),
        );

        match status {
            Ok(status) => {
                let exit_code = status.code().unwrap_or(-1);
                info!(exit_code, "Engine process exited");
                InvocationOutcome::Exited(EngineResult {
                    exit_code,
                    stdout,
                    stderr,
                })
            }
            Err(e) => {
                error!(error = %e, "Failed to wait for engine process");
                InvocationOutcome::LaunchFailure {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StreamKind {
    Stdout,
    Stderr,
}

/// Accumulate a child stream chunk by chunk, logging each chunk.
async fn collect_stream<R>(stream: Option<R>, kind: StreamKind) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return String::new();
    };

    let mut collected = Vec::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let chunk = String::from_utf8_lossy(&buf[..n]);
                match kind {
                    StreamKind::Stdout => debug!(chunk = %chunk.trim_end(), "engine stdout"),
                    StreamKind::Stderr => warn!(chunk = %chunk.trim_end(), "engine stderr"),
                }
                collected.extend_from_slice(&buf[..n]);
            }
            Err(e) => {
                warn!(stream = ?kind, error = %e, "Failed to read engine output");
                break;
            }
        }
    }

    String::from_utf8_lossy(&collected).into_owned()
}
