//! FFmpeg execution adapter
//!
//! Runs a `CommandPlan` as a child process. Diagnostic output is captured
//! rather than shown live and is only surfaced when the run fails. The wait
//! can be interrupted with Ctrl-C or through the adapter's cancel handle;
//! either way the child is killed before returning.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::Notify;
use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::planner::CommandPlan;
use crate::ports::*;

/// Default executable name searched on PATH
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: String,
    cancel: Arc<Notify>,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter for the given executable name or path
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cancel: Arc::new(Notify::new()),
        }
    }

    /// Handle that interrupts a running (or the next) execution when notified
    pub fn cancel_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.cancel)
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_FFMPEG)
    }
}

/// Resolves when the user presses Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn locate_tool(&self) -> Result<PathBuf, DomainError> {
        match which::which(&self.program) {
            Ok(path) => {
                debug!(tool = %path.display(), "Located media tool");
                Ok(path)
            }
            Err(e) => {
                debug!(tool = %self.program, "Media tool lookup failed: {}", e);
                Err(DomainError::ToolNotFound {
                    tool: self.program.clone(),
                })
            }
        }
    }

    async fn execute(&self, plan: &CommandPlan) -> Result<ExecutionOutcome, DomainError> {
        self.run_until(plan, interrupted()).await
    }
}

impl FFmpegAdapter {
    /// Run the plan, killing the child if `interrupt` resolves first
    async fn run_until<F>(&self, plan: &CommandPlan, interrupt: F) -> Result<ExecutionOutcome, DomainError>
    where
        F: Future<Output = ()> + Send,
    {
        info!(
            program = %plan.program,
            inputs = plan.inputs.len(),
            subtitles = plan.subtitle_streams.len(),
            "Launching media tool"
        );
        debug!(command = %plan.command_line(), "Full command line");

        let mut child = Command::new(&plan.program)
            .args(plan.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DomainError::ToolNotFound {
                    tool: plan.program.clone(),
                },
                _ => DomainError::Io(e),
            })?;

        // Drain stderr concurrently so a chatty tool never blocks on a full pipe
        let mut stderr = child.stderr.take().ok_or_else(|| {
            DomainError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "child stderr was not captured",
            ))
        })?;
        let collector = tokio::spawn(async move {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf).await.map(|_| buf)
        });

        let status = tokio::select! {
            status = child.wait() => status?,
            _ = self.cancel.notified() => {
                warn!("Cancellation requested, terminating media tool");
                child.kill().await?;
                collector.abort();
                return Err(DomainError::Cancelled);
            }
            _ = interrupt => {
                warn!("Interrupted, terminating media tool");
                child.kill().await?;
                collector.abort();
                return Err(DomainError::Cancelled);
            }
        };

        let diagnostics = match collector.await {
            Ok(Ok(buf)) => String::from_utf8_lossy(&buf).trim_end().to_string(),
            Ok(Err(e)) => return Err(DomainError::Io(e)),
            Err(e) => {
                return Err(DomainError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("stderr reader failed: {}", e),
                )))
            }
        };

        if status.success() {
            info!(output = %plan.output_path.display(), "Media tool finished");
            Ok(ExecutionOutcome {
                output_path: plan.output_path.clone(),
                diagnostics,
            })
        } else {
            error!(exit_code = ?status.code(), "Media tool failed");
            Err(DomainError::ExternalToolFailure {
                exit_code: status.code(),
                diagnostics,
            })
        }
    }
}
