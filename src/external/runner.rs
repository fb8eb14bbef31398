use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};
use tokio::process::Command;
use which::which;

use crate::error::WordrunnerError;

/// How an external process ended.
#[derive(Debug)]
pub enum RunOutcome {
    Exited(ExitStatus),
    /// Operator pressed Ctrl-C while the process was running
    Interrupted,
}

impl RunOutcome {
    pub fn is_interrupted(&self) -> bool {
        matches!(self, RunOutcome::Interrupted)
    }
}

/// Fail early when a required binary is not installed.
pub fn require_tool(name: &str) -> Result<()> {
    which(name).map_err(|_| WordrunnerError::ToolMissing(name.to_string()))?;
    Ok(())
}

/// Run a command with inherited stdio until it exits or Ctrl-C arrives.
/// On Ctrl-C the child is killed and `Interrupted` is returned.
///
/// Once tokio has registered its SIGINT handler it stays installed for the rest of the
/// process, so Ctrl-C no longer terminates the program outside a running engine.
pub async fn run_interruptible(cmd: &str, args: &[String]) -> Result<RunOutcome> {
    run_until_interrupt(cmd, args, tokio::signal::ctrl_c()).await
}

/// [`run_interruptible`] with the interrupt source supplied by the caller.
/// An error from `interrupt` kills the child and is returned as an error.
pub async fn run_until_interrupt<F>(cmd: &str, args: &[String], interrupt: F) -> Result<RunOutcome>
where
    F: Future<Output = io::Result<()>>,
{
    tracing::debug!(cmd, ?args, "Spawning");
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning {}", cmd))?;

    tokio::select! {
        biased;
        signal = interrupt => {
            let _ = child.kill().await;
            signal.context("listening for Ctrl-C")?;
            Ok(RunOutcome::Interrupted)
        }
        status = child.wait() => {
            let status = status.with_context(|| format!("waiting for {}", cmd))?;
            if killed_by_sigint(&status) {
                return Ok(RunOutcome::Interrupted);
            }
            Ok(RunOutcome::Exited(status))
        }
    }
}

/// Run a command to completion and return its stdout lines.
pub async fn capture_lines(cmd: &str, args: &[String]) -> Result<Vec<String>> {
    tracing::debug!(cmd, ?args, "Capturing output");
    let output = Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .await
        .with_context(|| format!("running {}", cmd))?;
    if !output.status.success() {
        tracing::warn!(cmd, status = ?output.status, "External tool exited unsuccessfully");
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(unix)]
fn killed_by_sigint(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(2)
}

#[cfg(not(unix))]
fn killed_by_sigint(_status: &ExitStatus) -> bool {
    false
}
