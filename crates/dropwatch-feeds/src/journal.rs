//! Journal feed — runs the configured log command (default `journalctl -exf`)
//! and reads its stdout.

use std::process::Stdio;

use tokio::io::BufReader;
use tokio::process::{Child, ChildStdout, Command};

use crate::error::FeedError;

/// A spawned log command and a line reader over its stdout.
pub struct JournalFeed {
    command: String,
    child: Child,
}

impl JournalFeed {
    /// Spawn `command args..` with stdout piped and stderr discarded (it
    /// would otherwise scribble over the TUI). Must be called inside a tokio
    /// runtime.
    pub fn spawn(
        command: &str,
        args: &[String],
    ) -> Result<(Self, BufReader<ChildStdout>), FeedError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FeedError::Spawn { command: command.to_string(), source })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| FeedError::MissingStdout(command.to_string()))?;

        tracing::debug!(command, ?args, pid = ?child.id(), "journal feed started");
        Ok((Self { command: command.to_string(), child }, BufReader::new(stdout)))
    }

    /// Stop the command if it is still running. Used on cancellation.
    pub async fn kill(mut self) {
        if let Err(err) = self.child.kill().await {
            tracing::debug!(command = %self.command, %err, "kill failed; process already gone");
        }
    }

    /// Reap the command after its stdout closed; a non-zero exit is an error.
    pub async fn wait(mut self) -> Result<(), FeedError> {
        let status = self.child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(FeedError::Exited { command: self.command, status })
        }
    }
}
