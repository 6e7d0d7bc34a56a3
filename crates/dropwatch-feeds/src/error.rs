//! Error types for dropwatch feeds.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that stop a feed. A bad line is never one of these; it is counted
/// and skipped by the ingestion loop.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The log command could not be started.
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child was spawned without a piped stdout.
    #[error("`{0}` has no stdout pipe")]
    MissingStdout(String),

    /// The log file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the feed failed mid-stream.
    #[error("read error: {0}")]
    Read(#[from] std::io::Error),

    /// The log command closed its output and exited unsuccessfully.
    #[error("`{command}` exited with {status}")]
    Exited { command: String, status: ExitStatus },
}
