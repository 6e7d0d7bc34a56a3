//! dropwatch-feeds — log feed sources and the ingestion task.
//!
//! Each feed yields raw lines; [`ingest::ingest`] classifies them and pushes
//! drop events into the [`Stores`]. [`spawn`] opens a feed and runs the
//! ingestion loop on a background tokio task.

pub mod error;
pub mod file;
pub mod ingest;
pub mod journal;
pub mod stdin;

use std::path::PathBuf;
use std::sync::Arc;

use dropwatch_core::{IngestStats, Stores};
use tokio::io::AsyncBufRead;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub use error::FeedError;
pub use ingest::{ingest, ingest_line};
pub use journal::JournalFeed;

/// Which feed to read and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Journal { command: String, args: Vec<String> },
    Stdin,
    File(PathBuf),
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Journal { command, args } => write!(f, "{} {}", command, args.join(" ")),
            FeedSource::Stdin => write!(f, "stdin"),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

type LineReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Open `source` and start ingesting it on a background task.
///
/// Opening happens before this returns, so a command that cannot be started
/// or a file that cannot be opened is reported to the caller right away.
/// The task ends on EOF, on a read error, or when `cancel` fires; either way
/// it marks `stats` as finished. Must be called inside a tokio runtime.
pub fn spawn(
    source: &FeedSource,
    stores: Stores,
    stats: Arc<IngestStats>,
    cancel: CancellationToken,
) -> Result<JoinHandle<Result<(), FeedError>>, FeedError> {
    let (reader, journal): (LineReader, Option<JournalFeed>) = match source {
        FeedSource::Journal { command, args } => {
            let (feed, reader) = JournalFeed::spawn(command, args)?;
            (Box::new(reader), Some(feed))
        }
        FeedSource::Stdin => (Box::new(stdin::open()), None),
        FeedSource::File(path) => (Box::new(file::open(path)?), None),
    };

    tracing::info!(%source, "ingestion started");
    Ok(tokio::spawn(async move {
        let mut result = ingest(reader, &stores, &stats, &cancel).await;
        if let Some(journal) = journal {
            if cancel.is_cancelled() {
                journal.kill().await;
            } else if result.is_ok() {
                result = journal.wait().await;
            } else {
                journal.kill().await;
            }
        }

        match &result {
            Ok(()) => tracing::info!("ingestion finished"),
            Err(err) => tracing::error!(%err, "ingestion failed"),
        }
        stats.finish(result.as_ref().err().map(ToString::to_string));
        result
    }))
}
