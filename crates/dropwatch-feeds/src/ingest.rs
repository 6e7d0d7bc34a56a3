//! Ingestion loop — pulls lines from a feed, classifies them, and pushes drops
//! into the store for their category.
//!
//! This is the only writer of the [`Stores`]. It holds a store's write lock
//! for a single `Vec::push` per drop, so readers are never kept waiting for
//! longer than that.

use chrono::Utc;
use dropwatch_core::{classify, Category, Classification, IngestStats, Stores};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

use crate::error::FeedError;

/// Classify one line and route a drop to its store.
///
/// Returns the category of the stored drop, or `None` for ignored and
/// malformed lines.
pub fn ingest_line(line: &str, stores: &Stores, stats: &IngestStats) -> Option<Category> {
    stats.record_line();
    match classify(line) {
        Classification::Drop(category, event) => {
            stores.for_category(category).push(event);
            stats.record_drop(category, Utc::now());
            Some(category)
        }
        Classification::Ignored => {
            stats.record_ignored();
            None
        }
        Classification::Malformed { tokens } => {
            stats.record_malformed();
            tracing::warn!(
                tokens,
                malformed_total = stats.malformed(),
                "malformed log line skipped"
            );
            None
        }
    }
}

/// Read `reader` line by line until EOF, a read error, or `cancel` fires.
///
/// Bytes are decoded as lossy UTF-8 and the trailing `\n` / `\r\n` is
/// stripped. Cancellation between lines is clean; a line that is being read
/// when the token fires is dropped.
pub async fn ingest<R>(
    mut reader: R,
    stores: &Stores,
    stats: &IngestStats,
    cancel: &CancellationToken,
) -> Result<(), FeedError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::with_capacity(512);
    loop {
        buf.clear();
        let read = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("ingestion cancelled");
                return Ok(());
            }
            read = reader.read_until(b'\n', &mut buf) => read?,
        };
        if read == 0 {
            tracing::debug!("feed reached EOF");
            return Ok(());
        }

        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        if let Some(category) = ingest_line(&line, stores, stats) {
            tracing::trace!(%category, "drop stored");
        }
    }
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropwatch_core::WindowMode;
    use pretty_assertions::assert_eq;

    const EXTERNAL: &str =
        "Oct 18 12:00:01 gw kernel: EXTERNAL_DROPPED: IN=eth0 OUT= MAC=aa SRC=203.0.113.7 DST=10.0.0.1 PROTO=TCP SPT=40000 DPT=22";
    const INTERNAL: &str =
        "Oct 18 12:00:02 gw kernel: INTERNAL_DROPPED: IN=lan0 OUT= MAC=bb SRC=10.0.0.5 DST=10.0.0.1 PROTO=UDP SPT=5353 DPT=53";

    #[test]
    fn routes_by_category() {
        let stores = Stores::new(WindowMode::Inclusive);
        let stats = IngestStats::new();

        assert_eq!(ingest_line(EXTERNAL, &stores, &stats), Some(Category::External));
        assert_eq!(ingest_line(INTERNAL, &stores, &stats), Some(Category::Internal));

        assert_eq!(stores.external.len(), 1);
        assert_eq!(stores.internal.len(), 1);
        assert_eq!(
            stores.external.get(0).unwrap().summary(),
            "Oct 18 12:00:01 SRC=203.0.113.7 DPT=22"
        );
    }

    #[test]
    fn malformed_line_counts_once() {
        let stores = Stores::new(WindowMode::default());
        let stats = IngestStats::new();
        assert_eq!(ingest_line("a b c d", &stores, &stats), None);
        assert_eq!(stats.malformed(), 1);
        assert!(stores.internal.is_empty() && stores.external.is_empty());
    }

    #[test]
    fn non_drop_marker_is_silent() {
        let stores = Stores::new(WindowMode::default());
        let stats = IngestStats::new();
        let accept = "Oct 18 12:00:03 gw kernel: ACCEPT: IN=eth0 OUT= MAC=cc SRC=1";
        ingest_line(accept, &stores, &stats);
        let snap = stats.snapshot();
        assert_eq!(snap.malformed, 0);
        assert_eq!(snap.ignored, 1);
    }

    #[tokio::test]
    async fn reads_until_eof_and_strips_crlf() {
        let input = format!("{EXTERNAL}\r\n{INTERNAL}\nnot a drop line at all\n{EXTERNAL}");
        let stores = Stores::new(WindowMode::Inclusive);
        let stats = IngestStats::new();

        ingest(input.as_bytes(), &stores, &stats, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(stores.external.len(), 2);
        assert_eq!(stores.internal.len(), 1);
        assert!(stores.external.get(1).unwrap().port.as_deref() == Some("DPT=22"));
        assert_eq!(stats.snapshot().lines, 4);
    }

    #[tokio::test]
    async fn invalid_utf8_is_decoded_lossily() {
        let mut input = EXTERNAL.as_bytes().to_vec();
        input.extend_from_slice(b" \xff\n");
        let stores = Stores::new(WindowMode::Inclusive);
        let stats = IngestStats::new();

        ingest(&input[..], &stores, &stats, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(stores.external.len(), 1);
    }

    #[tokio::test]
    async fn cancelled_token_stops_before_reading() {
        let (_writer, reader) = tokio::io::duplex(64);
        let reader = tokio::io::BufReader::new(reader);
        let stores = Stores::new(WindowMode::default());
        let stats = IngestStats::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        ingest(reader, &stores, &stats, &cancel).await.unwrap();
        assert_eq!(stats.snapshot().lines, 0);
    }
}
