//! Headless mode — ingest a feed to completion without a terminal UI, then
//! print the newest drops of each category and the ingestion counters.
//!
//! Useful for replaying a saved log (`--source file`) or for piping
//! (`journalctl -k --no-pager | dropwatch --source stdin --headless`).

use std::io::Write;
use std::sync::Arc;

use dropwatch_core::{Category, IngestSnapshot, IngestStats, Stores, WindowMode};
use dropwatch_feeds::FeedSource;
use tokio_util::sync::CancellationToken;

/// Ingest `source` to EOF, then write the report to `out`.
///
/// The report shows the newest `tail` drops per category, so the stores use
/// [`WindowMode::Inclusive`] regardless of the configured display mode.
pub async fn run(source: &FeedSource, tail: usize, out: &mut impl Write) -> anyhow::Result<()> {
    let stores = Stores::new(WindowMode::Inclusive);
    let stats = Arc::new(IngestStats::new());

    let cancel = CancellationToken::new();
    let handle = dropwatch_feeds::spawn(source, stores.clone(), stats.clone(), cancel)?;
    handle.await??;

    write_report(&stores, &stats.snapshot(), tail, out)?;
    Ok(())
}

/// Print up to `tail` of the newest drops per category, oldest first, then
/// a one-line counter summary.
pub fn write_report(
    stores: &Stores,
    stats: &IngestSnapshot,
    tail: usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    for category in [Category::Internal, Category::External] {
        let store = stores.for_category(category);
        writeln!(out, "== {category} dropped ({}) ==", store.len())?;
        for event in store.get_range(0, tail) {
            writeln!(out, "{event}")?;
        }
    }
    writeln!(
        out,
        "lines={} internal={} external={} ignored={} malformed={}",
        stats.lines, stats.internal, stats.external, stats.ignored, stats.malformed
    )
}
