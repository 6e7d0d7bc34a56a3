//! Ingestion diagnostics shared between the ingestion task and the display.
//!
//! All counters are relaxed atomics: they are advisory numbers for a status
//! line, not synchronisation points.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};

use crate::types::Category;

#[derive(Debug, Default)]
pub struct IngestStats {
    lines: AtomicU64,
    internal: AtomicU64,
    external: AtomicU64,
    ignored: AtomicU64,
    malformed: AtomicU64,
    /// Unix millis of the last drop, 0 when none.
    last_drop_ms: AtomicI64,
    finished: AtomicBool,
    failure: Mutex<Option<String>>,
}

/// Plain copy of [`IngestStats`] at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSnapshot {
    pub lines: u64,
    pub internal: u64,
    pub external: u64,
    pub ignored: u64,
    pub malformed: u64,
    pub last_drop: Option<DateTime<Utc>>,
    /// The feed reached EOF or failed; no more events will arrive.
    pub finished: bool,
    pub failure: Option<String>,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_line(&self) {
        self.lines.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drop(&self, category: Category, at: DateTime<Utc>) {
        let counter = match category {
            Category::Internal => &self.internal,
            Category::External => &self.external,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.last_drop_ms.store(at.timestamp_millis(), Ordering::Relaxed);
    }

    pub fn record_ignored(&self) {
        self.ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn malformed(&self) -> u64 {
        self.malformed.load(Ordering::Relaxed)
    }

    /// Mark the feed as done. `failure` carries the reason when it did not
    /// end with a clean EOF.
    pub fn finish(&self, failure: Option<String>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = failure;
        self.finished.store(true, Ordering::Release);
    }

    pub fn snapshot(&self) -> IngestSnapshot {
        let last_drop_ms = self.last_drop_ms.load(Ordering::Relaxed);
        IngestSnapshot {
            lines: self.lines.load(Ordering::Relaxed),
            internal: self.internal.load(Ordering::Relaxed),
            external: self.external.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            malformed: self.malformed(),
            last_drop: (last_drop_ms != 0)
                .then(|| DateTime::from_timestamp_millis(last_drop_ms))
                .flatten(),
            finished: self.finished.load(Ordering::Acquire),
            failure: self
                .failure
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_per_category() {
        let stats = IngestStats::new();
        let at = Utc::now();
        stats.record_line();
        stats.record_line();
        stats.record_drop(Category::External, at);
        stats.record_malformed();

        let snap = stats.snapshot();
        assert_eq!(snap.lines, 2);
        assert_eq!(snap.external, 1);
        assert_eq!(snap.internal, 0);
        assert_eq!(snap.malformed, 1);
        assert_eq!(
            snap.last_drop.map(|t| t.timestamp_millis()),
            Some(at.timestamp_millis())
        );
        assert!(!snap.finished);
    }

    #[test]
    fn finish_records_failure() {
        let stats = IngestStats::new();
        stats.finish(Some("broken pipe".to_string()));
        let snap = stats.snapshot();
        assert!(snap.finished);
        assert_eq!(snap.failure.as_deref(), Some("broken pipe"));
    }
}
