//! Test builders — ergonomic constructors for `DropEvent` and stores.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use dropwatch_core::{Category, DropEvent, EventStore, WindowMode};

// ---------------------------------------------------------------------------
// DropEventBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`DropEvent`] test fixtures.
///
/// ```rust
/// let event = DropEventBuilder::new(Category::External)
///     .source("SRC=203.0.113.7")
///     .port("DPT=22")
///     .build();
/// ```
pub struct DropEventBuilder {
    event: DropEvent,
}

impl DropEventBuilder {
    pub fn new(category: Category) -> Self {
        Self {
            event: DropEvent {
                timestamp: "Oct 18 12:00:00".to_string(),
                host: "gw".to_string(),
                process: "kernel:".to_string(),
                category,
                source: None,
                protocol: None,
                port: None,
            },
        }
    }

    pub fn timestamp(mut self, ts: impl Into<String>) -> Self {
        self.event.timestamp = ts.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.event.source = Some(source.into());
        self
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.event.protocol = Some(protocol.into());
        self
    }

    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.event.port = Some(port.into());
        self
    }

    pub fn build(self) -> DropEvent {
        self.event
    }
}

// ---------------------------------------------------------------------------
// Store helpers
// ---------------------------------------------------------------------------

/// A string store holding `"item-0"` .. `"item-{n-1}"`, oldest first.
pub fn numbered_store(n: usize, mode: WindowMode) -> EventStore<String> {
    let store = EventStore::with_window_mode(mode);
    for i in 0..n {
        store.push(format!("item-{i}"));
    }
    store
}

/// Build a tokenised line from parts, joined by single spaces.
pub fn line_of(tokens: &[&str]) -> String {
    tokens.join(" ")
}
