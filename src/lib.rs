//! dropwatch — live terminal viewer for firewall drop events.
//!
//! This crate ties the workspace together for the binary and the integration
//! harnesses: it re-exports the core and feed layers and hosts the headless
//! report mode.
//!
//! # Architecture
//!
//! ```text
//! journalctl -exf ──► ingest (classify) ──► Stores { internal, external } ──► TUI
//!                          │
//!                          └──► IngestStats ──► status bar / headless report
//! ```
//!
//! The ingestion task runs on a tokio runtime; the TUI drives the main thread
//! and polls the stores on a timer.

pub mod headless;

pub use dropwatch_core::{
    classify, config, Category, Classification, DropEvent, EventStore, IngestSnapshot,
    IngestStats, StoreError, Stores, WindowMode,
};
pub use dropwatch_feeds::{FeedError, FeedSource};
