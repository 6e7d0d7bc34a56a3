//! dropwatch-core — firewall drop events, their store, and the line classifier.
//!
//! # Architecture
//!
//! ```text
//! Feed ──► classify ──► Stores { internal, external } ──► UI (polls get_range)
//!                │
//!                └──► IngestStats (diagnostics)
//! ```
//!
//! The ingestion task is the only writer; the UI only reads. Both hold the
//! same [`Stores`] through `Arc`.

pub mod classifier;
pub mod config;
pub mod stats;
pub mod store;
pub mod types;

pub use classifier::{classify, Classification};
pub use stats::{IngestSnapshot, IngestStats};
pub use store::{EventStore, StoreError, Stores, WindowMode};
pub use types::{Category, DropEvent};
