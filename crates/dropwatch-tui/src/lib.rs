//! dropwatch TUI — ratatui display with one panel per drop category.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

use std::sync::Arc;

use dropwatch_core::{config::Config, IngestStats, Stores};

pub use app::App;

/// Run the display until the user quits. Reads `stores` and `stats`; the
/// ingestion task keeps writing to them in the background.
pub fn run(
    stores: Stores,
    stats: Arc<IngestStats>,
    source: impl Into<String>,
    config: Config,
) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    App::new(stores, stats, source, config, theme).run()
}
