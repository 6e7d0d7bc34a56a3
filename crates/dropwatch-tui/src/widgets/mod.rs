//! Ratatui widgets for the dropwatch TUI.

pub mod drop_panel;
pub mod help;
pub mod status_bar;
