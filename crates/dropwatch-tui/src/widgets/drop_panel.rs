//! Drop panel widget — one scrollable pane per drop category.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Scroll one line back in time |
//! | `↓` / `j` | Scroll one line towards the newest drop |
//! | `PageUp` / `Ctrl+u` | Scroll back one page |
//! | `PageDown` / `Ctrl+d` | Scroll forward one page |
//! | `G` | Jump to the newest drop and resume following |
//!
//! # Scroll semantics
//!
//! `offset` = number of newest drops skipped (0 = following the tail). The
//! panel never holds the store's data itself between refreshes: every
//! [`DropPanelState::refresh`] asks the store for a fresh window of
//! `offset` / visible height and keeps only the rendered lines.
//!
//! A store in [`WindowMode::ExcludeNewest`] leaves the newest element of each
//! window out, so the panel asks for one extra row and stops scrolling one
//! element earlier than an inclusive store would.

use std::cell::Cell;

use crate::event::AppEvent;
use crate::theme::Theme;
use dropwatch_core::{Category, DropEvent, EventStore, WindowMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct DropPanelState {
    pub category: Category,
    /// Number of newest drops skipped (0 = live tail).
    pub offset: usize,
    /// Summaries from the last refresh, oldest first.
    pub lines: Vec<String>,
    /// Store length at the last refresh.
    pub total: usize,
    /// Window mode of the store seen at the last refresh.
    mode: WindowMode,
    /// Cached from the last render so refreshes request a full page.
    last_height: Cell<usize>,
}

impl DropPanelState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            offset: 0,
            lines: Vec::new(),
            total: 0,
            mode: WindowMode::default(),
            last_height: Cell::new(40),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.category {
            Category::Internal => "Internal dropped",
            Category::External => "External dropped",
        }
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// Record the number of content rows available at the last render.
    pub fn set_height(&self, height: usize) {
        self.last_height.set(height);
    }

    /// Re-query `store` for the window at the current offset.
    pub fn refresh(&mut self, store: &EventStore<DropEvent>) {
        self.total = store.len();
        self.mode = store.window_mode();
        self.clamp_offset();
        let window = match self.mode {
            WindowMode::ExcludeNewest => self.height() + 1,
            WindowMode::Inclusive => self.height(),
        };
        self.lines = store
            .get_range(self.offset, window)
            .iter()
            .map(DropEvent::summary)
            .collect();
    }

    /// Largest offset that still leaves something to show.
    fn max_offset(&self) -> usize {
        match self.mode {
            WindowMode::ExcludeNewest => self.total.saturating_sub(2),
            WindowMode::Inclusive => self.total.saturating_sub(1),
        }
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn is_following(&self) -> bool {
        self.offset == 0
    }

    /// Handle a navigation event from the app shell. The caller refreshes
    /// the panel afterwards.
    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::LineUp => self.offset += 1,
            AppEvent::LineDown => self.offset = self.offset.saturating_sub(1),
            AppEvent::PageUp => self.offset += self.height(),
            AppEvent::PageDown => self.offset = self.offset.saturating_sub(self.height()),
            AppEvent::ScrollToTail => self.offset = 0,
            _ => return,
        }
        self.clamp_offset();
        tracing::debug!(
            category = %self.category,
            offset = self.offset,
            total = self.total,
            "panel scrolled"
        );
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct DropPanel<'a> {
    state: &'a DropPanelState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> DropPanel<'a> {
    pub fn new(state: &'a DropPanelState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for DropPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = format!(" {} ({}) ", self.state.title(), self.state.total);
        let mut block = Block::bordered().title(title).border_style(border_style);
        if !self.state.is_following() {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" scrolled back {} (G to follow) ", self.state.offset),
                self.theme.banner,
            )));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.set_height(height);

        let item_style = self.theme.category_style(self.state.category);
        let lines: Vec<Line> = self
            .state
            .lines
            .iter()
            .map(|s| Line::from(Span::styled(s.as_str(), item_style)))
            .collect();

        // Text plus a 1-column scrollbar strip inside the borders.
        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let total = self.state.total;
        if total > 0 {
            let position = total.saturating_sub(self.state.offset + height);
            let mut sb_state = ScrollbarState::new(total)
                .position(position)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
