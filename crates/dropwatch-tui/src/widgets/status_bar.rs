//! Status bar widget — one line at the bottom with the feed name, ingestion
//! counters and keybinding hints.

use crate::theme::Theme;
use dropwatch_core::IngestSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct StatusBar<'a> {
    source: &'a str,
    stats: &'a IngestSnapshot,
    show_counters: bool,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        source: &'a str,
        stats: &'a IngestSnapshot,
        show_counters: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { source, stats, show_counters, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(format!(" {} ", self.source), self.theme.status_bar)];

        if self.show_counters {
            spans.push(Span::styled(
                format!(
                    "│ lines {}  internal {}  external {} ",
                    self.stats.lines, self.stats.internal, self.stats.external
                ),
                self.theme.status_bar,
            ));
            if self.stats.malformed > 0 {
                spans.push(Span::styled(
                    format!("│ malformed {} ", self.stats.malformed),
                    self.theme.status_warning,
                ));
            }
            if let Some(at) = self.stats.last_drop {
                let local = at.with_timezone(&chrono::Local);
                spans.push(Span::styled(
                    format!("│ last drop {} ", local.format("%H:%M:%S")),
                    self.theme.status_bar,
                ));
            }
        }

        let warning = self.theme.status_warning;
        match (&self.stats.failure, self.stats.finished) {
            (Some(err), _) => spans.push(Span::styled(format!("│ source failed: {err} "), warning)),
            (None, true) => spans.push(Span::styled("│ source closed ", warning)),
            (None, false) => {}
        }

        Paragraph::new(Line::from(spans)).render(area, buf);

        let hint = " q:quit  tab:switch  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.status_bar);
    }
}
