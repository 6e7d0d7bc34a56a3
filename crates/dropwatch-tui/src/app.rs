//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Both panels re-query their
//! store on every refresh tick and after every navigation key; the app never
//! writes to a store.

use crate::{
    event::{self, AppEvent, Side},
    theme::Theme,
    widgets::{
        drop_panel::{DropPanel, DropPanelState},
        help::HelpPopup,
        status_bar::StatusBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dropwatch_core::{config::Config, Category, IngestSnapshot, IngestStats, Stores};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout},
    Frame, Terminal,
};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub internal: DropPanelState,
    pub external: DropPanelState,
    /// Category of the focused panel.
    pub focus: Category,
    pub stats: IngestSnapshot,
    pub source: String,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    fn focused_panel(&mut self) -> &mut DropPanelState {
        match self.focus {
            Category::Internal => &mut self.internal,
            Category::External => &mut self.external,
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    stores: Stores,
    stats: Arc<IngestStats>,
}

impl App {
    pub fn new(
        stores: Stores,
        stats: Arc<IngestStats>,
        source: impl Into<String>,
        config: Config,
        theme: Theme,
    ) -> Self {
        let state = AppState {
            internal: DropPanelState::new(Category::Internal),
            external: DropPanelState::new(Category::External),
            focus: Category::Internal,
            stats: IngestSnapshot::default(),
            source: source.into(),
            theme,
            config,
            show_help: false,
            quit: false,
        };
        App { state, stores, stats }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let interval = self.state.config.ui.refresh_interval();
        let mut next_tick = Instant::now();

        loop {
            if Instant::now() >= next_tick {
                self.refresh();
                next_tick = Instant::now() + interval;
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            let timeout = next_tick.saturating_duration_since(Instant::now());
            if ct_event::poll(timeout.max(Duration::from_millis(1)))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                }
                if let Some(ev) = event::to_app_event(raw) {
                    tracing::debug!(focus = %self.state.focus, event = ?ev, "key event");
                    self.handle(ev);
                }
            }
        }
        Ok(())
    }

    /// Re-query both stores and the ingestion counters.
    pub fn refresh(&mut self) {
        self.state.internal.refresh(&self.stores.internal);
        self.state.external.refresh(&self.stores.external);
        self.state.stats = self.stats.snapshot();
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::ToggleHelp | AppEvent::Escape => s.show_help = false,
                AppEvent::Quit => s.quit = true,
                _ => {}
            }
            return;
        }

        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }
            AppEvent::ToggleHelp => s.show_help = true,
            AppEvent::FocusNext => {
                s.focus = match s.focus {
                    Category::Internal => Category::External,
                    Category::External => Category::Internal,
                };
            }
            AppEvent::Focus(Side::Left) => s.focus = Category::Internal,
            AppEvent::Focus(Side::Right) => s.focus = Category::External,

            // Terminal resize is handled by ratatui; the next draw picks up
            // the new panel height and the refresh below fills it.
            AppEvent::Resize(_, _) | AppEvent::Escape => {}

            nav => s.focused_panel().handle(&nav),
        }

        self.refresh();
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: panels | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);

    // Internal on the left half, external on the right half
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vert[0]);

    frame.render_widget(
        DropPanel::new(&state.internal, state.focus == Category::Internal, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        DropPanel::new(&state.external, state.focus == Category::External, &state.theme),
        horiz[1],
    );
    frame.render_widget(
        StatusBar::new(&state.source, &state.stats, state.config.ui.show_counters, &state.theme),
        vert[1],
    );

    if state.show_help {
        frame.render_widget(HelpPopup, area);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
