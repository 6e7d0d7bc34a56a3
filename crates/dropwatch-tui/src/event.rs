//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `←` / `h`, `→` / `l`    | `Focus(Left/Right)`        |
//! | `↑` / `k`               | `LineUp`                   |
//! | `↓` / `j`               | `LineDown`                 |
//! | `PageUp`, `Ctrl+u`      | `PageUp`                   |
//! | `PageDown`, `Ctrl+d`    | `PageDown`                 |
//! | `G`, `End`              | `ScrollToTail`             |
//! | `?`                     | `ToggleHelp`               |
//! | `Esc`                   | `Escape`                   |
//! | terminal resize         | `Resize(w, h)`             |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Which panel a horizontal navigation key points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus to the other panel.
    FocusNext,
    /// Focus the panel on the given side.
    Focus(Side),
    /// Scroll the focused panel one line back in time.
    LineUp,
    /// Scroll the focused panel one line towards the newest drop.
    LineDown,
    PageUp,
    PageDown,
    /// Jump back to the newest drop and resume following.
    ScrollToTail,
    ToggleHelp,
    Escape,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, focus changes, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Focus(Side::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Focus(Side::Right)),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::LineUp),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::LineDown),

        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageDown),

        // Uppercase G: SHIFT may or may not be set depending on the terminal
        Char('G') | End => Some(AppEvent::ScrollToTail),

        Char('?') => Some(AppEvent::ToggleHelp),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
