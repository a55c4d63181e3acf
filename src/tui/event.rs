use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

use crate::core::action::Action;
use crate::core::state::PhaseKind;

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: i32 = 3;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    PageUp,
    PageDown,
    Submit,
    Escape,
    ForceQuit, // Ctrl+C
    ScrollUp,  // Mouse wheel
    ScrollDown,
    Resize { width: u16, height: u16 },
}

/// Translate a raw crossterm event. Returns `None` for events we don't use.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Only presses; some terminals also report repeats and releases
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('a')) => Some(TuiEvent::CursorHome),
                (KeyModifiers::CONTROL, KeyCode::Char('e')) => Some(TuiEvent::CursorEnd),
                (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => None,
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
                (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
                (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(width, height) => Some(TuiEvent::Resize { width, height }),
        _ => None,
    }
}

/// Map a terminal event to a core action, depending on what the user is looking at.
///
/// Resize is handled by the event loop (it needs layout knowledge), so it maps to `None` here.
pub fn action_for(event: &TuiEvent, phase: PhaseKind) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Escape => return Some(Action::Cancel),
        _ => {}
    }

    match phase {
        PhaseKind::Entering => match event {
            TuiEvent::InputChar(c) => Some(Action::Insert(*c)),
            TuiEvent::Paste(text) => Some(Action::Paste(text.clone())),
            TuiEvent::Backspace => Some(Action::DeleteBack),
            TuiEvent::Delete => Some(Action::DeleteForward),
            TuiEvent::CursorLeft => Some(Action::CursorLeft),
            TuiEvent::CursorRight => Some(Action::CursorRight),
            TuiEvent::CursorHome => Some(Action::CursorHome),
            TuiEvent::CursorEnd => Some(Action::CursorEnd),
            TuiEvent::Submit => Some(Action::Confirm),
            _ => None,
        },
        PhaseKind::Presenting => match event {
            TuiEvent::Submit | TuiEvent::InputChar('n') => Some(Action::NewQuery),
            TuiEvent::InputChar('q') => Some(Action::Cancel),
            TuiEvent::CursorUp | TuiEvent::InputChar('k') => Some(Action::Scroll(-1)),
            TuiEvent::CursorDown | TuiEvent::InputChar('j') => Some(Action::Scroll(1)),
            TuiEvent::ScrollUp => Some(Action::Scroll(-WHEEL_STEP)),
            TuiEvent::ScrollDown => Some(Action::Scroll(WHEEL_STEP)),
            TuiEvent::PageUp => Some(Action::PageUp),
            TuiEvent::PageDown | TuiEvent::InputChar(' ') => Some(Action::PageDown),
            TuiEvent::CursorHome | TuiEvent::InputChar('g') => Some(Action::ScrollToTop),
            TuiEvent::CursorEnd | TuiEvent::InputChar('G') => Some(Action::ScrollToBottom),
            _ => None,
        },
        PhaseKind::Pending | PhaseKind::Misconfigured => None,
    }
}
