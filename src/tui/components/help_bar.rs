//! # HelpBar Component
//!
//! Bottom line listing the keys that do something in the current phase.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::core::state::PhaseKind;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const SEPARATOR: &str = " • ";

/// `(key, description)` pairs for a phase.
pub fn hints(phase: PhaseKind) -> &'static [(&'static str, &'static str)] {
    match phase {
        PhaseKind::Entering => &[("enter", "confirm"), ("esc", "quit")],
        PhaseKind::Pending => &[("esc", "cancel"), ("ctrl+c", "quit")],
        PhaseKind::Presenting => &[
            ("↑/↓", "scroll"),
            ("pgup/pgdn", "page"),
            ("enter", "new query"),
            ("esc", "quit"),
        ],
        PhaseKind::Misconfigured => &[("esc", "quit")],
    }
}

pub struct HelpBar<'a> {
    pub phase: PhaseKind,
    pub theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    pub fn new(phase: PhaseKind, theme: &'a Theme) -> Self {
        Self { phase, theme }
    }
}

impl Component for HelpBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, (key, description)) in hints(self.phase).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, self.theme.muted_style()));
            }
            spans.push(Span::styled(*key, self.theme.accent_style()));
            spans.push(Span::styled(format!(" {}", description), self.theme.muted_style()));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
