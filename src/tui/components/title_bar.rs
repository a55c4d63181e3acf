//! # TitleBar Component
//!
//! Top status line: application name, active model, and a transient status.
//!
//! Purely presentational. It receives everything as props and keeps no
//! state between frames:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(&app.model_name, &app.status_message, theme);
//! title_bar.render(frame, title_area);
//! ```
//!
//! Output forms:
//!
//! 1. `"Commander (model: gpt-3.5-turbo-instruct) | Request cancelled"`
//! 2. `"Commander (model: gpt-3.5-turbo-instruct)"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TitleBar<'a> {
    pub model_name: &'a str,
    pub status_message: &'a str,
    pub theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(model_name: &'a str, status_message: &'a str, theme: &'a Theme) -> Self {
        Self {
            model_name,
            status_message,
            theme,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            format!("Commander (model: {})", self.model_name)
        } else {
            format!(
                "Commander (model: {}) | {}",
                self.model_name, self.status_message
            )
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(self.title_text(), self.theme.accent_style()));
        frame.render_widget(line, area);
    }
}
