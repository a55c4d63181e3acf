//! # Spinner Component
//!
//! Loading indicator shown while a request is outstanding. Advances one frame
//! per timer tick; the frame set comes from the theme.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct Spinner<'a> {
    pub tick: usize,
    pub label: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Spinner<'a> {
    pub fn new(tick: usize, label: &'a str, theme: &'a Theme) -> Self {
        Self { tick, label, theme }
    }
}

impl Component for Spinner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(self.theme.spinner_frame(self.tick), self.theme.accent_style()),
            Span::raw(" "),
            Span::styled(self.label, self.theme.muted_style()),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn first_cell(tick: usize) -> String {
        let theme = Theme::default();
        let backend = TestBackend::new(30, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                Spinner::new(tick, "Thinking", &theme).render(f, f.area());
            })
            .unwrap();
        terminal.backend().buffer()[(0, 0)].symbol().to_string()
    }

    #[test]
    fn test_spinner_advances_with_tick() {
        assert_eq!(first_cell(0), "⠋");
        assert_eq!(first_cell(1), "⠙");
        assert_ne!(first_cell(0), first_cell(1));
    }
}
