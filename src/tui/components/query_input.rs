//! # QueryInput Component
//!
//! Single-line query editor shown while Entering.
//!
//! The text lives in the core `QueryField`; this component only draws it.
//! When the query is wider than the box, the view slides so the cursor
//! always stays visible. Column math uses display width, so wide glyphs
//! (CJK, emoji) don't push the cursor off its character.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::query::QueryField;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub const PLACEHOLDER: &str = "Describe the command you need";

/// Rows taken by the bordered input box.
pub const INPUT_HEIGHT: u16 = 3;

pub struct QueryInput<'a> {
    pub query: &'a QueryField,
    pub theme: &'a Theme,
}

impl<'a> QueryInput<'a> {
    pub fn new(query: &'a QueryField, theme: &'a Theme) -> Self {
        Self { query, theme }
    }
}

/// Byte offset where the visible window starts, so that the text before the
/// cursor fits in `available` columns with room for the cursor itself.
fn window_start(before_cursor: &str, available: usize) -> usize {
    if available == 0 {
        return before_cursor.len();
    }
    let mut width = before_cursor.width();
    let mut start = 0;
    for c in before_cursor.chars() {
        if width < available {
            break;
        }
        width -= c.width().unwrap_or(0);
        start += c.len_utf8();
    }
    start
}

impl Component for QueryInput<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let counter = format!(" {}/{} ", self.query.len(), self.query.max_len());
        let block = Block::bordered()
            .border_type(self.theme.border)
            .border_style(self.theme.muted_style())
            .title(" Query ")
            .title_bottom(Line::from(counter).right_aligned());
        let inner = block.inner(area);

        let prompt_width = self.theme.prompt.width() as u16;
        let available = inner.width.saturating_sub(prompt_width) as usize;

        let before = self.query.before_cursor();
        let start = window_start(before, available);
        let visible = &self.query.value()[start..];

        let body = if self.query.is_empty() {
            Span::styled(PLACEHOLDER, self.theme.muted_style())
        } else {
            Span::styled(visible, self.theme.text_style())
        };
        let line = Line::from(vec![
            Span::styled(self.theme.prompt, self.theme.accent_style()),
            body,
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let cursor_col = before[start..].width() as u16;
        let x = (inner.x + prompt_width + cursor_col).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(query: &QueryField, width: u16) -> Terminal<TestBackend> {
        let theme = Theme::mono();
        let backend = TestBackend::new(width, INPUT_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                QueryInput::new(query, &theme).render(f, f.area());
            })
            .unwrap();
        terminal
    }

    fn text_of(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_query_shows_placeholder() {
        let query = QueryField::new(156);
        let terminal = draw(&query, 60);
        let text = text_of(&terminal);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("0/156"));
    }

    #[test]
    fn test_cursor_follows_text() {
        let mut query = QueryField::new(156);
        query.insert_str("list files");
        let mut terminal = draw(&query, 60);
        // border (1) + "> " (2) + "list files" (10)
        terminal.backend_mut().assert_cursor_position((13, 1));
        assert!(text_of(&terminal).contains("> list files"));
    }

    #[test]
    fn test_wide_chars_use_display_width() {
        let mut query = QueryField::new(156);
        query.insert_str("日本");
        let mut terminal = draw(&query, 60);
        terminal.backend_mut().assert_cursor_position((7, 1));
    }

    #[test]
    fn test_pasted_tab_keeps_cursor_aligned() {
        let mut query = QueryField::new(156);
        query.insert_str("a\tb");
        let mut terminal = draw(&query, 60);
        assert!(text_of(&terminal).contains("> a b"));
        terminal.backend_mut().assert_cursor_position((6, 1));
    }

    #[test]
    fn test_long_query_scrolls_to_keep_cursor_visible() {
        let mut query = QueryField::new(156);
        query.insert_str("abcdefghijklmnopqrstuvwxyz");
        let mut terminal = draw(&query, 14);
        let text = text_of(&terminal);
        assert!(text.contains("xyz"));
        assert!(!text.contains("abc"));
        // inner width 12, prompt 2, so the cursor sits on the last inner column
        terminal.backend_mut().assert_cursor_position((12, 1));
    }

    #[test]
    fn test_window_start() {
        assert_eq!(window_start("abc", 10), 0);
        assert_eq!(window_start("abcdef", 4), 3);
        assert_eq!(window_start("abc", 0), 3);
        assert_eq!(window_start("", 0), 0);
    }
}
