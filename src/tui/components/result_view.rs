//! # ResultView Component
//!
//! Draws the visible slice of a `ResultViewport` inside a bordered box.
//!
//! Wrapping and scrolling already happened in core; this component only
//! paints `viewport.render()` and a scrollbar on the right border when the
//! text is taller than the box. The viewport was sized from
//! [`inner_size`], so its lines fit the inner area exactly.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::viewport::ResultViewport;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

/// Columns and rows lost to the border.
const BORDER_OVERHEAD: u16 = 2;

/// Text area available inside a result box drawn in `area`.
pub fn inner_size(area: Rect) -> (u16, u16) {
    (
        area.width.saturating_sub(BORDER_OVERHEAD),
        area.height.saturating_sub(BORDER_OVERHEAD),
    )
}

pub struct ResultView<'a> {
    pub viewport: &'a ResultViewport,
    pub theme: &'a Theme,
}

impl<'a> ResultView<'a> {
    pub fn new(viewport: &'a ResultViewport, theme: &'a Theme) -> Self {
        Self { viewport, theme }
    }

    fn position_label(&self) -> String {
        let total = self.viewport.line_count();
        if total == 0 {
            return " empty ".to_string();
        }
        let first = self.viewport.scroll_offset() + 1;
        let last = (self.viewport.scroll_offset() + self.viewport.height() as usize)
            .min(total)
            .max(first);
        format!(" {}-{}/{} ", first, last, total)
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let max_offset = self.viewport.max_offset();
        if max_offset == 0 {
            return;
        }

        // content_length is the max scroll position, not the line count
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_offset)
            .position(self.viewport.scroll_offset());

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(BORDER_OVERHEAD),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for ResultView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::bordered()
            .border_type(self.theme.border)
            .border_style(self.theme.muted_style())
            .title(" Result ")
            .title_bottom(Line::from(self.position_label()).right_aligned());
        if self.viewport.has_more_below() {
            block = block.title_bottom(Line::styled(" ↓ more ", self.theme.accent_style()));
        }

        let lines: Vec<Line> = self
            .viewport
            .render()
            .into_iter()
            .map(Line::from)
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(self.theme.text_style());

        frame.render_widget(paragraph, area);
        self.render_scrollbar(frame, area);
    }
}
