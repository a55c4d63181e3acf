//! # Result Viewport
//!
//! A scrollable window over wrapped response text. Knows nothing about
//! terminals: it produces plain `String` lines and the TUI styles them.
//!
//! ```text
//! lines:  0 ┐
//!         1 │  ← scroll_offset
//!         2 │  ┐
//!         3 │  │ height
//!         4 │  ┘
//!         5 ┘
//! ```
//!
//! Invariant: `scroll_offset <= max(0, lines.len() - height)` after every call.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultViewport {
    text: String,
    width: u16,
    height: u16,
    lines: Vec<String>,
    scroll_offset: usize,
}

/// Textwrap options for response text: wrap at spaces, break words longer than a line.
fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Split `text` into display lines no wider than `width`.
/// A width of 0 means "don't wrap" (the terminal is too small to matter).
fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let mut lines = Vec::new();
    for logical in text.lines() {
        if width == 0 || logical.is_empty() {
            lines.push(logical.to_string());
            continue;
        }
        lines.extend(
            textwrap::wrap(logical, wrap_options(width))
                .into_iter()
                .map(|segment| segment.into_owned()),
        );
    }
    lines
}

impl ResultViewport {
    pub fn new(text: &str, width: u16, height: u16) -> Self {
        let mut viewport = Self::default();
        viewport.set_content(text, width, height);
        viewport
    }

    /// Replace the content, rewrap to `width` and scroll back to the top.
    pub fn set_content(&mut self, text: &str, width: u16, height: u16) {
        self.text = text.to_string();
        self.width = width;
        self.height = height;
        self.lines = wrap_text(&self.text, width);
        self.scroll_offset = 0;
    }

    /// Rewrap for a new size, keeping the same relative scroll position.
    pub fn resize(&mut self, width: u16, height: u16) {
        let old_max = self.max_offset();
        let fraction = if old_max == 0 {
            0.0
        } else {
            self.scroll_offset as f64 / old_max as f64
        };

        if width != self.width {
            self.lines = wrap_text(&self.text, width);
        }
        self.width = width;
        self.height = height;

        let new_max = self.max_offset();
        self.scroll_offset = ((fraction * new_max as f64).round() as usize).min(new_max);
    }

    /// Move by `delta` lines (negative scrolls up), clamped to the valid range.
    pub fn scroll(&mut self, delta: i32) {
        let target = self.scroll_offset as i64 + i64::from(delta);
        self.scroll_offset = target.clamp(0, self.max_offset() as i64) as usize;
    }

    pub fn page_up(&mut self) {
        self.scroll(-i32::from(self.height.max(1)));
    }

    pub fn page_down(&mut self) {
        self.scroll(i32::from(self.height.max(1)));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_offset();
    }

    /// Exactly `height` lines: the visible window, padded with empty lines.
    pub fn render(&self) -> Vec<String> {
        let height = self.height as usize;
        let mut visible: Vec<String> = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(height)
            .cloned()
            .collect();
        visible.resize(height, String::new());
        visible
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Whether there is content hidden below the window.
    pub fn has_more_below(&self) -> bool {
        self.scroll_offset < self.max_offset()
    }
}
