//! # Query Field
//!
//! The text the user is typing, plus a cursor. Length is measured in chars
//! and capped at `max_len`; inserts past the cap are silently dropped.
//!
//! The cursor is a byte offset into `buffer` that always sits on a char
//! boundary, so multi-byte input (accents, emoji) edits cleanly.

/// Character limit used when the config doesn't override it.
pub const DEFAULT_MAX_QUERY_LEN: usize = 156;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    buffer: String,
    /// Byte offset in `buffer` (0..=buffer.len())
    cursor: usize,
    max_len: usize,
}

impl Default for QueryField {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_LEN)
    }
}

impl QueryField {
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            max_len,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// Number of chars currently in the field.
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True when the field holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Cursor position as a char index (what the renderer needs).
    pub fn cursor(&self) -> usize {
        self.buffer[..self.cursor].chars().count()
    }

    /// Text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.buffer[..self.cursor]
    }

    /// Insert a char at the cursor. Returns false when rejected.
    ///
    /// Tabs become a single space; ratatui doesn't draw them, so the cursor
    /// column would drift otherwise.
    pub fn insert(&mut self, c: char) -> bool {
        let c = if c == '\t' { ' ' } else { c };
        if c.is_control() {
            return false;
        }
        if self.len() >= self.max_len {
            return false;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    /// Insert pasted text, stopping at the length limit. Newlines become spaces.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars() {
            let c = if c == '\n' || c == '\r' { ' ' } else { c };
            if !self.insert(c) {
                if self.len() >= self.max_len {
                    break;
                }
                continue;
            }
            changed = true;
        }
        changed
    }

    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = prev_char_boundary(&self.buffer, self.cursor);
        self.buffer.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        let next = next_char_boundary(&self.buffer, self.cursor);
        self.buffer.drain(self.cursor..next);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = prev_char_boundary(&self.buffer, self.cursor);
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.cursor = next_char_boundary(&self.buffer, self.cursor);
        true
    }

    pub fn move_home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_end(&mut self) -> bool {
        let moved = self.cursor != self.buffer.len();
        self.cursor = self.buffer.len();
        moved
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
