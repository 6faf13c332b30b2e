//! Single-line text buffer backing the token, name and identity-number
//! prompts.
//!
//! The cursor is a character index (not a byte offset) so it stays valid for
//! multi-byte input. Insertions past [`CHAR_LIMIT`] are dropped.

pub const CHAR_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    /// Cursor position in characters (0..=char_count)
    cursor: usize,
    placeholder: &'static str,
    masked: bool,
}

impl InputBuffer {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            placeholder,
            masked: false,
        }
    }

    /// A buffer whose contents render as bullets.
    pub fn masked(placeholder: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(placeholder)
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Text as it should be shown on screen.
    pub fn display_text(&self) -> String {
        if self.masked {
            "•".repeat(self.char_count())
        } else {
            self.text.clone()
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Returns `false` when the buffer is full.
    pub fn insert(&mut self, c: char) -> bool {
        if self.char_count() >= CHAR_LIMIT || c.is_control() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn set(&mut self, value: &str) {
        self.text = value.chars().take(CHAR_LIMIT).collect();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}
