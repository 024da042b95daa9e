//! Text buffer primitive.
//!
//! The buffer is the single source of truth for document text. It offers position-addressed
//! insert/remove in character offsets and nothing else: it does no validation and keeps no
//! derived state. [`crate::EditCoordinator`] validates every edit before it reaches the buffer.

use ropey::Rope;

/// Position-addressed text storage (character offsets).
pub trait TextBuffer {
    /// Insert `text` at character offset `position` (`position <= len_chars()`).
    fn insert(&mut self, position: usize, text: &str);

    /// Remove `len` characters starting at `position` (`position + len <= len_chars()`).
    fn remove(&mut self, position: usize, len: usize);

    /// The complete document text.
    fn text(&self) -> String;

    /// Document length in characters.
    fn len_chars(&self) -> usize;

    /// Returns `true` if the document is empty.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// `len` characters starting at `start`, clamped to the document end.
    fn slice(&self, start: usize, len: usize) -> String {
        self.text().chars().skip(start).take(len).collect()
    }

    /// The character at `position`, if any.
    fn char_at(&self, position: usize) -> Option<char> {
        self.slice(position, 1).chars().next()
    }
}

/// [`TextBuffer`] backed by a [`ropey::Rope`].
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a buffer holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl TextBuffer for RopeBuffer {
    fn insert(&mut self, position: usize, text: &str) {
        self.rope.insert(position, text);
    }

    fn remove(&mut self, position: usize, len: usize) {
        if len > 0 {
            self.rope.remove(position..position + len);
        }
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, start: usize, len: usize) -> String {
        let total = self.rope.len_chars();
        let start = start.min(total);
        let end = start.saturating_add(len).min(total);
        self.rope.slice(start..end).to_string()
    }

    fn char_at(&self, position: usize) -> Option<char> {
        (position < self.rope.len_chars()).then(|| self.rope.char(position))
    }
}
