//! The atomic unit of change.
//!
//! Every buffer mutation, whether typed by the user, produced by auto-indent or replayed by
//! undo, is described by one [`Edit`] expressed in **character offsets**.

use crate::buffer::TextBuffer;

/// Direction of an [`Edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// `content` was inserted at `position`.
    Insert,
    /// `content` was removed from `position`.
    Remove,
}

/// A single text change.
///
/// Semantics:
/// - `position` is a character offset in the document **at the time the edit is applied**.
/// - For [`EditKind::Remove`], `content` is the exact removed text, so the edit can be inverted
///   without consulting the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start character offset.
    pub position: usize,
    /// Inserted or removed text.
    pub content: String,
    /// Insert or remove.
    pub kind: EditKind,
}

impl Edit {
    /// An insertion of `content` at `position`.
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            kind: EditKind::Insert,
        }
    }

    /// A removal of `content` starting at `position`.
    pub fn remove(position: usize, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            kind: EditKind::Remove,
        }
    }

    /// Length of `content` in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Exclusive end offset of `content` (in the post-insert / pre-remove document).
    pub fn end(&self) -> usize {
        self.position + self.char_len()
    }

    /// Returns `true` if the content is empty (a no-op edit).
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns `true` if this edit inserts.
    pub fn is_insert(&self) -> bool {
        self.kind == EditKind::Insert
    }

    /// Returns `true` if the content is exactly one newline character.
    pub fn is_single_newline(&self) -> bool {
        self.content == "\n"
    }

    /// The edit that undoes this one.
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            EditKind::Insert => EditKind::Remove,
            EditKind::Remove => EditKind::Insert,
        };
        Self {
            position: self.position,
            content: self.content.clone(),
            kind,
        }
    }

    /// Apply this edit to `buffer`. Callers are responsible for bounds.
    pub fn apply<B: TextBuffer + ?Sized>(&self, buffer: &mut B) {
        match self.kind {
            EditKind::Insert => buffer.insert(self.position, &self.content),
            EditKind::Remove => buffer.remove(self.position, self.char_len()),
        }
    }
}
