//! Style spans produced by the highlighter.
//!
//! Spans are derived data: recomputable from the text at any time and never persisted. They
//! are kept sorted by start offset and never overlap, so region replacement and offset
//! shifting are simple binary searches over a vector.

use std::ops::Range;

/// Style ID type. The UI/theme layer maps ids to colors.
pub type StyleId = u32;

/// Keyword style.
pub const STYLE_KEYWORD: StyleId = 0x0100_0001;
/// Comment style (line and block comments).
pub const STYLE_COMMENT: StyleId = 0x0100_0002;
/// String literal style.
pub const STYLE_STRING: StyleId = 0x0100_0003;
/// Bracket style.
pub const STYLE_BRACKET: StyleId = 0x0100_0004;
/// Operator style.
pub const STYLE_OPERATOR: StyleId = 0x0100_0005;
/// Flagged-token (annotation/decorator) style.
pub const STYLE_ANNOTATION: StyleId = 0x0100_0006;

/// Lexical token classes recognized by the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenStyle {
    /// Annotation or other flagged token.
    Annotation,
    /// Reserved word.
    Keyword,
    /// Operator token.
    Operator,
    /// Bracket character.
    Bracket,
    /// String literal.
    StringLiteral,
    /// Line or block comment.
    Comment,
}

impl TokenStyle {
    /// The [`StyleId`] for this token class.
    pub fn style_id(self) -> StyleId {
        match self {
            Self::Annotation => STYLE_ANNOTATION,
            Self::Keyword => STYLE_KEYWORD,
            Self::Operator => STYLE_OPERATOR,
            Self::Bracket => STYLE_BRACKET,
            Self::StringLiteral => STYLE_STRING,
            Self::Comment => STYLE_COMMENT,
        }
    }
}

/// A styled run of characters. Text outside any span has the "normal" style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Start character offset.
    pub start: usize,
    /// Length in characters (> 0).
    pub length: usize,
    /// Style ID.
    pub style: StyleId,
}

impl HighlightSpan {
    /// Create a span.
    pub fn new(start: usize, length: usize, style: StyleId) -> Self {
        Self {
            start,
            length,
            style,
        }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Check if the span contains a specific position.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end()
    }
}

/// Sorted, non-overlapping collection of [`HighlightSpan`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanSet {
    spans: Vec<HighlightSpan>,
}

impl SpanSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// All spans in document order.
    pub fn as_slice(&self) -> &[HighlightSpan] {
        &self.spans
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Reset everything to the normal style.
    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Style at `pos`, if any.
    pub fn style_at(&self, pos: usize) -> Option<StyleId> {
        let idx = self.spans.partition_point(|s| s.end() <= pos);
        self.spans
            .get(idx)
            .filter(|s| s.contains(pos))
            .map(|s| s.style)
    }

    /// Spans overlapping `range`.
    pub fn query(&self, range: Range<usize>) -> &[HighlightSpan] {
        let first = self.spans.partition_point(|s| s.end() <= range.start);
        let last = self.spans.partition_point(|s| s.start < range.end);
        &self.spans[first..last.max(first)]
    }

    /// Reset `range` to the normal style and insert `replacement` (which must lie inside
    /// `range`, sorted, non-overlapping). Spans crossing the range edges are clipped.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: Vec<HighlightSpan>) {
        let first = self.spans.partition_point(|s| s.end() <= range.start);
        let last = self.spans.partition_point(|s| s.start < range.end);
        let last = last.max(first);

        let mut head = None;
        let mut tail = None;
        if let Some(s) = self.spans[first..last].first()
            && s.start < range.start
        {
            head = Some(HighlightSpan::new(s.start, range.start - s.start, s.style));
        }
        if let Some(s) = self.spans[first..last].last()
            && s.end() > range.end
        {
            tail = Some(HighlightSpan::new(range.end, s.end() - range.end, s.style));
        }

        debug_assert!(
            replacement
                .iter()
                .all(|s| s.start >= range.start && s.end() <= range.end && s.length > 0),
            "replacement spans escape {range:?}"
        );

        let spliced = head.into_iter().chain(replacement).chain(tail);
        self.spans.splice(first..last, spliced);
    }

    /// Replace every span.
    pub fn replace_all(&mut self, spans: Vec<HighlightSpan>) {
        self.spans = spans;
    }

    /// Update offsets after inserting `len` characters at `pos`.
    ///
    /// A span strictly containing `pos` grows; spans at or after `pos` move.
    pub fn update_for_insertion(&mut self, pos: usize, len: usize) {
        for span in &mut self.spans {
            if span.start >= pos {
                span.start += len;
            } else if span.end() > pos {
                span.length += len;
            }
        }
    }

    /// Update offsets after removing `[start, start + len)`.
    pub fn update_for_deletion(&mut self, start: usize, len: usize) {
        let end = start + len;
        self.spans.retain_mut(|span| {
            let span_end = span.end();
            if span_end <= start {
                // before the removed range
            } else if span.start >= end {
                span.start -= len;
            } else {
                let kept_before = start.saturating_sub(span.start);
                let kept_after = span_end.saturating_sub(end);
                span.start = span.start.min(start);
                span.length = kept_before + kept_after;
            }
            span.length > 0
        });
    }
}
