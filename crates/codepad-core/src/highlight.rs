//! Incremental lexical highlighting.
//!
//! The highlighter assigns [`TokenStyle`]s to the text of a bound [`LanguageDescriptor`]. After
//! an edit only the touched lines are reset and rescanned. Block comments are the exception:
//! a single edit can open or close a comment whose extent is unknown locally, so whenever a
//! block-comment delimiter is involved the whole document is rescanned.
//!
//! Inside a line, token classes are applied in a fixed precedence order, each overriding the
//! previous ones: flagged tokens (annotations), keywords, operators, brackets, string literals
//! and finally line comments. String literals never span lines, and a line comment token
//! inside a string literal is ignored.

use crate::buffer::TextBuffer;
use crate::edit::{Edit, EditKind};
use crate::line_index::LineIndex;
use crate::spans::{HighlightSpan, SpanSet, StyleId, TokenStyle};
use codepad_lang::LanguageDescriptor;
use regex::Regex;
use std::ops::Range;

/// What a call to [`IncrementalHighlighter::highlight`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightPass {
    /// No language bound (plain text): nothing to do.
    Skipped,
    /// The whole document was rescanned.
    Full,
    /// Only these lines were rescanned.
    Lines(Range<usize>),
}

/// Counters for the passes run so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Number of full-document passes.
    pub full_passes: usize,
    /// Number of line-scoped passes.
    pub line_passes: usize,
}

/// A descriptor plus its precompiled matchers.
#[derive(Debug, Clone)]
struct CompiledLanguage {
    descriptor: LanguageDescriptor,
    keywords: Option<Regex>,
    /// Operators as char sequences, longest first.
    operators: Vec<Vec<char>>,
    line_comment: Option<Vec<char>>,
    block_comment: Option<(Vec<char>, Vec<char>)>,
}

impl CompiledLanguage {
    fn new(descriptor: LanguageDescriptor) -> Self {
        let keywords = compile_keywords(&descriptor);

        let mut operators: Vec<Vec<char>> = descriptor
            .operators
            .iter()
            .filter(|op| !op.is_empty())
            .map(|op| op.chars().collect())
            .collect();
        operators.sort_by_key(|op| std::cmp::Reverse(op.len()));

        let line_comment = match &descriptor.comments.line {
            Some(token) if descriptor.comments.has_line() => Some(token.chars().collect()),
            _ => None,
        };
        let block_comment = descriptor
            .comments
            .block_pair()
            .map(|(open, close)| (open.chars().collect(), close.chars().collect()));

        Self {
            descriptor,
            keywords,
            operators,
            line_comment,
            block_comment,
        }
    }
}

fn compile_keywords(descriptor: &LanguageDescriptor) -> Option<Regex> {
    let mut words: Vec<&str> = descriptor
        .keywords
        .iter()
        .map(String::as_str)
        .filter(|k| !k.is_empty())
        .collect();
    if words.is_empty() {
        return None;
    }
    // Longest first so that alternation prefers `interface` over `int`.
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let pattern = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!(
                language = %descriptor.name,
                "keyword matcher failed to compile, keywords disabled: {err}"
            );
            None
        }
    }
}

/// Lexical highlighter that recolors only what an edit touched.
#[derive(Debug, Clone, Default)]
pub struct IncrementalHighlighter {
    language: Option<CompiledLanguage>,
    spans: SpanSet,
    /// Block comment extents from the last full pass, shifted with every edit.
    block_comments: Vec<Range<usize>>,
    /// The last block comment has no closing delimiter and runs to the document end.
    open_ended: bool,
    stats: HighlightStats,
}

impl IncrementalHighlighter {
    /// Create a highlighter bound to plain text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a language (`None` = plain text). All existing spans are cleared; the caller runs
    /// a full pass afterwards when a language is bound.
    pub fn set_language(&mut self, language: Option<LanguageDescriptor>) {
        self.clear();
        self.language = language.map(CompiledLanguage::new);
    }

    /// The bound language, if any.
    pub fn language(&self) -> Option<&LanguageDescriptor> {
        self.language.as_ref().map(|l| &l.descriptor)
    }

    /// Current spans in document order.
    pub fn spans(&self) -> &[HighlightSpan] {
        self.spans.as_slice()
    }

    /// Spans overlapping `range`.
    pub fn spans_in(&self, range: Range<usize>) -> &[HighlightSpan] {
        self.spans.query(range)
    }

    /// Style at `pos` (`None` = normal).
    pub fn style_at(&self, pos: usize) -> Option<StyleId> {
        self.spans.style_at(pos)
    }

    /// Block comment extents found by the last full pass (shifted by later edits).
    pub fn block_comments(&self) -> &[Range<usize>] {
        &self.block_comments
    }

    /// Pass counters.
    pub fn stats(&self) -> HighlightStats {
        self.stats
    }

    /// Reset every span to the normal style.
    pub fn clear(&mut self) {
        self.spans.clear();
        self.block_comments.clear();
        self.open_ended = false;
    }

    /// Returns `true` if the last block comment is unterminated.
    pub fn has_open_block_comment(&self) -> bool {
        self.open_ended
    }

    /// Keep spans aligned with the buffer right after `edit` was applied, before the deferred
    /// recolor runs.
    pub fn shift_for_edit(&mut self, edit: &Edit) {
        let len = edit.char_len();
        if len == 0 {
            return;
        }
        let pos = edit.position;
        match edit.kind {
            EditKind::Insert => {
                self.spans.update_for_insertion(pos, len);
                let open = self.open_ended;
                let count = self.block_comments.len();
                for (i, range) in self.block_comments.iter_mut().enumerate() {
                    // An unterminated comment keeps running to the document end.
                    let runs_to_end = open && i + 1 == count;
                    if range.start >= pos {
                        range.start += len;
                        range.end += len;
                    } else if range.end > pos || runs_to_end {
                        range.end += len;
                    }
                }
            }
            EditKind::Remove => {
                self.spans.update_for_deletion(pos, len);
                let end = pos + len;
                let shift = |x: usize| {
                    if x <= pos {
                        x
                    } else if x >= end {
                        x - len
                    } else {
                        pos
                    }
                };
                for range in &mut self.block_comments {
                    *range = shift(range.start)..shift(range.end);
                }
                if self.open_ended && self.block_comments.last().is_some_and(|r| r.is_empty()) {
                    self.open_ended = false;
                }
                self.block_comments.retain(|r| !r.is_empty());
            }
        }
    }

    /// Recolor after `change` (already applied and shifted), or the whole document when
    /// `change` is `None`.
    pub fn highlight<B: TextBuffer + ?Sized>(
        &mut self,
        buffer: &B,
        lines: &LineIndex,
        change: Option<&Edit>,
    ) -> HighlightPass {
        if self.language.is_none() {
            return HighlightPass::Skipped;
        }
        let Some(edit) = change else {
            self.full_pass(buffer);
            return HighlightPass::Full;
        };

        let doc_len = buffer.len_chars();
        let first = lines.line_of(edit.position.min(doc_len));
        let last = match edit.kind {
            EditKind::Insert => lines.line_of(edit.end().min(doc_len)),
            EditKind::Remove => first,
        };
        let region = lines.line_range(first, doc_len).start..lines.line_end(last, doc_len);

        if self.touches_block_delimiter(buffer, edit, &region) {
            tracing::debug!(?region, "block comment delimiter touched, full rehighlight");
            self.full_pass(buffer);
            return HighlightPass::Full;
        }

        self.line_pass(buffer, region);
        HighlightPass::Lines(first..last + 1)
    }

    fn touches_block_delimiter<B: TextBuffer + ?Sized>(
        &self,
        buffer: &B,
        edit: &Edit,
        region: &Range<usize>,
    ) -> bool {
        let Some((open, close)) = self
            .language
            .as_ref()
            .and_then(|l| l.descriptor.comments.block_pair())
        else {
            return false;
        };
        if edit.content.contains(open) || edit.content.contains(close) {
            return true;
        }
        let text = buffer.slice(region.start, region.end - region.start);
        if text.contains(open) || text.contains(close) {
            return true;
        }
        // A delimiter that was partially deleted no longer shows up in the text, but the
        // comment it bounded still starts or ends on this line. The end of an unterminated
        // comment is the document end, not a delimiter.
        let on_line = |x: usize| region.start <= x && x <= region.end;
        let count = self.block_comments.len();
        self.block_comments.iter().enumerate().any(|(i, r)| {
            let open = self.open_ended && i + 1 == count;
            on_line(r.start) || (!open && on_line(r.end))
        })
    }

    fn full_pass<B: TextBuffer + ?Sized>(&mut self, buffer: &B) {
        let Some(language) = &self.language else {
            return;
        };
        let text = buffer.text();
        let scan = scan_document(language, &text);
        tracing::trace!(
            spans = scan.spans.len(),
            blocks = scan.block_comments.len(),
            open_ended = scan.open_ended,
            "full pass"
        );
        self.spans.replace_all(scan.spans);
        self.block_comments = scan.block_comments;
        self.open_ended = scan.open_ended;
        self.stats.full_passes += 1;
    }

    /// Rescan whole lines in `region` with block-comment detection disabled. Lines lying
    /// entirely inside a known block comment keep the comment style.
    fn line_pass<B: TextBuffer + ?Sized>(&mut self, buffer: &B, region: Range<usize>) {
        let Some(language) = &self.language else {
            return;
        };
        let text = buffer.slice(region.start, region.end - region.start);
        let mut spans = Vec::new();
        let mut offset = region.start;
        for line in text.split('\n') {
            let chars: Vec<char> = line.chars().collect();
            let line_end = offset + chars.len();
            let in_block = self
                .block_comments
                .iter()
                .any(|r| r.start <= offset && line_end <= r.end);
            let styles = if in_block {
                vec![Some(TokenStyle::Comment); chars.len()]
            } else {
                scan_segment(language, &chars)
            };
            push_spans(&styles, offset, &mut spans);
            offset = line_end + 1;
        }
        self.spans.replace_range(region, spans);
        self.stats.line_passes += 1;
    }
}

type Styles = Vec<Option<TokenStyle>>;

struct DocumentScan {
    spans: Vec<HighlightSpan>,
    block_comments: Vec<Range<usize>>,
    /// The last entry of `block_comments` was never closed.
    open_ended: bool,
}

/// Full-document scan with block-comment detection.
fn scan_document(language: &CompiledLanguage, text: &str) -> DocumentScan {
    let mut spans = Vec::new();
    let mut blocks = Vec::new();
    let mut open_block: Option<usize> = None;
    let mut offset = 0usize;

    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        let mut styles: Styles = vec![None; chars.len()];
        let mut col = 0usize;

        while col <= chars.len() {
            if let Some(block_start) = open_block {
                let Some((_, close)) = &language.block_comment else {
                    break;
                };
                match find_token(&chars, close, col) {
                    Some(end) => {
                        let end = end + close.len();
                        fill(&mut styles[col..end], TokenStyle::Comment);
                        blocks.push(block_start..offset + end);
                        open_block = None;
                        col = end;
                    }
                    None => {
                        fill(&mut styles[col..], TokenStyle::Comment);
                        break;
                    }
                }
            } else {
                let segment = scan_segment(language, &chars[col..]);
                let opener = language.block_comment.as_ref().and_then(|(open, _)| {
                    find_code_token(&chars[col..], open, &segment).map(|at| (at, open.len()))
                });
                match opener {
                    Some((at, open_len)) => {
                        styles[col..col + at].copy_from_slice(&segment[..at]);
                        let start = col + at;
                        fill(&mut styles[start..start + open_len], TokenStyle::Comment);
                        open_block = Some(offset + start);
                        col = start + open_len;
                    }
                    None => {
                        styles[col..].copy_from_slice(&segment);
                        break;
                    }
                }
            }
        }

        push_spans(&styles, offset, &mut spans);
        offset += chars.len() + 1;
    }

    // An unmatched opener comments out the rest of the document.
    if let Some(block_start) = open_block {
        blocks.push(block_start..offset.saturating_sub(1));
    }
    DocumentScan {
        spans,
        block_comments: blocks,
        open_ended: open_block.is_some(),
    }
}

/// Styles for one line (or the code part of one line), without block comments.
fn scan_segment(language: &CompiledLanguage, chars: &[char]) -> Styles {
    let mut styles: Styles = vec![None; chars.len()];
    let descriptor = &language.descriptor;

    if let Some(prefix) = descriptor.annotation_prefix {
        mark_annotations(chars, prefix, &mut styles);
    }
    if let Some(regex) = &language.keywords {
        mark_keywords(regex, descriptor.whole_words, chars, &mut styles);
    }
    mark_operators(&language.operators, chars, &mut styles);
    for (ch, style) in chars.iter().zip(styles.iter_mut()) {
        if descriptor.brackets.contains(ch) {
            *style = Some(TokenStyle::Bracket);
        }
    }
    mark_strings(
        &descriptor.string_delimiters,
        descriptor.escape_char,
        chars,
        &mut styles,
    );
    if let Some(token) = &language.line_comment
        && let Some(at) = find_code_token(chars, token, &styles)
    {
        fill(&mut styles[at..], TokenStyle::Comment);
    }
    styles
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn fill(styles: &mut [Option<TokenStyle>], style: TokenStyle) {
    styles.fill(Some(style));
}

fn mark_annotations(chars: &[char], prefix: char, styles: &mut Styles) {
    let mut i = 0;
    while i < chars.len() {
        let at_word_start = i == 0 || !is_word_char(chars[i - 1]);
        if chars[i] == prefix && at_word_start {
            let end = i + 1 + chars[i + 1..]
                .iter()
                .take_while(|&&c| is_word_char(c) || c == '.')
                .count();
            if end > i + 1 {
                fill(&mut styles[i..end], TokenStyle::Annotation);
                i = end;
                continue;
            }
        }
        i += 1;
    }
}

fn mark_keywords(regex: &Regex, whole_words: bool, chars: &[char], styles: &mut Styles) {
    let line: String = chars.iter().collect();
    // Byte offset of every char, for mapping regex matches back to char columns.
    let byte_starts: Vec<usize> = line.char_indices().map(|(b, _)| b).collect();
    let to_col = |byte: usize| byte_starts.partition_point(|&b| b < byte);

    for m in regex.find_iter(&line) {
        let start = to_col(m.start());
        let end = to_col(m.end());
        if whole_words {
            let before = start.checked_sub(1).map(|i| chars[i]);
            let after = chars.get(end).copied();
            if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
                continue;
            }
        }
        fill(&mut styles[start..end], TokenStyle::Keyword);
    }
}

fn mark_operators(operators: &[Vec<char>], chars: &[char], styles: &mut Styles) {
    if operators.is_empty() {
        return;
    }
    let mut i = 0;
    while i < chars.len() {
        match operators.iter().find(|op| chars[i..].starts_with(op)) {
            Some(op) => {
                fill(&mut styles[i..i + op.len()], TokenStyle::Operator);
                i += op.len();
            }
            None => i += 1,
        }
    }
}

fn mark_strings(delimiters: &[char], escape: Option<char>, chars: &[char], styles: &mut Styles) {
    let mut i = 0;
    while i < chars.len() {
        let quote = chars[i];
        if !delimiters.contains(&quote) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        let mut end = chars.len();
        while j < chars.len() {
            if Some(chars[j]) == escape {
                j += 2;
                continue;
            }
            if chars[j] == quote {
                end = j + 1;
                break;
            }
            j += 1;
        }
        fill(&mut styles[i..end], TokenStyle::StringLiteral);
        i = end;
    }
}

fn find_token(chars: &[char], token: &[char], from: usize) -> Option<usize> {
    if token.is_empty() || from > chars.len() {
        return None;
    }
    chars[from..]
        .windows(token.len())
        .position(|w| w == token)
        .map(|at| at + from)
}

/// First occurrence of `token` that is not inside a string literal or comment.
fn find_code_token(chars: &[char], token: &[char], styles: &[Option<TokenStyle>]) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    chars.windows(token.len()).enumerate().find_map(|(at, w)| {
        let in_literal = matches!(
            styles[at],
            Some(TokenStyle::StringLiteral | TokenStyle::Comment)
        );
        (w == token && !in_literal).then_some(at)
    })
}

fn push_spans(styles: &[Option<TokenStyle>], offset: usize, out: &mut Vec<HighlightSpan>) {
    let mut i = 0;
    while i < styles.len() {
        let Some(style) = styles[i] else {
            i += 1;
            continue;
        };
        let start = i;
        while i < styles.len() && styles[i] == Some(style) {
            i += 1;
        }
        out.push(HighlightSpan::new(offset + start, i - start, style.style_id()));
    }
}
