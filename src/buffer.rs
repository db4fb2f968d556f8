//! Text snapshots, character spans and the seam to the host editor.
//!
//! Editors address text by character, so every offset the crate hands out is a character
//! offset into the snapshot it was computed from. Regex matching happens on bytes and is
//! converted at the edges with [`char_spans`].

use crate::edit_plan::EditPlan;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
/// Half-open range of character offsets.
pub struct Span {
    /// First character covered.
    pub start: usize,
    /// One past the last character covered.
    pub end: usize,
}

impl Span {
    #[must_use]
    /// Span covering `start..end`; the bounds are swapped if given backwards.
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[must_use]
    /// Empty span marking a cursor position.
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[must_use]
    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    /// Whether `pos` lies within the span, counting both ends.
    pub fn touches(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }
}

#[must_use]
/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[must_use]
/// Byte index of character `pos`, clamped to the end of `text`.
pub fn byte_offset(text: &str, pos: usize) -> usize {
    text.char_indices().nth(pos).map_or(text.len(), |(i, _)| i)
}

#[must_use]
/// Character offset of byte index `byte`.
pub fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

#[must_use]
/// Slice `text` by character offsets.
pub fn substr(text: &str, span: Span) -> &str {
    &text[byte_offset(text, span.start)..byte_offset(text, span.end)]
}

#[must_use]
/// Convert ascending byte ranges into character spans in a single pass.
pub fn char_spans<I>(text: &str, ranges: I) -> Vec<Span>
where
    I: IntoIterator<Item = std::ops::Range<usize>>,
{
    let mut byte = 0;
    let mut chars = 0;
    let mut advance = |target: usize| {
        chars += text[byte..target].chars().count();
        byte = target;
        chars
    };
    ranges
        .into_iter()
        .map(|range| {
            let start = advance(range.start);
            let end = advance(range.end);
            Span { start, end }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One line of a snapshot with its position.
pub struct Line<'a> {
    /// Zero-based row.
    pub row: usize,
    /// Character offset of the first character of the line.
    pub start: usize,
    /// Line content without the trailing newline.
    pub text: &'a str,
}

impl Line<'_> {
    #[must_use]
    /// Character offset just past the line content (before its newline).
    pub fn end(&self) -> usize {
        self.start + char_len(self.text)
    }

    #[must_use]
    /// Whether the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[must_use]
/// Split `text` into lines on `\n`, keeping a trailing empty line if `text` ends with one.
pub fn lines(text: &str) -> Vec<Line<'_>> {
    let mut start = 0;
    text.split('\n')
        .enumerate()
        .map(|(row, line)| {
            let entry = Line {
                row,
                start,
                text: line,
            };
            start += char_len(line) + 1;
            entry
        })
        .collect()
}

#[must_use]
/// Row of the line holding character `pos`.
pub fn row_of(text: &str, pos: usize) -> usize {
    text.chars().take(pos).filter(|&c| c == '\n').count()
}

#[must_use]
/// Zero-based `(row, column)` of character `pos`.
pub fn row_col(text: &str, pos: usize) -> (usize, usize) {
    let all = lines(text);
    let row = row_of(text, pos).min(all.len() - 1);
    (row, pos.saturating_sub(all[row].start))
}

#[must_use]
/// Character offset of `(row, column)`, clamped to the line and the document.
pub fn offset_of(text: &str, row: usize, column: usize) -> usize {
    let all = lines(text);
    all.get(row).map_or_else(
        || char_len(text),
        |line| line.start + column.min(char_len(line.text)),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The run of non-blank lines around a cursor, the unit most commands rewrite.
pub struct Block {
    /// From the start of the first line to the start of the line after the block (or the end
    /// of the text).
    pub span: Span,
    /// The block's lines, without newlines.
    pub lines: Vec<String>,
    /// Leading whitespace of the first line.
    pub indent: String,
    /// Row of the first line.
    pub first_row: usize,
    /// Whether `span` swallows the newline after the last line.
    pub trailing_newline: bool,
}

impl Block {
    #[must_use]
    /// Locate the block around `pos`; `None` when the cursor sits on a blank line.
    pub fn around(text: &str, pos: usize) -> Option<Self> {
        let all = lines(text);
        let row = row_of(text, pos).min(all.len() - 1);
        if all[row].is_blank() {
            return None;
        }
        let mut upper = row;
        while upper > 0 && !all[upper - 1].is_blank() {
            upper -= 1;
        }
        let mut lower = row;
        while lower + 1 < all.len() && !all[lower + 1].is_blank() {
            lower += 1;
        }
        let trailing_newline = lower + 1 < all.len();
        let end = if trailing_newline {
            all[lower + 1].start
        } else {
            char_len(text)
        };
        let first = all[upper].text;
        let indent_len = first.len() - first.trim_start().len();
        Some(Self {
            span: Span::new(all[upper].start, end),
            lines: all[upper..=lower]
                .iter()
                .map(|line| line.text.to_string())
                .collect(),
            indent: first[..indent_len].to_string(),
            first_row: upper,
            trailing_newline,
        })
    }

    #[must_use]
    /// Text that replaces the whole block with `lines`, keeping its trailing newline.
    pub fn render<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let mut out = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

/// What the crate needs from a host editor buffer.
pub trait Buffer {
    /// Current snapshot of the whole document.
    fn text(&self) -> &str;

    /// Active selections in document order; a cursor is an empty span.
    fn selections(&self) -> &[Span];

    /// Apply every edit of `plan` as one change and move the selection if the plan says so.
    fn apply(&mut self, plan: &EditPlan);

    /// All non-overlapping matches of `pattern`, as character spans.
    fn find_all(&self, pattern: &Regex) -> Vec<Span> {
        let text = self.text();
        char_spans(text, pattern.find_iter(text).map(|m| m.range()))
    }

    /// Position of the primary cursor (the end of the first selection).
    fn cursor(&self) -> usize {
        self.selections().first().map_or(0, |sel| sel.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// In-memory buffer standing in for an editor view.
pub struct Document {
    /// Full document text.
    pub text: String,
    /// Selections, primary first.
    pub selections: Vec<Span>,
}

impl Document {
    #[must_use]
    /// Document with a single cursor at character `cursor`.
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            selections: vec![Span::caret(cursor)],
        }
    }
}

impl Buffer for Document {
    fn text(&self) -> &str {
        &self.text
    }

    fn selections(&self) -> &[Span] {
        &self.selections
    }

    fn apply(&mut self, plan: &EditPlan) {
        self.text = plan.apply_to(&self.text);
        let len = char_len(&self.text);
        match plan.selection {
            Some(selection) => self.selections = vec![selection],
            None => {
                for sel in &mut self.selections {
                    *sel = Span::new(sel.start.min(len), sel.end.min(len));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/buffer.rs"]
mod tests;
