//! Section header representation for parsed reStructuredText documents.
//!
//! A header is a title line with an adornment underline and optionally a matching overline.
//! The adornment style, not its visual weight, decides the nesting level: styles are numbered
//! in the order a document first uses them.

use crate::buffer::Span;
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
/// One section title with precise coordinates for navigation and replacement.
pub struct Header {
    /// Nesting depth in the document hierarchy (0 for top-level).
    pub level: usize,
    /// Character offset of the overline, or of the title when there is none.
    pub start: usize,
    /// Character offset just past the underline.
    pub end: usize,
    /// Underline character, doubled when the header also has an overline.
    pub adornment: String,
    /// Section heading text without surrounding whitespace.
    pub title: String,
    /// Matched text including overline and underline, without a final newline.
    pub raw: String,
    /// Position of the header in document order.
    pub idx: usize,
}

impl Header {
    #[must_use]
    /// Span covered by the header's own lines.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    #[must_use]
    /// Whether `pos` falls on the header lines themselves, counting both ends.
    pub fn contains(&self, pos: usize) -> bool {
        self.span().touches(pos)
    }

    #[must_use]
    /// Whether the header is drawn with an overline.
    pub fn is_overlined(&self) -> bool {
        self.adornment.chars().count() == 2
    }

    #[must_use]
    /// Character offset of the end of the title line, where jumps put the cursor.
    pub fn title_end(&self) -> usize {
        let underline = self.raw.rsplit('\n').next().unwrap_or_default();
        self.end - underline.chars().count() - 1
    }
}
