//! Section header tree for reStructuredText documents.
//!
//! reST has no fixed heading syntax per level: the first adornment style a document uses is
//! level 0, the next new style level 1, and so on. The tree is rebuilt from a full snapshot on
//! every query, so it never goes stale; the only state kept between commands is the
//! [`LevelCache`] the host owns.
//!
//! Reference: <https://docutils.sourceforge.io/docs/ref/rst/restructuredtext.html#sections>

use crate::buffer::{char_len, char_offset, Block, Span};
use crate::edit_plan::{Edit, EditPlan};
use crate::header::Header;
use crate::width::display_width;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Optional overline, title, underline. Adornments are drawn from ASCII punctuation.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([[:punct:]]*)\n(.+)\n([[:punct:]]+)").expect("valid header regex")
});

/// Conventional adornment ladder (Sphinx's), used where a document does not decide.
pub const DEFAULT_LADDER: [&str; 10] = ["**", "=", "-", "^", "\"", "+", "~", "#", "'", ":"];

#[derive(Debug, Clone, Default)]
/// Every header of one document snapshot, in document order.
pub struct HeaderTree {
    headers: Vec<Header>,
    text_len: usize,
}

impl HeaderTree {
    #[must_use]
    /// Parse all section headers of `text`.
    pub fn parse(text: &str) -> Self {
        // A fictitious blank first line lets a title on the very first line match without an
        // overline. Every offset found is therefore one character too far.
        let prefixed = format!("\n{text}");
        let mut styles: Vec<String> = Vec::new();
        let mut headers = Vec::new();

        for caps in HEADER_RE.captures_iter(&prefixed) {
            let (Some(over), Some(title), Some(under)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                continue;
            };
            let (over_text, title_text, under_text) =
                (over.as_str(), title.as_str(), under.as_str());
            let mut under_chars = under_text.chars();
            let Some(ch) = under_chars.next() else {
                continue;
            };
            let valid = (over_text.is_empty() || over_text == under_text)
                && under_text.chars().count() >= title_text.chars().count()
                && under_chars.all(|c| c == ch);
            if !valid {
                continue;
            }

            let width = if over_text.is_empty() { 1 } else { 2 };
            let adornment: String = std::iter::repeat_n(ch, width).collect();
            let level = styles.iter().position(|s| *s == adornment).unwrap_or_else(|| {
                styles.push(adornment.clone());
                styles.len() - 1
            });
            let raw = if over_text.is_empty() {
                format!("{title_text}\n{under_text}")
            } else {
                format!("{over_text}\n{title_text}\n{under_text}")
            };
            let first_byte = if over_text.is_empty() {
                title.start()
            } else {
                over.start()
            };
            let start = char_offset(&prefixed, first_byte) - 1;
            let end = start + char_len(&raw);
            headers.push(Header {
                level,
                start,
                end,
                adornment,
                title: title_text.trim().to_string(),
                raw,
                idx: headers.len(),
            });
        }

        debug!(count = headers.len(), styles = styles.len(), "parsed header tree");
        Self {
            headers,
            text_len: char_len(text),
        }
    }

    #[must_use]
    /// All headers in document order.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    #[must_use]
    /// Whether the document has no headers.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    #[must_use]
    /// The deepest header whose region contains `pos`.
    ///
    /// When several headers at the deepest level qualify, the one discovered last wins.
    pub fn belong_to(&self, pos: usize) -> Option<&Header> {
        self.headers
            .iter()
            .filter(|h| self.region(h).touches(pos))
            .max_by_key(|h| h.level)
    }

    #[must_use]
    /// Text owned by `header`, both ends inclusive.
    ///
    /// The region runs to just before the next header of the same or a higher level, or to
    /// the end of the document.
    pub fn region(&self, header: &Header) -> Span {
        let end = self
            .headers
            .iter()
            .skip(header.idx + 1)
            .find(|next| next.level <= header.level)
            .map_or(self.text_len, |next| next.start.saturating_sub(1));
        Span::new(header.start, end.max(header.start))
    }

    fn scoped(&self, header: &Header, same_or_higher: bool) -> (usize, Vec<&Header>) {
        let scoped: Vec<&Header> = self
            .headers
            .iter()
            .filter(|h| !same_or_higher || h.level <= header.level)
            .collect();
        let index = scoped
            .iter()
            .position(|h| h.idx == header.idx)
            .unwrap_or(scoped.len());
        (index, scoped)
    }

    #[must_use]
    /// The header after `header`, optionally skipping deeper ones.
    pub fn next(&self, header: &Header, same_or_higher: bool) -> Option<&Header> {
        let (index, scoped) = self.scoped(header, same_or_higher);
        scoped.get(index + 1).copied()
    }

    #[must_use]
    /// The header `offset` steps from `header` going backwards, optionally skipping deeper
    /// ones. `None` when `header` is the first candidate; an offset of 0 yields `header` itself.
    pub fn prev(&self, header: &Header, same_or_higher: bool, offset: isize) -> Option<&Header> {
        let (index, scoped) = self.scoped(header, same_or_higher);
        if index == 0 {
            return None;
        }
        scoped.get(index.checked_add_signed(offset)?).copied()
    }

    #[must_use]
    /// Adornment ladder for level changes, highest level first.
    ///
    /// Starts from [`DEFAULT_LADDER`], takes the styles the document actually uses at their
    /// levels, then re-adds any default style that dropped out: overlined styles in front,
    /// underline-only ones at the back.
    pub fn levels(&self) -> Vec<String> {
        let mut ladder: Vec<String> = DEFAULT_LADDER.iter().map(ToString::to_string).collect();
        for header in &self.headers {
            if header.level < ladder.len() {
                ladder[header.level].clone_from(&header.adornment);
            } else {
                ladder.push(header.adornment.clone());
            }
        }

        let mut levels: Vec<String> = Vec::with_capacity(ladder.len());
        for adornment in ladder {
            if !levels.contains(&adornment) {
                levels.push(adornment);
            }
        }
        for adornment in DEFAULT_LADDER {
            if !levels.iter().any(|l| l == adornment) {
                if adornment.len() == 2 {
                    levels.insert(0, adornment.to_string());
                } else {
                    levels.push(adornment.to_string());
                }
            }
        }
        levels
    }
}

#[must_use]
/// Render a header for `title` in the given adornment style.
///
/// The adornment spans the display width of the title (wide characters count double, and never
/// less than its character count) plus twice its indentation. An overline is drawn for
/// two-character styles or when forced.
pub fn make_header(title: &str, adornment: &str, force_overline: bool) -> String {
    let title = title.trim_end();
    let body = title.trim_start();
    let indent = char_len(title) - char_len(body);
    let Some(ch) = adornment.chars().next() else {
        return format!("{title}\n");
    };
    // Zero-width marks still count toward the length the parser checks.
    let width = display_width(body).max(char_len(body)) + indent * 2;
    let strike: String = std::iter::repeat_n(ch, width).collect();
    if force_overline || adornment.chars().count() == 2 {
        format!("{strike}\n{title}\n{strike}\n")
    } else {
        format!("{title}\n{strike}\n")
    }
}

#[derive(Debug, Clone, Default)]
/// Ladder remembered across consecutive level changes of one header.
///
/// Changing a level rewrites the document, which can change which style is seen first and so
/// reshuffle a freshly computed ladder. Keeping the ladder while the same header is being
/// promoted or demoted makes repeated presses walk a stable sequence. The host must call
/// [`LevelCache::invalidate`] whenever the buffer changes for any other reason.
pub struct LevelCache {
    entry: Option<(usize, Vec<String>)>,
}

impl LevelCache {
    #[must_use]
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the remembered ladder.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    #[must_use]
    /// Index of the header the ladder was computed for, if any.
    pub fn header_idx(&self) -> Option<usize> {
        self.entry.as_ref().map(|(idx, _)| *idx)
    }

    fn ladder(&mut self, tree: &HeaderTree, idx: usize) -> &[String] {
        if self.header_idx() != Some(idx) {
            self.entry = Some((idx, tree.levels()));
        }
        self.entry
            .as_ref()
            .map_or(&[][..], |(_, ladder)| ladder.as_slice())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Direction of a level change.
pub enum LevelChange {
    /// Towards the top of the ladder (a more important header).
    Up,
    /// Towards the bottom of the ladder (a more nested header).
    Down,
}

#[must_use]
/// Promote or demote the header under the cursor by one ladder step.
///
/// The cursor must be on the header lines. Stepping off either end of the ladder does nothing.
pub fn change_level(
    text: &str,
    cursor: usize,
    cache: &mut LevelCache,
    change: LevelChange,
) -> Option<EditPlan> {
    let tree = HeaderTree::parse(text);
    let header = tree.belong_to(cursor)?;
    if !header.contains(cursor) {
        return None;
    }
    let ladder = cache.ladder(&tree, header.idx);
    let current = ladder.iter().position(|a| *a == header.adornment)?;
    let target = match change {
        LevelChange::Up => current.checked_sub(1)?,
        LevelChange::Down => current + 1,
    };
    let adornment = ladder.get(target)?;
    debug!(
        title = %header.title,
        from = %header.adornment,
        to = %adornment,
        "changing header level"
    );

    let replacement = make_header(&header.title, adornment, false);
    let title_line = replacement
        .lines()
        .position(|line| line.trim() == header.title)
        .unwrap_or(0);
    let caret = header.start
        + replacement
            .split_inclusive('\n')
            .take(title_line)
            .map(char_len)
            .sum::<usize>()
        + char_len(&header.title);
    let span = Span::new(header.start, (header.end + 1).min(char_len(text)));
    Some(EditPlan::single(Edit::replace(span, replacement)).with_selection(Span::caret(caret)))
}

#[must_use]
/// Cursor position after jumping to the next or previous header.
///
/// Jumping back from inside a section's body lands on that section's own header; from the
/// header itself it goes to the one before. Jumping forward from above the first header lands
/// on the first header.
pub fn jump(text: &str, cursor: usize, forward: bool, same_or_higher: bool) -> Option<usize> {
    let tree = HeaderTree::parse(text);
    let Some(header) = tree.belong_to(cursor) else {
        return forward
            .then(|| tree.headers().first())
            .flatten()
            .filter(|first| first.start > cursor)
            .map(Header::title_end);
    };
    let target = if forward {
        tree.next(header, same_or_higher)
    } else {
        let offset = if header.contains(cursor) { -1 } else { 0 };
        tree.prev(header, same_or_higher, offset)
    };
    target.map(Header::title_end)
}

#[must_use]
/// Body of the section whose header is under the cursor, for folding.
///
/// `None` when the cursor is not on a header line; hosts then fall back to inserting a tab.
pub fn fold_region(text: &str, cursor: usize) -> Option<Span> {
    let tree = HeaderTree::parse(text);
    let header = tree.belong_to(cursor)?;
    if !header.contains(cursor) {
        return None;
    }
    let region = tree.region(header);
    let start = header.start + char_len(&header.raw) + 1;
    Some(Span::new(start.min(region.end), region.end))
}

#[must_use]
/// Redraw a hand-typed header so its adornment fits the title.
///
/// The block around the cursor must be a title plus underline, or overline, title and
/// underline using the same character.
pub fn fill_header_markings(text: &str, cursor: usize) -> Option<EditPlan> {
    let block = Block::around(text, cursor)?;
    let lines = &block.lines;
    let ch = lines.last()?.chars().next()?;
    match lines.len() {
        2 => {}
        3 if lines[0].starts_with(ch) => {}
        _ => return None,
    }
    let title = &lines[lines.len() - 2];
    let header = make_header(title, &ch.to_string(), lines.len() == 3);
    Some(EditPlan::single(Edit::replace(block.span, header)))
}

#[cfg(test)]
#[path = "tests/header_tree.rs"]
mod tests;
