//! Smart list continuation.
//!
//! Pressing enter in a list should start the next item. The text before the cursor is
//! classified into one [`LineKind`] by trying each pattern in priority order; the first that
//! matches decides how the new line starts. Ordered and roman items also renumber the rest of
//! their block so the sequence stays contiguous.

use crate::buffer::{byte_offset, char_len, lines, row_of, substr, Block, Span};
use crate::edit_plan::{Edit, EditPlan};
use crate::error::Result;
use crate::roman::{from_roman, to_roman};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

static EMPTY_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)([-+*]|\(?(?:\d+|[a-y]|[A-Y]|#|[MDCLXVImdclxvi]+)[.)])(\s+)$")
        .expect("valid empty item regex")
});

static ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(\s*\(?)(M{0,4}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3}))([.)]\s+)(.*)",
    )
    .expect("valid roman item regex")
});

static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*\(?)(\d+|[a-y]|[A-Y])([.)]\s+)(.*)").expect("valid ordered item regex")
});

static UNORDERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:[-+|*]+|\(?#[).]))(\s+)\S+").expect("valid unordered item regex")
});

static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*[>|%]+)(\s+)\S?").expect("valid quote regex"));

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+\s*").expect("valid word regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the text before the cursor looks like, with the pieces needed to continue it.
pub enum LineKind<'a> {
    /// A marker with nothing after it: the user wants out of the list.
    EmptyItem {
        /// Leading whitespace.
        indent: &'a str,
        /// The bullet or numbering marker, punctuation included.
        marker: &'a str,
        /// Whitespace after the marker.
        spacing: &'a str,
    },
    /// An item numbered with a roman numeral.
    Roman {
        /// Indentation plus an optional opening parenthesis.
        prefix: &'a str,
        /// The numeral as written.
        numeral: &'a str,
        /// Closing punctuation plus following whitespace.
        separator: &'a str,
        /// Item text.
        content: &'a str,
    },
    /// An item numbered with digits or a single letter.
    Ordered {
        /// Indentation plus an optional opening parenthesis.
        prefix: &'a str,
        /// Digits or a letter.
        marker: &'a str,
        /// Closing punctuation plus following whitespace.
        separator: &'a str,
        /// Item text.
        content: &'a str,
    },
    /// A bulleted item or an auto-numbered `#.` item.
    Unordered {
        /// Indentation plus the bullet.
        prefix: &'a str,
        /// Whitespace after the bullet.
        spacing: &'a str,
    },
    /// A line block, quote or comment-like prefix.
    Quote {
        /// Indentation plus the repeated prefix characters.
        prefix: &'a str,
        /// Whitespace after the prefix.
        spacing: &'a str,
    },
    /// Anything else.
    Plain {
        /// Leading whitespace.
        indent: &'a str,
    },
}

fn group<'a>(caps: &Captures<'a>, i: usize) -> &'a str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Whether a numeral can only be read as roman. A lone `c`, `d`, `l`, `m` or `x` is also a
/// letter and is taken as one unless the list is already roman.
fn unambiguous_roman(numeral: &str) -> bool {
    numeral.chars().count() > 1 || matches!(numeral, "i" | "I" | "v" | "V")
}

fn roman_item(line: &str) -> Option<Captures<'_>> {
    ROMAN_RE
        .captures(line)
        .filter(|caps| !group(caps, 2).is_empty())
}

impl<'a> LineKind<'a> {
    #[must_use]
    /// Classify the text before the cursor; the first matching rule wins.
    pub fn classify(before_point: &'a str) -> Self {
        Self::classify_in(before_point, false)
    }

    #[must_use]
    /// Classify the text before the cursor, reading single-letter numerals as roman when
    /// `roman_list` says the surrounding list is numbered that way.
    pub fn classify_in(before_point: &'a str, roman_list: bool) -> Self {
        if let Some(caps) = EMPTY_ITEM_RE.captures(before_point) {
            return Self::EmptyItem {
                indent: group(&caps, 1),
                marker: group(&caps, 2),
                spacing: group(&caps, 3),
            };
        }
        if let Some(caps) = roman_item(before_point) {
            if roman_list || unambiguous_roman(group(&caps, 2)) {
                return Self::Roman {
                    prefix: group(&caps, 1),
                    numeral: group(&caps, 2),
                    separator: group(&caps, 3),
                    content: group(&caps, 4),
                };
            }
        }
        if let Some(caps) = ORDERED_RE.captures(before_point) {
            return Self::Ordered {
                prefix: group(&caps, 1),
                marker: group(&caps, 2),
                separator: group(&caps, 3),
                content: group(&caps, 4),
            };
        }
        if let Some(caps) = UNORDERED_RE.captures(before_point) {
            return Self::Unordered {
                prefix: group(&caps, 1),
                spacing: group(&caps, 2),
            };
        }
        if let Some(caps) = QUOTE_RE.captures(before_point) {
            return Self::Quote {
                prefix: group(&caps, 1),
                spacing: group(&caps, 2),
            };
        }
        let indent_len = before_point.len() - before_point.trim_start().len();
        Self::Plain {
            indent: &before_point[..indent_len],
        }
    }
}

#[must_use]
/// Add one to a decimal string of any length. Leading zeros are dropped.
pub fn increment_decimal(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut out: Vec<u8> = trimmed.bytes().collect();
    for digit in out.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}

#[must_use]
/// The letter after `c`, or `None` past `z`/`Z`.
pub fn next_letter(c: char) -> Option<char> {
    match c {
        'a'..='y' | 'A'..='Y' => char::from_u32(u32::from(c) + 1),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Marker {
    Decimal(String),
    Letter(char),
}

impl Marker {
    fn parse(marker: &str) -> Option<Self> {
        if marker.bytes().all(|b| b.is_ascii_digit()) {
            return Some(Self::Decimal(marker.to_string()));
        }
        let mut chars = marker.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::Letter(c)),
            _ => None,
        }
    }

    fn succ(&self) -> Option<Self> {
        match self {
            Self::Decimal(digits) => Some(Self::Decimal(increment_decimal(digits))),
            Self::Letter(c) => next_letter(*c).map(Self::Letter),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::Decimal(digits) => digits.clone(),
            Self::Letter(c) => c.to_string(),
        }
    }
}

fn relabel(caps: &Captures<'_>, label: &str) -> String {
    format!(
        "{}{label}{}{}",
        group(caps, 1),
        group(caps, 3),
        group(caps, 4)
    )
}

#[must_use]
/// Renumber every digit or letter item of a block from the first item's marker.
///
/// The first item keeps its marker and decides the kind for the whole block. Letter
/// sequences stop at `z`/`Z`: items past that point keep whatever marker they had.
pub fn renumber_ordered<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut next: Option<Marker> = None;
    let mut started = false;
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let Some(caps) = ORDERED_RE.captures(line) else {
                return line.to_string();
            };
            let written = group(&caps, 2);
            let label = match (&next, started) {
                (Some(marker), true) => marker.label(),
                _ => written.to_string(),
            };
            next = if started {
                next.as_ref().and_then(Marker::succ)
            } else {
                Marker::parse(written).and_then(|m| m.succ())
            };
            started = true;
            relabel(&caps, &label)
        })
        .collect()
}

/// Renumber every roman item of a block from the first item's value, in the first item's case.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if the sequence runs past 4999.
pub fn renumber_roman<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>> {
    let mut next: Option<(u32, bool)> = None;
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.as_ref();
        let Some(caps) = roman_item(line) else {
            out.push(line.to_string());
            continue;
        };
        let written = group(&caps, 2);
        match next {
            None => {
                out.push(line.to_string());
                let lower = written == written.to_lowercase();
                next = Some((from_roman(&written.to_uppercase()) + 1, lower));
            }
            Some((value, lower)) => {
                let numeral = to_roman(value)?;
                let numeral = if lower {
                    numeral.to_lowercase()
                } else {
                    numeral
                };
                out.push(relabel(&caps, &numeral));
                next = Some((value + 1, lower));
            }
        }
    }
    Ok(out)
}

/// Start the next line of whatever list or block the cursor is in.
///
/// # Errors
///
/// Returns [`crate::Error::Range`] if a roman sequence would pass 4999.
pub fn continue_list(text: &str, cursor: usize) -> Result<EditPlan> {
    let all = lines(text);
    let line = &all[row_of(text, cursor).min(all.len() - 1)];
    let cursor = cursor.min(line.end());
    let before_point = substr(text, Span::new(line.start, cursor));
    let kind = LineKind::classify_in(before_point, in_roman_list(text, cursor));
    debug!(?kind, "continuing list line");

    match kind {
        LineKind::EmptyItem {
            indent,
            marker,
            spacing,
        } => {
            let blanked: String = marker
                .chars()
                .map(|c| if c.is_whitespace() { c } else { ' ' })
                .collect();
            let replacement = format!("{indent}{blanked}{spacing}");
            let caret = line.start + char_len(&replacement);
            Ok(
                EditPlan::single(Edit::replace(Span::new(line.start, cursor), replacement))
                    .with_selection(Span::caret(caret)),
            )
        }
        LineKind::Roman {
            prefix,
            numeral,
            separator,
            ..
        } => {
            let next = to_roman(from_roman(&numeral.to_uppercase()) + 1)?;
            let next = if numeral == numeral.to_lowercase() {
                next.to_lowercase()
            } else {
                next
            };
            let insert = format!("\n{prefix}{next}{separator}");
            insert_and_renumber(text, cursor, &insert, renumber_roman)
        }
        LineKind::Ordered {
            prefix,
            marker,
            separator,
            ..
        } => {
            let next = Marker::parse(marker)
                .and_then(|m| m.succ())
                .map_or_else(|| marker.to_string(), |m| m.label());
            let insert = format!("\n{prefix}{next}{separator}");
            insert_and_renumber(text, cursor, &insert, |block| Ok(renumber_ordered(block)))
        }
        LineKind::Unordered { prefix, spacing } | LineKind::Quote { prefix, spacing } => {
            Ok(plain_insert(cursor, format!("\n{prefix}{spacing}")))
        }
        LineKind::Plain { .. } => Ok(plain_insert(
            cursor,
            format!("\n{}", WORD_RE.replace_all(before_point, "")),
        )),
    }
}

/// Whether an earlier line of the block around `cursor` is an unambiguous roman item.
fn in_roman_list(text: &str, cursor: usize) -> bool {
    let Some(block) = Block::around(text, cursor) else {
        return false;
    };
    let row = row_of(text, cursor) - block.first_row;
    block.lines[..row].iter().any(|line| {
        roman_item(line).is_some_and(|caps| unambiguous_roman(group(&caps, 2)))
    })
}

fn plain_insert(cursor: usize, insert: String) -> EditPlan {
    let caret = cursor + char_len(&insert);
    EditPlan::single(Edit::insert(cursor, insert)).with_selection(Span::caret(caret))
}

/// Insert the new item, then rewrite the whole block it landed in as one edit.
fn insert_and_renumber<F>(
    text: &str,
    cursor: usize,
    insert: &str,
    renumber: F,
) -> Result<EditPlan>
where
    F: Fn(&[String]) -> Result<Vec<String>>,
{
    // Text after the cursor moves onto the new line and is left alone by renumbering.
    let tail = lines(text)
        .get(row_of(text, cursor))
        .map_or(0, |line| line.end().saturating_sub(cursor));
    let mut inserted = text.to_string();
    inserted.insert_str(byte_offset(text, cursor), insert);
    let inserted_len = char_len(insert);
    let new_cursor = cursor + inserted_len;

    let Some(block) = Block::around(&inserted, new_cursor) else {
        return Ok(plain_insert(cursor, insert.to_string()));
    };
    let renumbered = renumber(&block.lines)?;

    let new_row = row_of(&inserted, new_cursor) - block.first_row;
    let row_start = block.span.start
        + renumbered[..new_row]
            .iter()
            .map(|line| char_len(line) + 1)
            .sum::<usize>();
    let caret = row_start + char_len(&renumbered[new_row]).saturating_sub(tail);

    let span = Span::new(block.span.start, block.span.end - inserted_len);
    Ok(EditPlan::single(Edit::replace(span, block.render(&renumbered)))
        .with_selection(Span::caret(caret)))
}

#[cfg(test)]
#[path = "tests/smart_list.rs"]
mod tests;
