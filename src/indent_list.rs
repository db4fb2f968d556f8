//! Indenting and outdenting list items.
//!
//! An indented item becomes a nested list, which reST only recognises after a blank line, so
//! indenting also separates the item from the line above. With `auto_switch_bullet` on, the
//! marker changes style with the depth so nested lists read differently from their parent.

use crate::buffer::{char_len, lines, row_of, Span};
use crate::config::Config;
use crate::edit_plan::{Edit, EditPlan};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

// Indentation, then the marker: a bullet, or a label with optional parenthesis and ending.
static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)([-+*]|(\(?)(\d+|#|[a-y]|[A-Y]|[MDCLXVImdclxvi]+)([).]))(\s|$)")
        .expect("valid list item regex")
});

const ENDINGS: [&str; 2] = [".", ")"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which way a list item moves.
pub enum Shift {
    /// One level deeper.
    Indent,
    /// One level shallower.
    Outdent,
}

fn cycle<'a>(items: &[&'a str], current: &str, shift: Shift) -> Option<&'a str> {
    let index = items.iter().position(|item| *item == current)?;
    let next = match shift {
        Shift::Indent => (index + 1) % items.len(),
        Shift::Outdent => (index + items.len() - 1) % items.len(),
    };
    items.get(next).copied()
}

/// New marker for `caps` plus the span of its label within the marker, if it has one.
fn switch_marker(caps: &Captures<'_>, config: &Config, shift: Shift) -> (String, Option<Span>) {
    let marker = caps.get(2).map_or("", |m| m.as_str());
    let bullets: Vec<&str> = config.bullet_cycle.iter().map(String::as_str).collect();
    if let Some(bullet) = cycle(&bullets, marker, shift) {
        return (bullet.to_string(), None);
    }
    let (Some(label), Some(ending)) = (caps.get(4), caps.get(5)) else {
        return (marker.to_string(), None);
    };
    let paren = caps.get(3).map_or("", |m| m.as_str());
    // `(a)` only has one ending that keeps it a valid enumerator.
    let ending = if paren.is_empty() {
        cycle(&ENDINGS, ending.as_str(), shift).unwrap_or(ending.as_str())
    } else {
        ending.as_str()
    };
    let label = match label.as_str() {
        "#" => return (format!("{paren}#{ending}"), None),
        digits if digits.bytes().all(|b| b.is_ascii_digit()) => "a",
        _ => "1",
    };
    let start = char_len(paren);
    (
        format!("{paren}{label}{ending}"),
        Some(Span::new(start, start + 1)),
    )
}

#[must_use]
/// Move the list item under the cursor one level in or out.
///
/// `None` when the line is not a list item, or when outdenting a line that does not start with
/// a full indentation step.
pub fn indent_list_item(
    text: &str,
    cursor: usize,
    config: &Config,
    shift: Shift,
) -> Option<EditPlan> {
    let all = lines(text);
    let row = row_of(text, cursor).min(all.len() - 1);
    let line = &all[row];
    let caps = ITEM_RE.captures(line.text)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let written = caps.get(2)?;

    let tab: String = " ".repeat(config.tab_width);
    // Ordered items carry one extra space so their text lines up under the parent's.
    let step = if caps.get(5).is_some() {
        format!("{tab} ")
    } else {
        tab.clone()
    };

    let new_indent = match shift {
        Shift::Indent => format!("{indent}{step}"),
        Shift::Outdent => {
            if !line.text.starts_with(&tab) {
                return None;
            }
            indent.strip_suffix(step.as_str()).unwrap_or(indent).to_string()
        }
    };

    let (marker, label) = if config.auto_switch_bullet {
        switch_marker(&caps, config, shift)
    } else {
        (written.as_str().to_string(), None)
    };
    let tail = &line.text[written.end()..];
    let new_line = format!("{new_indent}{marker}{tail}");

    let prev_blank = row == 0 || all[row - 1].is_blank();
    let mut span = Span::new(line.start, line.end());
    let mut replacement = new_line;
    let mut offset = 0;
    if !prev_blank {
        replacement.insert(0, '\n');
        offset = 1;
    } else if shift == Shift::Outdent && row >= 2 {
        let above = all[row - 2].text;
        let above_indent = &above[..above.len() - above.trim_start().len()];
        if above_indent == new_indent {
            span = Span::new(all[row - 1].start, line.end());
        }
    }
    debug!(?shift, row, %marker, "shifting list item");

    let marker_start = span.start + offset + char_len(&new_indent);
    let selection = label.map_or_else(
        || Span::caret(span.start + char_len(&replacement)),
        |label| Span::new(marker_start + label.start, marker_start + label.end),
    );
    Some(EditPlan::single(Edit::replace(span, replacement)).with_selection(selection))
}

#[cfg(test)]
#[path = "tests/indent_list.rs"]
mod tests;
