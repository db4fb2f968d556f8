//! Inline markup helpers working on the current selections.

use crate::buffer::{char_len, lines, row_of, substr, Span};
use crate::edit_plan::{Edit, EditPlan};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
/// Inline markup that can wrap a selection.
pub enum Markup {
    /// `**strong**`
    Strong,
    /// `*emphasis*`
    Emphasis,
    /// ``` ``literal`` ```
    Literal,
    /// `` `interpreted` ``
    Interpreted,
    /// `|substitution|`
    Substitution,
}

impl Markup {
    #[must_use]
    /// The delimiter written on both sides.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Strong => "**",
            Self::Emphasis => "*",
            Self::Literal => "``",
            Self::Interpreted => "`",
            Self::Substitution => "|",
        }
    }
}

#[must_use]
/// Wrap every selection in `marker`; an empty selection just gets one marker typed.
///
/// The first selection ends up covering its wrapped text, or after the marker when empty.
pub fn surround(selections: &[Span], marker: &str) -> EditPlan {
    let width = char_len(marker);
    let mut edits = Vec::with_capacity(selections.len() * 2);
    for selection in selections {
        if selection.is_empty() {
            edits.push(Edit::insert(selection.start, marker));
        } else {
            edits.push(Edit::insert(selection.end, marker));
            edits.push(Edit::insert(selection.start, marker));
        }
    }
    let selection = selections.first().map(|first| {
        if first.is_empty() {
            Span::caret(first.start + width)
        } else {
            Span::new(first.start + width, first.end + width)
        }
    });
    EditPlan { edits, selection }
}

#[must_use]
/// Reference label for a title: punctuation dropped, lowercased, words joined by `_`.
pub fn label_for(title: &str) -> String {
    let bare: String = title.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let bare = bare.trim().to_lowercase();
    format!(".. _{}:\n\n", WHITESPACE_RE.replace_all(&bare, "_"))
}

#[must_use]
/// Replace each selection with a reference label made from its text.
///
/// An empty selection stands for its whole line, newline included.
pub fn ref_label(text: &str, selections: &[Span]) -> EditPlan {
    let all = lines(text);
    let len = char_len(text);
    let mut spans: Vec<Span> = selections
        .iter()
        .map(|selection| {
            if selection.is_empty() {
                let line = &all[row_of(text, selection.start).min(all.len() - 1)];
                Span::new(line.start, (line.end() + 1).min(len))
            } else {
                *selection
            }
        })
        .collect();
    spans.dedup();

    let edits: Vec<Edit> = spans
        .iter()
        .map(|span| Edit::replace(*span, label_for(substr(text, *span))))
        .collect();
    let selection = edits
        .first()
        .map(|edit| Span::caret(edit.span.start + char_len(&edit.replacement)));
    EditPlan { edits, selection }
}

#[cfg(test)]
#[path = "tests/inline.rs"]
mod tests;
