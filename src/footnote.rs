//! Numbered footnotes: insertion and navigation between `[n]_` references and their
//! `.. [n]` definitions.
//!
//! A command that cannot act reports a [`Void`] reason instead of editing anything.

use crate::buffer::{char_len, lines, row_of, substr, Buffer, Span};
use crate::edit_plan::{Edit, EditPlan};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info};

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]_").expect("valid footnote reference regex"));

static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\.\.\s\[(\d+)\]").expect("valid footnote definition regex")
});

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digits regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Why a footnote command did nothing.
pub enum Void {
    /// The command needs exactly one cursor.
    #[error("Command is Void (needs exactly one cursor)")]
    NotSingleCursor,
    /// The cursor line does not start a footnote definition.
    #[error("Command is Void (cursor must be on the first line of a footnote definition)")]
    NotOnDefinition,
    /// The document has no footnote references at all.
    #[error("Command is Void (document contains no footnote references)")]
    NoReferences,
    /// The definition under the cursor is never referenced.
    #[error("Command is Void (no reference to footnote #{0})")]
    MissingReference(String),
    /// The document lacks either references or definitions.
    #[error("Command is Void (no footnote pairings in document)")]
    NoPairings,
    /// The cursor is not on a footnote reference.
    #[error("Command is Void (cursor not in footnote reference)")]
    NotOnReference,
    /// The reference under the cursor has no definition.
    #[error("Cannot navigate to footnote definition #{0}: it does not exist")]
    MissingDefinition(String),
}

fn footnote_id(matched: &str) -> String {
    DIGITS_RE
        .find(matched)
        .map_or_else(String::new, |m| m.as_str().to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Every footnote reference and definition marker of one snapshot.
pub struct Footnotes {
    /// Reference spans by footnote id, each list in document order. References sitting on a
    /// definition line are not counted.
    pub references: BTreeMap<String, Vec<Span>>,
    /// Definition marker span by footnote id; a repeated id keeps its last definition.
    pub definitions: BTreeMap<String, Span>,
}

impl Footnotes {
    #[must_use]
    /// Collect the footnotes of `buffer`.
    pub fn scan<B: Buffer + ?Sized>(buffer: &B) -> Self {
        let text = buffer.text();
        let all = lines(text);
        let mut references: BTreeMap<String, Vec<Span>> = BTreeMap::new();
        for span in buffer.find_all(&REFERENCE_RE) {
            let line = all[row_of(text, span.start).min(all.len() - 1)].text;
            if DEFINITION_RE.is_match(line) {
                continue;
            }
            references
                .entry(footnote_id(substr(text, span)))
                .or_default()
                .push(span);
        }
        let definitions = buffer
            .find_all(&DEFINITION_RE)
            .into_iter()
            .map(|span| (footnote_id(substr(text, span)), span))
            .collect();
        Self {
            references,
            definitions,
        }
    }

    #[must_use]
    /// One more than the highest referenced footnote number, or 1 when there are none.
    pub fn next_marker(&self) -> u64 {
        self.references
            .keys()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .map_or(1, |last| last + 1)
    }

    /// Id of the first reference `selection` touches, either end of the reference included.
    fn reference_at(&self, selection: Span) -> Option<&str> {
        self.references.iter().find_map(|(id, spans)| {
            spans
                .iter()
                .any(|span| selection.start <= span.end && span.start <= selection.end)
                .then_some(id.as_str())
        })
    }
}

fn single_cursor<B: Buffer + ?Sized>(buffer: &B) -> Result<Span, Void> {
    match buffer.selections() {
        [selection] => Ok(*selection),
        _ => Err(Void::NotSingleCursor),
    }
}

fn definition_on_line(text: &str, pos: usize) -> Option<String> {
    let all = lines(text);
    let line = all[row_of(text, pos).min(all.len() - 1)].text;
    DEFINITION_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

/// Insert the next numbered reference after the word at the cursor and start its definition
/// at the end of the document. The caret moves to the new definition.
///
/// # Errors
///
/// [`Void::NotSingleCursor`] unless there is exactly one selection.
pub fn insert<B: Buffer + ?Sized>(buffer: &B) -> Result<EditPlan, Void> {
    let selection = single_cursor(buffer)?;
    let text = buffer.text();
    let len = char_len(text);
    let marker = Footnotes::scan(buffer).next_marker();
    let target = text
        .chars()
        .enumerate()
        .skip(selection.end)
        .find_map(|(i, c)| c.is_whitespace().then_some(i))
        .unwrap_or(len);

    let reference = format!("[{marker}]_");
    let definition = format!("\n.. [{marker}] ");
    let end = len + char_len(&reference) + char_len(&definition);
    debug!(marker, target, "inserting footnote");
    Ok(EditPlan {
        edits: vec![Edit::insert(target, reference), Edit::insert(len, definition)],
        selection: Some(Span::caret(end)),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of jumping from a definition to its reference.
pub struct ReferenceJump {
    /// Caret position just after the first reference.
    pub position: usize,
    /// How many references share the footnote id.
    pub references: usize,
}

/// Jump from the definition on the cursor line to the first reference of the same footnote.
///
/// # Errors
///
/// A [`Void`] reason when there is no single cursor, the cursor line is not a definition, or
/// the footnote is never referenced.
pub fn go_to_reference<B: Buffer + ?Sized>(buffer: &B) -> Result<ReferenceJump, Void> {
    let selection = single_cursor(buffer)?;
    let id = definition_on_line(buffer.text(), selection.end).ok_or(Void::NotOnDefinition)?;
    let footnotes = Footnotes::scan(buffer);
    if footnotes.references.is_empty() {
        return Err(Void::NoReferences);
    }
    let spans = footnotes
        .references
        .get(&id)
        .ok_or_else(|| Void::MissingReference(id.clone()))?;
    let first = spans.first().ok_or_else(|| Void::MissingReference(id.clone()))?;
    if spans.len() > 1 {
        info!("document contains {} references to footnote #{id}", spans.len());
    }
    Ok(ReferenceJump {
        position: first.end,
        references: spans.len(),
    })
}

/// Jump from the reference at the cursor to just after its definition marker.
///
/// # Errors
///
/// A [`Void`] reason when there is no single cursor, the document has no reference and
/// definition pair, the cursor is not on a reference, or the reference has no definition.
pub fn go_to_definition<B: Buffer + ?Sized>(buffer: &B) -> Result<usize, Void> {
    let selection = single_cursor(buffer)?;
    let footnotes = Footnotes::scan(buffer);
    if footnotes.definitions.is_empty() || footnotes.references.is_empty() {
        return Err(Void::NoPairings);
    }
    let id = footnotes
        .reference_at(selection)
        .ok_or(Void::NotOnReference)?;
    footnotes
        .definitions
        .get(id)
        .map(|definition| definition.end + 1)
        .ok_or_else(|| Void::MissingDefinition(id.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
/// What the footnote key did.
pub enum Magic {
    /// Jumped from a definition to its reference.
    ToReference(ReferenceJump),
    /// Jumped from a reference to its definition.
    ToDefinition {
        /// Caret position after the jump.
        position: usize,
    },
    /// Inserted a new footnote.
    Inserted(EditPlan),
}

impl Magic {
    #[must_use]
    /// The edit plan carrying out the action.
    pub fn into_plan(self) -> EditPlan {
        match self {
            Self::ToReference(jump) => EditPlan::jump(jump.position),
            Self::ToDefinition { position } => EditPlan::jump(position),
            Self::Inserted(plan) => plan,
        }
    }
}

/// Do the obvious footnote thing at the cursor: from a definition go to its reference, from a
/// reference go to its definition, anywhere else insert a new footnote.
///
/// # Errors
///
/// The [`Void`] reason of whichever command was chosen.
pub fn magic<B: Buffer + ?Sized>(buffer: &B) -> Result<Magic, Void> {
    let selection = single_cursor(buffer)?;
    let text = buffer.text();
    if definition_on_line(text, selection.end).is_some() {
        return go_to_reference(buffer).map(Magic::ToReference);
    }
    let on_reference = Footnotes::scan(buffer)
        .references
        .values()
        .flatten()
        .any(|span| span.touches(selection.start) && span.touches(selection.end));
    if on_reference {
        return go_to_definition(buffer).map(|position| Magic::ToDefinition { position });
    }
    insert(buffer).map(Magic::Inserted)
}

#[cfg(test)]
#[path = "tests/footnote.rs"]
mod tests;
