//! The edit plan is the only way a command changes a document.
//!
//! Commands never mutate text themselves: they describe the change as a set of span
//! replacements and leave applying them to the host. Plans serialise to JSON so the CLI can
//! print them for an editor to consume, or save them and apply them to a file later.

use crate::buffer::{byte_offset, Span};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Replacement of one span of the original snapshot.
pub struct Edit {
    /// Characters to replace, in offsets of the snapshot the plan was computed from.
    pub span: Span,
    /// Text inserted in place of the span.
    pub replacement: String,
}

impl Edit {
    #[must_use]
    /// Replace `span` with `replacement`.
    pub fn replace(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }

    #[must_use]
    /// Insert `text` at character `pos`.
    pub fn insert(pos: usize, text: impl Into<String>) -> Self {
        Self::replace(Span::caret(pos), text)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Serialisable collection of non-overlapping edits for atomic application.
pub struct EditPlan {
    /// Individual replacements, in the order the command produced them.
    pub edits: Vec<Edit>,
    /// Where the selection should end up after the edits, in offsets of the edited text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Span>,
}

impl EditPlan {
    #[must_use]
    /// Plan made of a single edit.
    pub fn single(edit: Edit) -> Self {
        Self {
            edits: vec![edit],
            selection: None,
        }
    }

    #[must_use]
    /// Plan that only moves the cursor.
    pub fn jump(pos: usize) -> Self {
        Self {
            edits: Vec::new(),
            selection: Some(Span::caret(pos)),
        }
    }

    #[must_use]
    /// Set the post-edit selection.
    pub fn with_selection(mut self, selection: Span) -> Self {
        self.selection = Some(selection);
        self
    }

    #[must_use]
    /// Whether applying the plan would leave the text unchanged.
    pub fn is_noop(&self) -> bool {
        self.edits
            .iter()
            .all(|edit| edit.span.is_empty() && edit.replacement.is_empty())
    }

    #[must_use]
    /// Apply all edits to `text` and return the result.
    ///
    /// Edits are applied from the highest offset down so earlier spans stay valid. When two
    /// edits start at the same offset, the one listed first ends up first in the output.
    pub fn apply_to(&self, text: &str) -> String {
        let mut order: Vec<&Edit> = self.edits.iter().collect();
        order.sort_by_key(|edit| edit.span.start);

        let mut out = text.to_string();
        for edit in order.into_iter().rev() {
            let start = byte_offset(&out, edit.span.start);
            let end = byte_offset(&out, edit.span.end);
            out.replace_range(start..end, &edit.replacement);
        }
        out
    }

    /// Apply the plan to a file on disk in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub fn apply_to_file(&self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        fs::write(path, self.apply_to(&content))?;
        Ok(())
    }

    /// Read a plan previously printed as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid plan.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
