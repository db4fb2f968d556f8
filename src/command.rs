//! Every editing command behind one dispatcher.
//!
//! Hosts map their key bindings to a [`Command`] and call [`Command::run`] with the buffer;
//! the [`Outcome`] says what to do next. The level cache is reset here whenever a command
//! other than a level change edits the document.

use crate::buffer::{Buffer, Span};
use crate::config::Config;
use crate::edit_plan::EditPlan;
use crate::error::Result;
use crate::footnote::{self, Magic};
use crate::header::Header;
use crate::header_tree::{self, HeaderTree, LevelCache, LevelChange};
use crate::indent_list::{indent_list_item, Shift};
use crate::inline::{self, Markup};
use crate::smart_list::continue_list;
use crate::table::{self, Merge};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which footnote command to run.
pub enum FootnoteAction {
    /// Insert a new numbered footnote.
    Insert,
    /// Jump from a definition to its first reference.
    ToReference,
    /// Jump from a reference to its definition.
    ToDefinition,
    /// Pick whichever of the above fits the cursor.
    Magic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A command a host can bind.
pub enum Command {
    /// List every section header.
    ListHeaders,
    /// Promote or demote the header under the cursor.
    ChangeLevel(LevelChange),
    /// Move to the next or previous header.
    JumpHeader {
        /// Direction of the jump.
        forward: bool,
        /// Skip headers nested deeper than the current one.
        same_or_higher: bool,
    },
    /// Report the body of the section under the cursor for folding.
    FoldRegion,
    /// Redraw a hand-typed header's adornment.
    FillHeader,
    /// Start the next line of a list or block.
    SmartEnter,
    /// Move a list item one level in or out.
    IndentItem(Shift),
    /// Draw the block around the cursor as a grid table.
    FormatTable,
    /// Redraw a grid table within its current column widths.
    ReflowTable,
    /// Draw the block around the cursor as a simple table.
    SimpleTable,
    /// Merge table cells.
    MergeCells(Merge),
    /// Footnote insertion and navigation.
    Footnote(FootnoteAction),
    /// Wrap the selections in inline markup.
    Surround(Markup),
    /// Turn the selections into reference labels.
    RefLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// What a command produced.
pub enum Outcome {
    /// Edits and cursor movement for the host to apply.
    Plan {
        /// The plan to apply.
        plan: EditPlan,
    },
    /// The document's headers, in order.
    Headers {
        /// Every header found.
        headers: Vec<Header>,
    },
    /// A region the host may fold.
    Fold {
        /// Characters to fold.
        span: Span,
    },
    /// A footnote command that acted.
    Footnote {
        /// What it did.
        footnote: Magic,
    },
    /// The command did not apply at the cursor.
    Miss {
        /// Why nothing happened.
        reason: String,
    },
}

impl Outcome {
    #[must_use]
    /// The edit plan to apply, if the outcome carries one.
    pub fn plan(&self) -> Option<EditPlan> {
        match self {
            Self::Plan { plan } => Some(plan.clone()),
            Self::Footnote { footnote } => Some(footnote.clone().into_plan()),
            Self::Headers { .. } | Self::Fold { .. } | Self::Miss { .. } => None,
        }
    }

    fn from_plan(plan: Option<EditPlan>, miss: &str) -> Self {
        plan.map_or_else(
            || Self::Miss {
                reason: miss.to_string(),
            },
            |plan| Self::Plan { plan },
        )
    }
}

impl Command {
    /// Run the command against `buffer` at its primary cursor.
    ///
    /// # Errors
    ///
    /// Returns an error only for structurally invalid requests: reflowing a table with no
    /// border, or a roman list running past 4999. Commands that merely do not apply at the
    /// cursor give [`Outcome::Miss`].
    pub fn run<B: Buffer + ?Sized>(
        &self,
        buffer: &B,
        config: &Config,
        cache: &mut LevelCache,
    ) -> Result<Outcome> {
        let text = buffer.text();
        let cursor = buffer.cursor();
        debug!(command = ?self, cursor, "running command");

        let outcome = match *self {
            Self::ListHeaders => Outcome::Headers {
                headers: HeaderTree::parse(text).headers().to_vec(),
            },
            Self::ChangeLevel(change) => Outcome::from_plan(
                header_tree::change_level(text, cursor, cache, change),
                "no header level to move to",
            ),
            Self::JumpHeader {
                forward,
                same_or_higher,
            } => Outcome::from_plan(
                header_tree::jump(text, cursor, forward, same_or_higher).map(EditPlan::jump),
                "no header to jump to",
            ),
            Self::FoldRegion => header_tree::fold_region(text, cursor).map_or_else(
                || Outcome::Miss {
                    reason: "cursor is not on a header".to_string(),
                },
                |span| Outcome::Fold { span },
            ),
            Self::FillHeader => Outcome::from_plan(
                header_tree::fill_header_markings(text, cursor),
                "block is not a header",
            ),
            Self::SmartEnter => Outcome::Plan {
                plan: continue_list(text, cursor)?,
            },
            Self::IndentItem(shift) => Outcome::from_plan(
                indent_list_item(text, cursor, config, shift),
                "line is not a list item that can move",
            ),
            Self::FormatTable => Outcome::from_plan(
                table::format_table(text, cursor, config),
                "no table around the cursor",
            ),
            Self::ReflowTable => Outcome::from_plan(
                table::reflow_table(text, cursor, config)?,
                "no table around the cursor",
            ),
            Self::SimpleTable => Outcome::from_plan(
                table::format_simple_table(text, cursor, config),
                "no table around the cursor",
            ),
            Self::MergeCells(merge) => Outcome::from_plan(
                table::merge_cells(text, cursor, merge),
                "no neighbouring cell to merge with",
            ),
            Self::Footnote(action) => {
                let result = match action {
                    FootnoteAction::Insert => footnote::insert(buffer).map(Magic::Inserted),
                    FootnoteAction::ToReference => {
                        footnote::go_to_reference(buffer).map(Magic::ToReference)
                    }
                    FootnoteAction::ToDefinition => footnote::go_to_definition(buffer)
                        .map(|position| Magic::ToDefinition { position }),
                    FootnoteAction::Magic => footnote::magic(buffer),
                };
                match result {
                    Ok(footnote) => Outcome::Footnote { footnote },
                    Err(void) => Outcome::Miss {
                        reason: void.to_string(),
                    },
                }
            }
            Self::Surround(markup) => Outcome::Plan {
                plan: inline::surround(buffer.selections(), markup.marker()),
            },
            Self::RefLabel => Outcome::Plan {
                plan: inline::ref_label(text, buffer.selections()),
            },
        };

        let edits_text = outcome.plan().is_some_and(|plan| !plan.is_noop());
        if edits_text && !matches!(self, Self::ChangeLevel(_)) {
            cache.invalidate();
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "tests/command.rs"]
mod tests;
