//! restassured: run reStructuredText editing commands against a file.
//!
//! Each subcommand prints its outcome as JSON. With `--write` an edit plan is also applied to
//! the file in place; otherwise the plan can be saved and applied later with `apply`.
#![allow(clippy::multiple_crate_versions)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use restassured::buffer::{offset_of, Document, Span};
use restassured::command::{Command, FootnoteAction, Outcome};
use restassured::config::Config;
use restassured::edit_plan::EditPlan;
use restassured::header_tree::{LevelCache, LevelChange};
use restassured::indent_list::Shift;
use restassured::inline::Markup;
use restassured::table::Merge;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "restassured")]
#[command(about = "reStructuredText-aware editing commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Args)]
struct Target {
    /// File to operate on
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Cursor as a character offset
    #[arg(long, conflicts_with = "line")]
    offset: Option<usize>,

    /// Cursor line, 1-based
    #[arg(long)]
    line: Option<usize>,

    /// Cursor column on --line, 1-based
    #[arg(long, requires = "line", default_value_t = 1)]
    column: usize,

    /// Apply the resulting edit plan to the file
    #[arg(long, short = 'w')]
    write: bool,

    /// Override the configured list indent width
    #[arg(long)]
    tab_width: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, ValueEnum)]
enum Note {
    Insert,
    Reference,
    Definition,
    Magic,
}

#[derive(Subcommand)]
enum Action {
    /// List section headers
    Headers(Target),
    /// Promote the header under the cursor
    Promote(Target),
    /// Demote the header under the cursor
    Demote(Target),
    /// Jump to the next or previous header
    Jump {
        #[command(flatten)]
        target: Target,
        /// Jump backwards
        #[arg(long)]
        back: bool,
        /// Skip headers nested deeper than the current one
        #[arg(long)]
        same_level: bool,
    },
    /// Report the foldable body of the section under the cursor
    Fold(Target),
    /// Redraw the adornment of the header under the cursor
    Fill(Target),
    /// Continue the list or block at the cursor onto a new line
    Enter(Target),
    /// Indent the list item under the cursor
    Indent(Target),
    /// Outdent the list item under the cursor
    Outdent(Target),
    /// Draw the block at the cursor as a grid table
    Table(Target),
    /// Rewrap a grid table within its existing column widths
    Reflow(Target),
    /// Draw the block at the cursor as a simple table
    SimpleTable(Target),
    /// Merge the table cell under the cursor with a neighbour
    Merge {
        #[command(flatten)]
        target: Target,
        /// Neighbour to merge with
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Insert or navigate footnotes
    Footnote {
        #[command(flatten)]
        target: Target,
        /// What to do
        #[arg(value_enum, default_value = "magic")]
        action: Note,
    },
    /// Wrap a range in inline markup
    Surround {
        #[command(flatten)]
        target: Target,
        /// Markup to apply
        #[arg(value_enum)]
        markup: Markup,
        /// Characters to wrap, starting at the cursor
        #[arg(long, default_value_t = 0)]
        length: usize,
    },
    /// Turn the line at the cursor into a reference label
    Label(Target),
    /// Apply a saved edit plan to a file
    Apply {
        /// JSON plan printed by an earlier command
        #[arg(value_name = "PLAN")]
        plan: PathBuf,
        /// File to edit
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Action {
    fn split(self) -> Option<(Command, Target, usize)> {
        let (command, target, length) = match self {
            Self::Headers(t) => (Command::ListHeaders, t, 0),
            Self::Promote(t) => (Command::ChangeLevel(LevelChange::Up), t, 0),
            Self::Demote(t) => (Command::ChangeLevel(LevelChange::Down), t, 0),
            Self::Jump {
                target,
                back,
                same_level,
            } => (
                Command::JumpHeader {
                    forward: !back,
                    same_or_higher: same_level,
                },
                target,
                0,
            ),
            Self::Fold(t) => (Command::FoldRegion, t, 0),
            Self::Fill(t) => (Command::FillHeader, t, 0),
            Self::Enter(t) => (Command::SmartEnter, t, 0),
            Self::Indent(t) => (Command::IndentItem(Shift::Indent), t, 0),
            Self::Outdent(t) => (Command::IndentItem(Shift::Outdent), t, 0),
            Self::Table(t) => (Command::FormatTable, t, 0),
            Self::Reflow(t) => (Command::ReflowTable, t, 0),
            Self::SimpleTable(t) => (Command::SimpleTable, t, 0),
            Self::Merge { target, direction } => {
                let merge = match direction {
                    Direction::Up => Merge::Up,
                    Direction::Down => Merge::Down,
                    Direction::Left => Merge::Left,
                    Direction::Right => Merge::Right,
                };
                (Command::MergeCells(merge), target, 0)
            }
            Self::Footnote { target, action } => {
                let action = match action {
                    Note::Insert => FootnoteAction::Insert,
                    Note::Reference => FootnoteAction::ToReference,
                    Note::Definition => FootnoteAction::ToDefinition,
                    Note::Magic => FootnoteAction::Magic,
                };
                (Command::Footnote(action), target, 0)
            }
            Self::Surround {
                target,
                markup,
                length,
            } => (Command::Surround(markup), target, length),
            Self::Label(t) => (Command::RefLabel, t, 0),
            Self::Apply { .. } => return None,
        };
        Some((command, target, length))
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse().action) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(action: Action) -> restassured::Result<()> {
    if let Action::Apply { plan, file } = &action {
        EditPlan::load(plan)?.apply_to_file(file)?;
        info!(file = %file.display(), "applied edit plan");
        return Ok(());
    }
    let Some((command, target, length)) = action.split() else {
        return Ok(());
    };

    let mut config = Config::load();
    if let Some(tab_width) = target.tab_width {
        config.tab_width = tab_width;
    }

    let text = fs::read_to_string(&target.file)?;
    let cursor = match (target.offset, target.line) {
        (Some(offset), _) => offset,
        (None, Some(line)) => {
            offset_of(&text, line.saturating_sub(1), target.column.saturating_sub(1))
        }
        (None, None) => 0,
    };
    debug!(file = %target.file.display(), cursor, "loaded document");

    let mut document = Document::new(text, cursor);
    if length > 0 {
        document.selections = vec![Span::new(cursor, cursor + length)];
    }

    let outcome = command.run(&document, &config, &mut LevelCache::new())?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if target.write {
        if let Some(plan) = outcome.plan().filter(|plan| !plan.is_noop()) {
            plan.apply_to_file(&target.file)?;
            info!(file = %target.file.display(), "wrote changes");
        }
    }
    if let Outcome::Miss { reason } = &outcome {
        info!("{reason}");
    }
    Ok(())
}
