//! ASCII tables: parse loosely typed rows into a grid and draw it as a reST table.
//!
//! Rows can be typed with two or more spaces between fields, or with `|` between cells.
//! Redrawing an already drawn grid table gives the same table back, so the format command
//! doubles as a repair tool after editing cell contents by hand.
//!
//! Reference: <https://docutils.sourceforge.io/docs/ref/rst/restructuredtext.html#tables>

use crate::buffer::{row_col, Block};
use crate::config::Config;
use crate::edit_plan::{Edit, EditPlan};
use crate::error::{Error, Result};
use crate::width::{measure, pad_to, wrap};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\t +=-]+$").expect("valid separator regex"));

static SIMPLE_RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\t =]+$").expect("valid simple rule regex"));

static OUTER_PIPES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\||\|\s*$").expect("valid outer pipes regex"));

static PIPE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\|\s*").expect("valid pipe split regex"));

static GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("valid field gap regex"));

// `+` junctions left next to a blanked segment become `|`.
static GHOST_JUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^\+ )|( \+ )|( \+$)").expect("valid junction regex"));

const SIMPLE_GAP: &str = "  ";

/// Rows of cell strings; a cell spanning several physical lines holds them joined by `\n`.
pub type Table = Vec<Vec<String>>;

#[must_use]
/// Whether `line` is a grid border or row separator.
pub fn is_separator(line: &str) -> bool {
    SEPARATOR_RE.is_match(line)
}

#[must_use]
/// Split one physical line into its fields.
pub fn split_row(line: &str) -> Vec<String> {
    if line.contains('|') {
        let inner = OUTER_PIPES_RE.replace_all(line, "");
        PIPE_SPLIT_RE
            .split(inner.trim())
            .map(ToString::to_string)
            .collect()
    } else {
        GAP_RE
            .split(line.trim_end())
            .map(ToString::to_string)
            .collect()
    }
}

#[must_use]
/// Zip the physical lines of one row column-wise, keeping only non-empty fields.
pub fn join_rows(rows: &[Vec<String>]) -> Vec<String> {
    let mut columns: Vec<Vec<&str>> = Vec::new();
    for row in rows {
        if columns.len() < row.len() {
            columns.resize_with(row.len(), Vec::new);
        }
        for (column, field) in columns.iter_mut().zip(row) {
            let field = field.trim();
            if !field.is_empty() {
                column.push(field);
            }
        }
    }
    columns.into_iter().map(|column| column.join("\n")).collect()
}

fn partition<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    if !lines.iter().any(|line| is_separator(line)) {
        return lines.iter().map(|line| vec![*line]).collect();
    }
    let mut parts: Vec<Vec<&str>> = vec![Vec::new()];
    for line in lines {
        if is_separator(line) {
            parts.push(Vec::new());
        } else if let Some(part) = parts.last_mut() {
            part.push(line);
        }
    }
    parts.retain(|part| !part.is_empty());
    parts
}

#[must_use]
/// Pad every row to the same width and drop columns that are empty in every row.
pub fn unify(mut table: Table) -> Table {
    let columns = table.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut table {
        row.resize(columns, String::new());
    }
    let keep: Vec<bool> = (0..columns)
        .map(|i| table.iter().any(|row| !row[i].trim().is_empty()))
        .collect();
    table
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&keep)
                .filter_map(|(cell, keep)| keep.then_some(cell))
                .collect()
        })
        .collect()
}

fn strip_indent<'a, S: AsRef<str>>(lines: &'a [S]) -> Vec<&'a str> {
    let first = lines.first().map_or("", AsRef::as_ref);
    let indent = &first[..first.len() - first.trim_start().len()];
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            line.strip_prefix(indent).unwrap_or(line)
        })
        .collect()
}

#[must_use]
/// Parse raw lines, grid drawing or not, into a normalised [`Table`].
///
/// Without separator lines every line is a row. With them, the lines between two separators
/// form one row whose cells may span several lines.
pub fn parse_table<S: AsRef<str>>(lines: &[S]) -> Table {
    let lines = strip_indent(lines);
    let table = partition(&lines)
        .into_iter()
        .map(|group| {
            let split: Vec<Vec<String>> = group.into_iter().map(split_row).collect();
            join_rows(&split)
        })
        .collect();
    unify(table)
}

#[must_use]
/// Widest display line of each column.
pub fn column_widths(table: &Table, wide_chars: bool) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in table {
        if widths.len() < row.len() {
            widths.resize(row.len(), 0);
        }
        for (width, cell) in widths.iter_mut().zip(row) {
            let cell_width = cell
                .split('\n')
                .map(|line| measure(line, wide_chars))
                .max()
                .unwrap_or(0);
            *width = (*width).max(cell_width);
        }
    }
    widths
}

fn table_line(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line
}

#[must_use]
/// Draw `table` as a grid table, each line prefixed with `indent`.
///
/// Column widths are measured from the content, or taken from `manual_widths` with every
/// cell re-wrapped to fit. A `=` separator follows the first row and `-` every other.
pub fn draw_table(
    indent: &str,
    table: &Table,
    manual_widths: Option<&[usize]>,
    wide_chars: bool,
) -> Vec<String> {
    if table.is_empty() {
        return Vec::new();
    }
    let measured = column_widths(table, wide_chars);
    let widths: Vec<usize> = match manual_widths {
        Some(manual) => measured
            .iter()
            .enumerate()
            .map(|(i, width)| manual.get(i).copied().unwrap_or(*width))
            .collect(),
        None => measured,
    };
    let header_line = table_line(&widths, '=');
    let normal_line = table_line(&widths, '-');

    let mut output = vec![format!("{indent}{normal_line}")];
    for (index, row) in table.iter().enumerate() {
        let cells: Vec<Vec<String>> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| match manual_widths {
                Some(_) => wrap(cell, *width, wide_chars),
                None => cell.split('\n').map(ToString::to_string).collect(),
            })
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for line in 0..height {
            let mut drawn = format!("{indent}|");
            for (cell, width) in cells.iter().zip(&widths) {
                let text = cell.get(line).map_or("", |text| text.trim());
                drawn.push(' ');
                drawn.push_str(&pad_to(text, *width, wide_chars));
                drawn.push_str(" |");
            }
            output.push(drawn);
        }
        let separator = if index == 0 {
            &header_line
        } else {
            &normal_line
        };
        output.push(format!("{indent}{separator}"));
    }
    output
}

/// Column widths encoded in the first border line of a drawn table.
///
/// # Errors
///
/// Returns [`Error::Reflow`] when no line of the block is a border.
pub fn border_widths<S: AsRef<str>>(lines: &[S]) -> Result<Vec<usize>> {
    let border = lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| is_separator(line))
        .ok_or_else(|| Error::Reflow("no border found".to_string()))?
        .trim();
    let border = border.strip_prefix('+').unwrap_or(border);
    let border = border.strip_suffix('+').unwrap_or(border);
    Ok(border
        .split('+')
        .map(|segment| segment.chars().count().saturating_sub(2))
        .collect())
}

#[must_use]
/// Parse the lines of a simple table, skipping its `=` rules.
pub fn parse_simple_table<S: AsRef<str>>(lines: &[S]) -> Table {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !SIMPLE_RULE_RE.is_match(line))
        .map(|line| {
            GAP_RE
                .split(line.trim())
                .map(ToString::to_string)
                .collect()
        })
        .collect()
}

#[must_use]
/// Draw `table` as a simple table: `=` rules above, below the first row and at the end.
pub fn draw_simple_table(indent: &str, table: &Table, wide_chars: bool) -> Vec<String> {
    if table.is_empty() {
        return Vec::new();
    }
    let widths = column_widths(table, wide_chars);
    let rule = widths
        .iter()
        .map(|width| "=".repeat(width + SIMPLE_GAP.len()))
        .collect::<Vec<_>>()
        .join(SIMPLE_GAP);
    let rule = format!("{indent}{rule}");

    let mut output = vec![rule.clone()];
    for (index, row) in table.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad_to(cell, width + SIMPLE_GAP.len(), wide_chars))
            .collect();
        output.push(format!("{indent}{}", cells.join(SIMPLE_GAP)).trim_end().to_string());
        if index == 0 {
            output.push(rule.clone());
        }
    }
    if table.len() > 1 {
        output.push(rule);
    }
    output
}

fn redraw<F>(text: &str, cursor: usize, draw: F) -> Result<Option<EditPlan>>
where
    F: FnOnce(&Block) -> Result<Vec<String>>,
{
    let Some(block) = Block::around(text, cursor) else {
        return Ok(None);
    };
    let drawn = draw(&block)?;
    if drawn.is_empty() {
        return Ok(None);
    }
    debug!(rows = drawn.len(), first_row = block.first_row, "redrawing table block");
    Ok(Some(EditPlan::single(Edit::replace(
        block.span,
        block.render(&drawn),
    ))))
}

#[must_use]
/// Turn the block around the cursor into a grid table.
pub fn format_table(text: &str, cursor: usize, config: &Config) -> Option<EditPlan> {
    redraw(text, cursor, |block| {
        let table = parse_table(&block.lines);
        Ok(draw_table(&block.indent, &table, None, config.wide_chars))
    })
    .ok()
    .flatten()
}

/// Redraw the grid table around the cursor keeping the column widths of its top border.
///
/// # Errors
///
/// Returns [`Error::Reflow`] when the block has no border line.
pub fn reflow_table(text: &str, cursor: usize, config: &Config) -> Result<Option<EditPlan>> {
    redraw(text, cursor, |block| {
        let widths = border_widths(&block.lines)?;
        let table = parse_table(&block.lines);
        Ok(draw_table(
            &block.indent,
            &table,
            Some(&widths),
            config.wide_chars,
        ))
    })
}

#[must_use]
/// Turn the block around the cursor into a simple table.
pub fn format_simple_table(text: &str, cursor: usize, config: &Config) -> Option<EditPlan> {
    redraw(text, cursor, |block| {
        let table = parse_simple_table(&block.lines);
        Ok(draw_simple_table(&block.indent, &table, config.wide_chars))
    })
    .ok()
    .flatten()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which neighbour a cell is merged with.
pub enum Merge {
    /// The cell below, by blanking the separator under the cursor's row.
    Down,
    /// The cell above, by blanking the separator over the cursor's row.
    Up,
    /// The cell to the right, by blanking the `|` after the cursor.
    Right,
    /// The cell to the left, by blanking the `|` before the cursor.
    Left,
}

fn blank_segment(separator: &str, column: usize) -> Option<String> {
    let mut segments: Vec<String> = separator
        .trim()
        .split('+')
        .map(ToString::to_string)
        .collect();
    let segment = segments.get_mut(column)?;
    *segment = " ".repeat(segment.chars().count());
    let joined = segments.join("+");
    Some(
        GHOST_JUNCTION_RE
            .replace_all(&joined, |caps: &regex::Captures<'_>| caps[0].replace('+', "|"))
            .into_owned(),
    )
}

fn blank_pipe(line: &str, index: usize) -> Option<String> {
    let pipes: Vec<usize> = line
        .chars()
        .enumerate()
        .filter_map(|(i, c)| (c == '|').then_some(i))
        .collect();
    // The outer borders are never removed.
    if index == 0 || index + 1 >= pipes.len() {
        return None;
    }
    let target = pipes[index];
    Some(
        line.chars()
            .enumerate()
            .map(|(i, c)| if i == target { ' ' } else { c })
            .collect(),
    )
}

#[must_use]
/// Merge the cell under the cursor with a neighbour in an already drawn grid table.
///
/// `None` when the cursor is not inside a cell or the neighbour is outside the grid.
pub fn merge_cells(text: &str, cursor: usize, merge: Merge) -> Option<EditPlan> {
    let block = Block::around(text, cursor)?;
    let (row, column) = row_col(text, cursor);
    let line_index = row - block.first_row;
    let line = &block.lines[line_index];
    let cell = line.chars().take(column).filter(|&c| c == '|').count();
    if cell == 0 {
        return None;
    }

    let mut lines = block.lines.clone();
    match merge {
        Merge::Down | Merge::Up => {
            let target = if merge == Merge::Down {
                line_index + 1
            } else {
                line_index.checked_sub(1)?
            };
            // The top and bottom borders close the grid.
            if target == 0 || target + 1 >= lines.len() {
                return None;
            }
            let separator = lines.get(target).filter(|line| is_separator(line))?;
            lines[target] = format!("{}{}", block.indent, blank_segment(separator, cell)?);
        }
        Merge::Right => lines[line_index] = blank_pipe(line, cell)?,
        Merge::Left => lines[line_index] = blank_pipe(line, cell - 1)?,
    }
    debug!(?merge, row, cell, "merging table cells");
    Some(EditPlan::single(Edit::replace(
        block.span,
        block.render(&lines),
    )))
}

#[cfg(test)]
#[path = "tests/table.rs"]
mod tests;
