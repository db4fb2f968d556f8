use super::{
    border_widths, draw_simple_table, draw_table, format_simple_table, format_table, merge_cells,
    parse_simple_table, parse_table, reflow_table, split_row, unify, Merge,
};
use crate::config::Config;
use crate::error::Error;

const GRID: &str = "\
+----------+----------+
| Column 1 | Column 2 |
+==========+==========+
| Foo      | Bar baz  |
+----------+----------+";

fn grid_lines() -> Vec<&'static str> {
    GRID.lines().collect()
}

#[test]
fn test_two_space_rows_parse_and_draw() {
    let table = parse_table(&["Column 1  Column 2", "Foo  Bar baz"]);
    assert_eq!(
        table,
        vec![vec!["Column 1", "Column 2"], vec!["Foo", "Bar baz"]]
    );
    assert_eq!(draw_table("", &table, None, true), grid_lines());
}

#[test]
fn test_redraw_is_idempotent() {
    let raw = [
        "Name  Notes",
        "| Alice | likes | tea |",
        "Bob  中文 text",
    ];
    let once = draw_table("", &parse_table(&raw), None, true);
    let twice = draw_table("", &parse_table(&once), None, true);
    assert_eq!(once, twice);
}

#[test]
fn test_multi_line_cells_join_between_separators() {
    let lines = [
        "+---+-------+",
        "| a | first |",
        "|   | more  |",
        "+===+=======+",
        "| b | x     |",
        "+---+-------+",
    ];
    let table = parse_table(&lines);
    assert_eq!(table, vec![vec!["a", "first\nmore"], vec!["b", "x"]]);
    assert_eq!(draw_table("", &table, None, true), lines);
}

#[test]
fn test_split_row() {
    assert_eq!(split_row("| a | b  c |"), vec!["a", "b  c"]);
    assert_eq!(split_row("a  b c   d  "), vec!["a", "b c", "d"]);
}

#[test]
fn test_unify_pads_and_drops_empty_columns() {
    let table = vec![
        vec!["".to_string(), "a".to_string()],
        vec![" ".to_string(), "b".to_string(), "c".to_string()],
    ];
    assert_eq!(unify(table), vec![vec!["a", ""], vec!["b", "c"]]);
}

#[test]
fn test_wide_characters_widen_columns() {
    let table = parse_table(&["中文  x"]);
    assert_eq!(
        draw_table("", &table, None, true),
        vec!["+------+---+", "| 中文 | x |", "+======+===+"]
    );
    assert_eq!(
        draw_table("", &table, None, false),
        vec!["+----+---+", "| 中文 | x |", "+====+===+"]
    );
}

#[test]
fn test_empty_table_draws_nothing() {
    assert!(draw_table("", &Vec::new(), None, true).is_empty());
    assert!(parse_table(&["+---+", "+===+"]).is_empty());
}

#[test]
fn test_border_widths() {
    assert_eq!(border_widths(&grid_lines()).unwrap(), vec![8, 8]);
    assert_eq!(border_widths(&["  +--+-+"]).unwrap(), vec![0, 0]);
    assert!(matches!(
        border_widths(&["no border", "here"]),
        Err(Error::Reflow(_))
    ));
}

#[test]
fn test_reflow_wraps_to_border() {
    let text = "\
+------------+-----+
| long words wrap here | x |
+------------+-----+
";
    let plan = reflow_table(text, 25, &Config::default()).unwrap().unwrap();
    assert_eq!(
        plan.apply_to(text),
        "\
+------------+-----+
| long words | x   |
| wrap here  |     |
+============+=====+
"
    );
}

#[test]
fn test_reflow_without_border_fails() {
    let text = "Column 1  Column 2\n";
    let err = reflow_table(text, 0, &Config::default()).unwrap_err();
    assert_eq!(err.to_string(), "Cannot reflow this table: no border found");
}

#[test]
fn test_format_table_keeps_surroundings_and_indent() {
    let text = "before\n\n  a  b\n  cc  d\n\nafter\n";
    let plan = format_table(text, 10, &Config::default()).unwrap();
    assert_eq!(
        plan.apply_to(text),
        "before\n\n  +----+---+\n  | a  | b |\n  +====+===+\n  | cc | d |\n  +----+---+\n\nafter\n"
    );
    assert!(format_table(text, 7, &Config::default()).is_none());
}

#[test]
fn test_simple_table() {
    let table = parse_simple_table(&["Name  Value", "=====  ====", "a  1", "longer  22"]);
    assert_eq!(
        draw_simple_table("", &table, true),
        vec![
            "========  =======",
            "Name      Value",
            "========  =======",
            "a         1",
            "longer    22",
            "========  =======",
        ]
    );

    let text = "x  y\nz  w\n";
    let plan = format_simple_table(text, 0, &Config::default()).unwrap();
    let drawn = plan.apply_to(text);
    assert_eq!(drawn, "===  ===\nx    y\n===  ===\nz    w\n===  ===\n");
    let again = format_simple_table(&drawn, 0, &Config::default()).unwrap();
    assert_eq!(again.apply_to(&drawn), drawn);
}

const THREE_ROWS: &str = "\
+-----+-----+
| a   | b   |
+=====+=====+
| c   | d   |
+-----+-----+
| e   | f   |
+-----+-----+
";

fn cursor_at(text: &str, needle: &str) -> usize {
    text.find(needle).unwrap()
}

#[test]
fn test_merge_down_and_up() {
    let plan = merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "c "), Merge::Down).unwrap();
    let merged = plan.apply_to(THREE_ROWS);
    assert_eq!(merged.lines().nth(4), Some("|     +-----+"));

    let plan = merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "f "), Merge::Up).unwrap();
    let merged = plan.apply_to(THREE_ROWS);
    assert_eq!(merged.lines().nth(4), Some("+-----+     |"));
}

#[test]
fn test_merge_right_and_left() {
    let plan = merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "c "), Merge::Right).unwrap();
    assert_eq!(plan.apply_to(THREE_ROWS).lines().nth(3), Some("| c     d   |"));

    let plan = merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "d "), Merge::Left).unwrap();
    assert_eq!(plan.apply_to(THREE_ROWS).lines().nth(3), Some("| c     d   |"));
}

#[test]
fn test_merge_outside_grid_is_a_miss() {
    assert!(merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "c "), Merge::Left).is_none());
    assert!(merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "d "), Merge::Right).is_none());
    assert!(merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "f "), Merge::Down).is_none());
    assert!(merge_cells(THREE_ROWS, cursor_at(THREE_ROWS, "a "), Merge::Up).is_none());
    assert!(merge_cells(THREE_ROWS, 0, Merge::Down).is_none());
}
