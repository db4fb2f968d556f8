use super::{indent_list_item, Shift};
use crate::buffer::Span;
use crate::config::Config;

fn shift(text: &str, cursor: usize, shift: Shift) -> Option<(String, Span)> {
    let plan = indent_list_item(text, cursor, &Config::default(), shift)?;
    Some((plan.apply_to(text), plan.selection.unwrap()))
}

#[test]
fn test_indent_bullet_switches_and_separates() {
    let (out, sel) = shift("- one\n- two", 8, Shift::Indent).unwrap();
    assert_eq!(out, "- one\n\n    + two");
    assert_eq!(sel, Span::caret(16));
}

#[test]
fn test_outdent_undoes_indent() {
    let text = "- one\n\n    + two";
    let (out, sel) = shift(text, 12, Shift::Outdent).unwrap();
    assert_eq!(out, "- one\n- two");
    assert_eq!(sel, Span::caret(11));
}

#[test]
fn test_indent_numbered_selects_new_label() {
    let (out, sel) = shift("1. one\n2. two", 9, Shift::Indent).unwrap();
    assert_eq!(out, "1. one\n\n     a) two");
    assert_eq!(sel, Span::new(13, 14));
}

#[test]
fn test_letters_and_roman_become_numbers() {
    let (out, _) = shift("b. item", 0, Shift::Indent).unwrap();
    assert_eq!(out, "     1) item");
    let (out, _) = shift("iv) item", 0, Shift::Indent).unwrap();
    assert_eq!(out, "     1. item");
    let (out, sel) = shift("(a) item", 0, Shift::Indent).unwrap();
    assert_eq!(out, "     (1) item");
    assert_eq!(sel, Span::new(6, 7));
    let (out, sel) = shift("#. item", 0, Shift::Indent).unwrap();
    assert_eq!(out, "     #) item");
    assert_eq!(sel, Span::caret(12));
}

#[test]
fn test_only_the_leading_marker_changes() {
    let (out, _) = shift("* a*b - c", 0, Shift::Indent).unwrap();
    assert_eq!(out, "    - a*b - c");
}

#[test]
fn test_outdent_needs_full_step() {
    assert!(shift("  - item", 0, Shift::Outdent).is_none());
    assert!(shift("plain text", 0, Shift::Indent).is_none());
    assert!(shift("*emphasis*", 0, Shift::Indent).is_none());
}

#[test]
fn test_outdent_joins_sibling_list() {
    let text = "- one\n\n    - two\n\n        * three";
    let (out, _) = shift(text, 20, Shift::Outdent).unwrap();
    assert_eq!(out, "- one\n\n    - two\n    + three");
}

#[test]
fn test_outdent_keeps_blank_line_under_different_depth() {
    let text = "- one\n\n        * three";
    let (out, _) = shift(text, 10, Shift::Outdent).unwrap();
    assert_eq!(out, "- one\n\n    + three");
}

#[test]
fn test_custom_settings() {
    let config = Config {
        tab_width: 2,
        auto_switch_bullet: false,
        ..Config::default()
    };
    let plan = indent_list_item("- one\n- two", 6, &config, Shift::Indent).unwrap();
    assert_eq!(plan.apply_to("- one\n- two"), "- one\n\n  - two");
}
