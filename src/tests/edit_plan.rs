use super::{Edit, EditPlan};
use crate::buffer::Span;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_single_line_replacement() {
    let plan = EditPlan::single(Edit::replace(Span::new(7, 13), "Modified"));
    let result = plan.apply_to("Line 1\nLine 2\nLine 3\n");
    let lines: Vec<&str> = result.lines().collect();

    assert_eq!(lines[0], "Line 1");
    assert_eq!(lines[1], "Modified");
    assert_eq!(lines[2], "Line 3");
}

#[test]
fn test_later_edits_do_not_shift_earlier_spans() {
    let plan = EditPlan {
        edits: vec![
            Edit::replace(Span::new(0, 1), "AAA"),
            Edit::replace(Span::new(4, 5), "C"),
        ],
        selection: None,
    };
    assert_eq!(plan.apply_to("a b c"), "AAA b C");
}

#[test]
fn test_same_offset_keeps_listed_order() {
    let plan = EditPlan {
        edits: vec![Edit::insert(3, "[1]_"), Edit::insert(3, "\n.. [1] ")],
        selection: None,
    };
    assert_eq!(plan.apply_to("foo"), "foo[1]_\n.. [1] ");
}

#[test]
fn test_offsets_count_characters() {
    let plan = EditPlan::single(Edit::replace(Span::new(1, 2), "e"));
    assert_eq!(plan.apply_to("héllo"), "hello");
}

#[test]
fn test_noop_detection() {
    assert!(EditPlan::jump(4).is_noop());
    assert!(!EditPlan::single(Edit::insert(0, "x")).is_noop());
}

#[test]
fn test_json_round_trip_and_file_application() {
    let mut doc = NamedTempFile::new().unwrap();
    write!(doc, "Title\n===\n").unwrap();

    let plan = EditPlan::single(Edit::replace(Span::new(6, 9), "====="))
        .with_selection(Span::caret(0));
    let mut saved = NamedTempFile::new().unwrap();
    write!(saved, "{}", serde_json::to_string_pretty(&plan).unwrap()).unwrap();

    let loaded = EditPlan::load(saved.path()).unwrap();
    assert_eq!(loaded, plan);

    loaded.apply_to_file(doc.path()).unwrap();
    assert_eq!(fs::read_to_string(doc.path()).unwrap(), "Title\n=====\n");
}
