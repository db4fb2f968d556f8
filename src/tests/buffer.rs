use super::{
    byte_offset, char_spans, lines, offset_of, row_col, substr, Block, Buffer, Document, Span,
};
use crate::edit_plan::{Edit, EditPlan};
use regex::Regex;

#[test]
fn test_offsets_are_characters_not_bytes() {
    let text = "héllo wörld";
    assert_eq!(byte_offset(text, 2), 3);
    assert_eq!(substr(text, Span::new(6, 11)), "wörld");
    let re = Regex::new("w").unwrap();
    let spans = char_spans(text, re.find_iter(text).map(|m| m.range()));
    assert_eq!(spans, vec![Span::new(6, 7)]);
}

#[test]
fn test_lines_and_positions() {
    let text = "one\ntwo\n\nfour";
    let all = lines(text);
    assert_eq!(all.len(), 4);
    assert_eq!(all[1].start, 4);
    assert_eq!(all[1].end(), 7);
    assert!(all[2].is_blank());
    assert_eq!(row_col(text, 5), (1, 1));
    assert_eq!(offset_of(text, 3, 2), 11);
    assert_eq!(offset_of(text, 9, 0), text.len());
}

#[test]
fn test_block_around_cursor() {
    let text = "intro\n\n  a  b\n  c  d\n\noutro\n";
    let block = Block::around(text, 9).unwrap();
    assert_eq!(block.lines, vec!["  a  b", "  c  d"]);
    assert_eq!(block.indent, "  ");
    assert_eq!(block.first_row, 2);
    assert_eq!(block.span, Span::new(7, 21));
    assert!(block.trailing_newline);
    assert!(Block::around(text, 6).is_none());
}

#[test]
fn test_block_at_end_without_newline() {
    let text = "a\nb";
    let block = Block::around(text, 3).unwrap();
    assert_eq!(block.span, Span::new(0, 3));
    assert!(!block.trailing_newline);
    assert_eq!(block.render(&["x", "y"]), "x\ny");
}

#[test]
fn test_document_applies_plan_and_moves_cursor() {
    let mut doc = Document::new("hello world", 5);
    let plan = EditPlan {
        edits: vec![Edit::insert(5, ",")],
        selection: Some(Span::caret(6)),
    };
    doc.apply(&plan);
    assert_eq!(doc.text(), "hello, world");
    assert_eq!(doc.cursor(), 6);
    let re = Regex::new("o").unwrap();
    assert_eq!(doc.find_all(&re), vec![Span::new(4, 5), Span::new(8, 9)]);
}
