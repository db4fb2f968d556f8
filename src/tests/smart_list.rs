use super::{
    continue_list, increment_decimal, next_letter, renumber_ordered, renumber_roman, LineKind,
};
use crate::buffer::Span;
use crate::error::Error;

fn enter(text: &str) -> (String, usize) {
    let cursor = text.chars().count();
    let plan = continue_list(text, cursor).unwrap();
    let caret = plan.selection.unwrap().end;
    (plan.apply_to(text), caret)
}

#[test]
fn test_classify_precedence() {
    assert!(matches!(
        LineKind::classify("  - "),
        LineKind::EmptyItem { marker: "-", .. }
    ));
    assert!(matches!(
        LineKind::classify("iv. item"),
        LineKind::Roman { numeral: "iv", .. }
    ));
    assert!(matches!(
        LineKind::classify("c. item"),
        LineKind::Ordered { marker: "c", .. }
    ));
    assert!(matches!(
        LineKind::classify("x) item"),
        LineKind::Ordered { marker: "x", .. }
    ));
    assert!(matches!(
        LineKind::classify("#. item"),
        LineKind::Unordered { prefix: "#.", .. }
    ));
    assert!(matches!(
        LineKind::classify("  >> quoted"),
        LineKind::Quote { prefix: "  >>", .. }
    ));
    assert!(matches!(
        LineKind::classify("   words"),
        LineKind::Plain { indent: "   " }
    ));
}

#[test]
fn test_continue_numbered() {
    assert_eq!(enter("1. first item"), ("1. first item\n2. ".to_string(), 17));
    assert_eq!(enter("  (9) nine"), ("  (9) nine\n  (10) ".to_string(), 18));
}

#[test]
fn test_continue_alphabetic() {
    assert_eq!(enter("a. item").0, "a. item\nb. ");
    assert_eq!(enter("B) item").0, "B) item\nC) ");
}

#[test]
fn test_continue_roman_keeps_case() {
    assert_eq!(enter("i. item").0, "i. item\nii. ");
    assert_eq!(enter("IV. item").0, "IV. item\nV. ");
    assert_eq!(enter("viii) item").0, "viii) item\nix) ");
}

#[test]
fn test_continue_compound_roman() {
    assert_eq!(enter("ix. nine").0, "ix. nine\nx. ");
    assert_eq!(enter("xii. twelve").0, "xii. twelve\nxiii. ");
    assert_eq!(enter("(XIV) item").0, "(XIV) item\n(XV) ");
    assert_eq!(enter("MCMXCIV. year").0, "MCMXCIV. year\nMCMXCV. ");
}

#[test]
fn test_single_letter_numeral_follows_its_list() {
    assert_eq!(enter("x. ten").0, "x. ten\ny. ");
    assert_eq!(enter("ix. nine\nx. ten").0, "ix. nine\nx. ten\nxi. ");
    assert!(matches!(
        LineKind::classify_in("x. ten", true),
        LineKind::Roman { numeral: "x", .. }
    ));
    assert!(matches!(
        LineKind::classify("xii. twelve"),
        LineKind::Roman { numeral: "xii", .. }
    ));
}

#[test]
fn test_roman_past_limit_is_an_error() {
    let text = "MMMMCMXCIX. last";
    assert!(matches!(
        continue_list(text, text.len()),
        Err(Error::Range(5000))
    ));

    let block = ["MMMMCMXCVIII. a", "I. b", "I. c"];
    assert!(matches!(renumber_roman(&block), Err(Error::Range(5000))));
    assert_eq!(
        renumber_roman(&block[..2]).unwrap(),
        vec!["MMMMCMXCVIII. a", "MMMMCMXCIX. b"]
    );
}

#[test]
fn test_continue_bullets_and_quotes() {
    assert_eq!(enter("- item"), ("- item\n- ".to_string(), 9));
    assert_eq!(enter("    * nested").0, "    * nested\n    * ");
    assert_eq!(enter("#. auto").0, "#. auto\n#. ");
    assert_eq!(enter("| line block").0, "| line block\n| ");
    assert_eq!(enter("> quoted").0, "> quoted\n> ");
}

#[test]
fn test_plain_text_keeps_indentation_only() {
    assert_eq!(enter("some text here").0, "some text here\n");
    assert_eq!(enter("   indented text").0, "   indented text\n   ");
}

#[test]
fn test_empty_item_leaves_the_list() {
    let text = "- one\n  - ";
    let plan = continue_list(text, 10).unwrap();
    assert_eq!(plan.apply_to(text), "- one\n    ");
    assert_eq!(plan.selection, Some(Span::caret(10)));

    assert_eq!(enter("1. ").0, "   ");
}

#[test]
fn test_split_renumbers_rest_of_block() {
    let text = "1. one\n2. two\n3. three\n\nafter\n";
    let plan = continue_list(text, 6).unwrap();
    assert_eq!(
        plan.apply_to(text),
        "1. one\n2. \n3. two\n4. three\n\nafter\n"
    );
    assert_eq!(plan.selection, Some(Span::caret(10)));
}

#[test]
fn test_split_mid_line_moves_tail() {
    let text = "a. first second\nb. third";
    let plan = continue_list(text, 8).unwrap();
    assert_eq!(plan.apply_to(text), "a. first\nb.  second\nc. third");
    assert_eq!(plan.selection, Some(Span::caret(12)));
}

#[test]
fn test_split_renumbers_roman_block() {
    let text = "i. one\nii. two\n";
    let plan = continue_list(text, 6).unwrap();
    assert_eq!(plan.apply_to(text), "i. one\nii. \niii. two\n");
}

#[test]
fn test_renumber_first_item_decides() {
    let lines = ["3. c", "   wrapped", "7. d", "1. e"];
    assert_eq!(
        renumber_ordered(&lines),
        vec!["3. c", "   wrapped", "4. d", "5. e"]
    );
}

#[test]
fn test_letters_stop_at_z() {
    let lines = ["x. one", "a. two", "a. three", "a. four"];
    assert_eq!(
        renumber_ordered(&lines),
        vec!["x. one", "y. two", "z. three", "a. four"]
    );
    assert_eq!(next_letter('y'), Some('z'));
    assert_eq!(next_letter('z'), None);
    assert_eq!(next_letter('Z'), None);
}

#[test]
fn test_increment_decimal() {
    assert_eq!(increment_decimal("1"), "2");
    assert_eq!(increment_decimal("09"), "10");
    assert_eq!(increment_decimal("999"), "1000");
    assert_eq!(
        increment_decimal("99999999999999999999999999999"),
        "100000000000000000000000000000"
    );
}
