use super::{display_width, measure, pad_to, wrap};

#[test]
fn test_wide_characters_count_double() {
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width("中文"), 4);
    assert_eq!(display_width("한국"), 4);
    assert_eq!(measure("中文", false), 2);
}

#[test]
fn test_pad_to_accounts_for_wide_characters() {
    assert_eq!(pad_to("中", 4, true), "中  ");
    assert_eq!(pad_to("中", 4, false), "中   ");
    assert_eq!(pad_to("toolong", 3, true), "toolong");
}

#[test]
fn test_wrap_fills_greedily() {
    assert_eq!(
        wrap("as long as you do not put in", 10, true),
        vec!["as long as", "you do not", "put in"]
    );
    assert_eq!(wrap("  spaced\n  out  ", 20, true), vec!["spaced out"]);
    assert!(wrap("   ", 5, true).is_empty());
}

#[test]
fn test_wrap_breaks_long_words() {
    assert_eq!(wrap("abcdefgh ij", 3, true), vec!["abc", "def", "gh", "ij"]);
    assert_eq!(wrap("中文字", 4, true), vec!["中文", "字"]);
    assert_eq!(wrap("x", 0, true), vec!["x"]);
}
