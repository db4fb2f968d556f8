//! Display width of text as laid out in a monospaced editor.
//!
//! Width calculations rely on `UnicodeWidthStr::width`, so East-Asian wide characters (CJK
//! ideographs, Hangul syllables, fullwidth forms) take two columns.

use unicode_width::UnicodeWidthStr;

#[must_use]
/// Columns occupied by `text`, counting wide characters twice.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

#[must_use]
/// Columns occupied by `text`, either wide-aware or one column per character.
pub fn measure(text: &str, wide_chars: bool) -> usize {
    if wide_chars {
        display_width(text)
    } else {
        text.chars().count()
    }
}

#[must_use]
/// Left-justify `text` in a field of `width` columns; never truncates.
pub fn pad_to(text: &str, width: usize, wide_chars: bool) -> String {
    let used = measure(text, wide_chars);
    let mut padded = String::with_capacity(text.len() + width.saturating_sub(used));
    padded.push_str(text);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    padded
}

#[must_use]
/// Greedily wrap `text` into lines of at most `width` columns.
///
/// Whitespace runs collapse to single spaces. Words wider than a line are split across lines.
/// Blank input yields no lines.
pub fn wrap(text: &str, width: usize, wide_chars: bool) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for word in text.split_whitespace() {
        let word_width = measure(word, wide_chars);
        if !current.is_empty() && used + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            used += 1 + word_width;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        for ch in word.chars() {
            let ch_width = measure(ch.encode_utf8(&mut [0; 4]), wide_chars);
            if used + ch_width > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(ch);
            used += ch_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "tests/width.rs"]
mod tests;
