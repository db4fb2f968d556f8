//! Roman numeral conversion for roman-numbered list items.

use crate::error::{Error, Result};

/// Subtractive-notation digits, largest first.
const ROMAN_MAP: [(&str, u32); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

/// Largest value [`to_roman`] will encode.
pub const MAX_ROMAN: u32 = 4999;

/// Encode `n` as an uppercase roman numeral.
///
/// # Errors
///
/// Returns [`Error::Range`] unless `1 <= n <= 4999`.
pub fn to_roman(mut n: u32) -> Result<String> {
    if !(1..=MAX_ROMAN).contains(&n) {
        return Err(Error::Range(n));
    }
    let mut result = String::new();
    for (numeral, value) in ROMAN_MAP {
        while n >= value {
            result.push_str(numeral);
            n -= value;
        }
    }
    Ok(result)
}

#[must_use]
/// Decode an uppercase roman numeral by stripping digits off the front in table order.
///
/// Decoding stops at the first character that does not continue the numeral, so trailing
/// garbage is ignored and an empty string decodes to zero.
pub fn from_roman(s: &str) -> u32 {
    let mut rest = s;
    let mut result = 0;
    for (numeral, value) in ROMAN_MAP {
        while let Some(stripped) = rest.strip_prefix(numeral) {
            result += value;
            rest = stripped;
        }
    }
    result
}

#[cfg(test)]
#[path = "tests/roman.rs"]
mod tests;
