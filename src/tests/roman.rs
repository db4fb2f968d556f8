use super::{from_roman, to_roman, MAX_ROMAN};
use crate::error::Error;

#[test]
fn test_known_values() {
    assert_eq!(to_roman(1).unwrap(), "I");
    assert_eq!(to_roman(4).unwrap(), "IV");
    assert_eq!(to_roman(1994).unwrap(), "MCMXCIV");
    assert_eq!(to_roman(4000).unwrap(), "MMMM");
    assert_eq!(to_roman(4999).unwrap(), "MMMMCMXCIX");
    assert_eq!(from_roman("MCMXCIV"), 1994);
    assert_eq!(from_roman("XLII"), 42);
}

#[test]
fn test_round_trip_whole_range() {
    for n in 1..=MAX_ROMAN {
        let numeral = to_roman(n).unwrap();
        assert_eq!(from_roman(&numeral), n, "round trip failed for {numeral}");
    }
}

#[test]
fn test_out_of_range() {
    assert!(matches!(to_roman(0), Err(Error::Range(0))));
    assert!(matches!(to_roman(5000), Err(Error::Range(5000))));
}

#[test]
fn test_decode_stops_at_foreign_characters() {
    assert_eq!(from_roman(""), 0);
    assert_eq!(from_roman("XIZ"), 11);
    assert_eq!(from_roman("IIII"), 4);
}
