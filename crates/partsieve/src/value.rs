//! Engineering-notation value parsing.
//!
//! Catalog cells store magnitudes the way they are printed on a datasheet:
//! `"10.2k"`, `"100p"`, `"50V"`. [`parse_value`] turns such a string into the
//! plain number it denotes so that range constraints can compare it.

use crate::error::{Result, SieveError};

/// Cell content meaning "not applicable / unknown for this part".
pub const UNDEFINED_MARKER: &str = "x";

/// Returns the multiplier an engineering suffix character stands for.
///
/// `V` maps to `1` so that voltage ratings such as `"50V"` parse as plain
/// numbers.
///
/// ```
/// use partsieve::suffix_multiplier;
///
/// assert_eq!(suffix_multiplier('k'), Some(1e3));
/// assert_eq!(suffix_multiplier('p'), Some(1e-12));
/// assert_eq!(suffix_multiplier('V'), Some(1.0));
/// assert_eq!(suffix_multiplier('Q'), None);
/// ```
pub fn suffix_multiplier(c: char) -> Option<f64> {
    match c {
        'k' => Some(1e3),
        'M' => Some(1e6),
        'm' => Some(1e-3),
        'u' => Some(1e-6),
        'n' => Some(1e-9),
        'p' => Some(1e-12),
        'f' => Some(1e-15),
        'V' => Some(1.0),
        _ => None,
    }
}

/// Parses an engineering-notation string into the number it denotes.
///
/// Digits and a single decimal point are collected left to right into the
/// numeric literal. Every other character is checked against the suffix
/// table; the first recognized suffix sets the multiplier and anything else
/// is ignored.
///
/// # Errors
///
/// Returns [`SieveError::InvalidNumberFormat`] when the input contains no
/// digit at all, or more than one decimal point.
///
/// # Example
///
/// ```
/// use partsieve::parse_value;
///
/// assert_eq!(parse_value("10.2k").unwrap(), 10_200.0);
/// assert_eq!(parse_value("50V").unwrap(), 50.0);
/// assert!(parse_value("k").is_err());
/// ```
pub fn parse_value(raw: &str) -> Result<f64> {
    let invalid = || SieveError::InvalidNumberFormat {
        input: raw.to_string(),
    };

    let mut literal = String::with_capacity(raw.len());
    let mut has_digit = false;
    let mut has_point = false;
    let mut multiplier = None;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            has_digit = true;
            literal.push(c);
        } else if c == '.' {
            if has_point {
                return Err(invalid());
            }
            has_point = true;
            literal.push(c);
        } else if multiplier.is_none() {
            multiplier = suffix_multiplier(c);
        }
    }

    if !has_digit {
        return Err(invalid());
    }

    let number: f64 = literal.parse().map_err(|_| invalid())?;
    Ok(number * multiplier.unwrap_or(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_value("0.125").unwrap(), 0.125);
        assert_eq!(parse_value("50").unwrap(), 50.0);
        assert_eq!(parse_value("0805").unwrap(), 805.0);
        assert_eq!(parse_value(".5").unwrap(), 0.5);
        assert_eq!(parse_value("5.").unwrap(), 5.0);
    }

    #[test]
    fn suffixes() {
        assert_eq!(parse_value("10.2k").unwrap(), 10_200.0);
        assert_eq!(parse_value("100p").unwrap(), 1e-10);
        assert_eq!(parse_value("50V").unwrap(), 50.0);
        assert_eq!(parse_value("4.7k").unwrap(), 4_700.0);
        assert_eq!(parse_value("1.5M").unwrap(), 1_500_000.0);
        assert_eq!(parse_value("10n").unwrap(), 1e-8);
    }

    #[test]
    fn suffix_position_is_free() {
        // Datasheet style "4k7" reads as digits 47 with a kilo multiplier.
        assert_eq!(parse_value("4k7").unwrap(), 47_000.0);
    }

    #[test]
    fn first_suffix_wins() {
        // "mV": milli is seen before the unit marker.
        assert_eq!(parse_value("5mV").unwrap(), 5.0 * 1e-3);
        assert_eq!(parse_value("5Vm").unwrap(), 5.0);
    }

    #[test]
    fn unknown_characters_are_ignored() {
        assert_eq!(parse_value(" 47 ").unwrap(), 47.0);
        assert_eq!(parse_value("47R").unwrap(), 47.0);
        assert_eq!(parse_value("1%").unwrap(), 1.0);
    }

    #[test]
    fn no_digits_is_rejected() {
        for input in ["", "k", "x", ".", "abc", "V"] {
            let err = parse_value(input).unwrap_err();
            assert!(
                matches!(err, SieveError::InvalidNumberFormat { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn second_decimal_point_is_rejected() {
        assert!(matches!(
            parse_value("1.2.3"),
            Err(SieveError::InvalidNumberFormat { .. })
        ));
    }

    #[test]
    fn multiplier_table() {
        assert_eq!(suffix_multiplier('M'), Some(1e6));
        assert_eq!(suffix_multiplier('m'), Some(1e-3));
        assert_eq!(suffix_multiplier('u'), Some(1e-6));
        assert_eq!(suffix_multiplier('n'), Some(1e-9));
        assert_eq!(suffix_multiplier('f'), Some(1e-15));
        assert_eq!(suffix_multiplier('K'), None);
    }
}
