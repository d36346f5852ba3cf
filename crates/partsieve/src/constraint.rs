//! Typed constraints parsed from per-field query text.
//!
//! A [`Constraint`] is what one entry box of the search form means once its
//! text has been read: an exact or substring match, a numeric bound, a
//! tolerance range, or an [`Invalid`](Constraint::Invalid) marker carrying
//! the reason the text could not be understood.
//!
//! | Text | Constraint |
//! |------|------------|
//! | `0805` | `Exact("0805")` (or `Substring` in substring mode) |
//! | `<10k` | `field <= 10k` |
//! | `5<` | `field >= 5` |
//! | `2<10` | `2 <= field <= 10` |
//! | `>10` | `field >= 10` |
//! | `10>` | `field <= 10` |
//! | `10>2` | `2 <= field <= 10` |
//! | `10+-2` | `8 <= field <= 12` |

use std::fmt;

use thiserror::Error;

use crate::token::{tokenize, Operator};
use crate::value::parse_value;

/// Reason a query text could not be turned into a usable constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// More than one operator token in the same text.
    #[error("{text:?} contains {count} operators; enter at most one of <, >, +-")]
    MultipleOperators { text: String, count: usize },

    /// An operator is missing a value it needs.
    #[error("the {op} operator in {text:?} needs a value before and after it")]
    MissingRangeBound { text: String, op: Operator },

    /// A bound next to an operator is not a number.
    #[error("bound {bound:?} in {text:?} is not a number")]
    InvalidBound { text: String, bound: String },
}

/// A parsed per-field constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Field must equal the text exactly.
    Exact(String),
    /// Text must occur somewhere in the field (case-sensitive).
    Substring(String),
    /// Field value must lie within the present bounds.
    Bounded {
        lower: Option<f64>,
        lower_inclusive: bool,
        upper: Option<f64>,
        upper_inclusive: bool,
    },
    /// Field value must lie within `[center - tolerance, center + tolerance]`.
    ToleranceRange { center: f64, tolerance: f64 },
    /// Query text was not understood; never matches.
    Invalid(ConstraintError),
}

impl Constraint {
    /// Closed range `lower <= field <= upper`.
    pub fn between(lower: f64, upper: f64) -> Self {
        Constraint::Bounded {
            lower: Some(lower),
            lower_inclusive: true,
            upper: Some(upper),
            upper_inclusive: true,
        }
    }

    /// `field >= lower`.
    pub fn at_least(lower: f64) -> Self {
        Constraint::Bounded {
            lower: Some(lower),
            lower_inclusive: true,
            upper: None,
            upper_inclusive: true,
        }
    }

    /// `field <= upper`.
    pub fn at_most(upper: f64) -> Self {
        Constraint::Bounded {
            lower: None,
            lower_inclusive: true,
            upper: Some(upper),
            upper_inclusive: true,
        }
    }

    /// Returns `true` for constraints that compare parsed numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Constraint::Bounded { .. } | Constraint::ToleranceRange { .. }
        )
    }

    /// Returns `true` for the [`Invalid`](Constraint::Invalid) variant.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Constraint::Invalid(_))
    }

    /// Tests a parsed number against a numeric constraint.
    ///
    /// Text constraints never contain a number; `Invalid` contains nothing.
    pub fn contains_value(&self, value: f64) -> bool {
        match *self {
            Constraint::Bounded {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            } => {
                let above = match lower {
                    Some(lo) if lower_inclusive => value >= lo,
                    Some(lo) => value > lo,
                    None => true,
                };
                let below = match upper {
                    Some(hi) if upper_inclusive => value <= hi,
                    Some(hi) => value < hi,
                    None => true,
                };
                above && below
            }
            Constraint::ToleranceRange { center, tolerance } => {
                center - tolerance <= value && value <= center + tolerance
            }
            _ => false,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Exact(text) => write!(f, "== {text:?}"),
            Constraint::Substring(text) => write!(f, "contains {text:?}"),
            Constraint::Bounded {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            } => {
                let lower_op = if *lower_inclusive { "<=" } else { "<" };
                let upper_op = if *upper_inclusive { "<=" } else { "<" };
                match (lower, upper) {
                    (Some(lo), Some(hi)) => write!(f, "{lo} {lower_op} v {upper_op} {hi}"),
                    (Some(lo), None) => write!(f, "{lo} {lower_op} v"),
                    (None, Some(hi)) => write!(f, "v {upper_op} {hi}"),
                    (None, None) => write!(f, "any"),
                }
            }
            Constraint::ToleranceRange { center, tolerance } => {
                write!(f, "{center} +- {tolerance}")
            }
            Constraint::Invalid(reason) => write!(f, "invalid: {reason}"),
        }
    }
}

/// Parses one field's query text into a [`Constraint`].
///
/// Text without an operator becomes [`Constraint::Exact`], or
/// [`Constraint::Substring`] when `substring` is set. Text with a single
/// operator is split on it and the sides are read with
/// [`parse_value`](crate::parse_value). Anything else yields
/// [`Constraint::Invalid`]; this function never fails.
///
/// # Example
///
/// ```
/// use partsieve::{parse_constraint, Constraint};
///
/// assert_eq!(parse_constraint("0805", false), Constraint::Exact("0805".into()));
/// assert_eq!(parse_constraint("2<10", false), Constraint::between(2.0, 10.0));
/// assert!(parse_constraint("<5>10", false).is_invalid());
/// ```
pub fn parse_constraint(raw: &str, substring: bool) -> Constraint {
    parse_operator_text(raw, substring).unwrap_or_else(Constraint::Invalid)
}

fn parse_operator_text(raw: &str, substring: bool) -> Result<Constraint, ConstraintError> {
    let tokens = tokenize(raw);

    if tokens.is_empty() {
        return Ok(if substring {
            Constraint::Substring(raw.to_string())
        } else {
            Constraint::Exact(raw.to_string())
        });
    }

    let Some((pos, op)) = tokens.single() else {
        return Err(ConstraintError::MultipleOperators {
            text: raw.to_string(),
            count: tokens.len(),
        });
    };

    let before = raw[..pos].trim();
    let after = raw[pos + op.width()..].trim();

    let missing = || ConstraintError::MissingRangeBound {
        text: raw.to_string(),
        op,
    };
    let bound = |side: &str| -> Result<Option<f64>, ConstraintError> {
        if side.is_empty() {
            return Ok(None);
        }
        parse_value(side)
            .map(Some)
            .map_err(|_| ConstraintError::InvalidBound {
                text: raw.to_string(),
                bound: side.to_string(),
            })
    };

    if before.is_empty() && after.is_empty() {
        return Err(missing());
    }

    match op {
        Operator::Lt => Ok(Constraint::Bounded {
            lower: bound(before)?,
            lower_inclusive: true,
            upper: bound(after)?,
            upper_inclusive: true,
        }),
        Operator::Gt => Ok(Constraint::Bounded {
            lower: bound(after)?,
            lower_inclusive: true,
            upper: bound(before)?,
            upper_inclusive: true,
        }),
        Operator::PlusMinus => match (bound(before)?, bound(after)?) {
            (Some(center), Some(tolerance)) => Ok(Constraint::ToleranceRange { center, tolerance }),
            _ => Err(missing()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_exact_or_substring() {
        assert_eq!(
            parse_constraint("0805", false),
            Constraint::Exact("0805".to_string())
        );
        assert_eq!(
            parse_constraint("080", true),
            Constraint::Substring("080".to_string())
        );
    }

    #[test]
    fn less_than_forms() {
        assert_eq!(parse_constraint("<10", false), Constraint::at_most(10.0));
        assert_eq!(parse_constraint("5<", false), Constraint::at_least(5.0));
        assert_eq!(parse_constraint("2<10", false), Constraint::between(2.0, 10.0));
        assert_eq!(
            parse_constraint("1k<10.2k", false),
            Constraint::between(1_000.0, 10_200.0)
        );
    }

    #[test]
    fn greater_than_is_a_descending_chain() {
        assert_eq!(parse_constraint(">10", false), Constraint::at_least(10.0));
        assert_eq!(parse_constraint("10>", false), Constraint::at_most(10.0));
        assert_eq!(parse_constraint("10>2", false), Constraint::between(2.0, 10.0));
    }

    #[test]
    fn whitespace_around_bounds() {
        assert_eq!(parse_constraint(" < 10 ", false), Constraint::at_most(10.0));
        assert_eq!(
            parse_constraint("10 +- 2", false),
            Constraint::ToleranceRange {
                center: 10.0,
                tolerance: 2.0
            }
        );
    }

    #[test]
    fn operators_apply_in_substring_mode() {
        assert_eq!(parse_constraint("<10", true), Constraint::at_most(10.0));
    }

    #[test]
    fn tolerance_range() {
        assert_eq!(
            parse_constraint("10k+-500", false),
            Constraint::ToleranceRange {
                center: 10_000.0,
                tolerance: 500.0
            }
        );
    }

    #[test]
    fn tolerance_needs_both_sides() {
        for text in ["+-2", "10+-", "+-"] {
            assert!(
                matches!(
                    parse_constraint(text, false),
                    Constraint::Invalid(ConstraintError::MissingRangeBound {
                        op: Operator::PlusMinus,
                        ..
                    })
                ),
                "{text:?}"
            );
        }
    }

    #[test]
    fn bare_comparison_is_missing_bound() {
        assert!(matches!(
            parse_constraint("<", false),
            Constraint::Invalid(ConstraintError::MissingRangeBound {
                op: Operator::Lt,
                ..
            })
        ));
    }

    #[test]
    fn multiple_operators() {
        assert_eq!(
            parse_constraint("<5>10", false),
            Constraint::Invalid(ConstraintError::MultipleOperators {
                text: "<5>10".to_string(),
                count: 2
            })
        );
        // All three at once is still ambiguous.
        assert!(parse_constraint("1<2>3+-4", false).is_invalid());
        assert!(parse_constraint("1<2<3", false).is_invalid());
    }

    #[test]
    fn unparseable_bound() {
        assert_eq!(
            parse_constraint("<abc", false),
            Constraint::Invalid(ConstraintError::InvalidBound {
                text: "<abc".to_string(),
                bound: "abc".to_string()
            })
        );
    }

    #[test]
    fn contains_value_bounds() {
        let range = Constraint::between(2.0, 10.0);
        assert!(range.contains_value(2.0));
        assert!(range.contains_value(10.0));
        assert!(!range.contains_value(1.999));
        assert!(!range.contains_value(10.001));

        let open = Constraint::Bounded {
            lower: Some(2.0),
            lower_inclusive: false,
            upper: Some(10.0),
            upper_inclusive: false,
        };
        assert!(!open.contains_value(2.0));
        assert!(!open.contains_value(10.0));
        assert!(open.contains_value(5.0));

        let tol = Constraint::ToleranceRange {
            center: 10.0,
            tolerance: 2.0,
        };
        assert!(tol.contains_value(8.0));
        assert!(tol.contains_value(12.0));
        assert!(!tol.contains_value(7.99));
        assert!(!tol.contains_value(12.01));

        assert!(!Constraint::Exact("5".into()).contains_value(5.0));
    }

    #[test]
    fn nan_is_never_contained() {
        assert!(!Constraint::at_least(0.0).contains_value(f64::NAN));
        assert!(!Constraint::between(0.0, 1.0).contains_value(f64::NAN));
    }

    #[test]
    fn display() {
        assert_eq!(Constraint::Exact("0805".into()).to_string(), "== \"0805\"");
        assert_eq!(Constraint::between(2.0, 10.0).to_string(), "2 <= v <= 10");
        assert_eq!(Constraint::at_most(5.0).to_string(), "v <= 5");
        assert_eq!(
            Constraint::ToleranceRange {
                center: 10.0,
                tolerance: 2.0
            }
            .to_string(),
            "10 +- 2"
        );
    }
}
