//! Evaluation of a single constraint against a single cell.

use crate::constraint::Constraint;
use crate::value::{parse_value, UNDEFINED_MARKER};

/// Result of testing one field of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Whether the cell satisfies the constraint.
    pub matched: bool,
    /// Why the cell was skipped or could not be compared, if it was.
    pub diagnostic: Option<String>,
}

impl MatchOutcome {
    /// The cell satisfies the constraint.
    pub fn hit() -> Self {
        MatchOutcome {
            matched: true,
            diagnostic: None,
        }
    }

    /// The cell was compared and does not satisfy the constraint.
    pub fn miss() -> Self {
        MatchOutcome {
            matched: false,
            diagnostic: None,
        }
    }

    /// The cell could not be compared; counts as a miss.
    pub fn skipped(reason: impl Into<String>) -> Self {
        MatchOutcome {
            matched: false,
            diagnostic: Some(reason.into()),
        }
    }

    fn from_bool(matched: bool) -> Self {
        if matched {
            MatchOutcome::hit()
        } else {
            MatchOutcome::miss()
        }
    }
}

/// Evaluates `constraint` against a record's raw cell text.
///
/// Never fails: cells holding the undefined marker, cells that do not parse
/// as numbers, and [`Constraint::Invalid`] all produce a non-matching outcome
/// with a diagnostic so that a scan can move on to the next field.
///
/// # Example
///
/// ```
/// use partsieve::{evaluate, parse_constraint};
///
/// let under_ten = parse_constraint("<10", false);
/// assert!(evaluate(&under_ten, "4.7").matched);
/// assert!(!evaluate(&under_ten, "15").matched);
///
/// let skipped = evaluate(&under_ten, "x");
/// assert!(!skipped.matched);
/// assert!(skipped.diagnostic.is_some());
/// ```
pub fn evaluate(constraint: &Constraint, field_value: &str) -> MatchOutcome {
    if field_value == UNDEFINED_MARKER {
        return MatchOutcome::skipped("field undefined for this record, skipped");
    }

    match constraint {
        Constraint::Exact(text) => MatchOutcome::from_bool(field_value == text),
        Constraint::Substring(text) => MatchOutcome::from_bool(field_value.contains(text.as_str())),
        Constraint::Bounded { .. } | Constraint::ToleranceRange { .. } => {
            match parse_value(field_value) {
                Ok(value) => MatchOutcome::from_bool(constraint.contains_value(value)),
                Err(err) => MatchOutcome::skipped(format!("cannot compare ({constraint}): {err}")),
            }
        }
        Constraint::Invalid(reason) => MatchOutcome::skipped(reason.to_string()),
    }
}
