//! Partsieve - parametric search over electronic-component catalogs.
//!
//! Partsieve filters rows of a parts database (resistors, capacitors, ICs,
//! connectors) by per-field constraints typed into a search form. It
//! provides:
//!
//! - Engineering-notation numbers: `"10.2k"`, `"100p"`, `"50V"`
//! - A small per-field query language: exact, substring, bounds, tolerance
//! - Category schemas mapping field names to record columns
//! - Row scanning that tolerates dirty data and reports what it skipped
//!
//! # Quick Start
//!
//! ```rust
//! use partsieve::{Category, Query, QueryEngine};
//!
//! // Rows as fetched from the parts database: id in column 0, value in
//! // column 1, case code in column 12.
//! fn resistor(id: &'static str, value: &'static str, case: &'static str) -> Vec<&'static str> {
//!     let mut row = vec!["x"; 13];
//!     row[0] = id;
//!     row[1] = value;
//!     row[12] = case;
//!     row
//! }
//!
//! let records = vec![
//!     resistor("R-0001", "10.2k", "0805"),
//!     resistor("R-0002", "4.7k", "0603"),
//!     resistor("R-0003", "x", "0805"),
//! ];
//!
//! let engine = QueryEngine::builtin();
//! let query = Query::new()
//!     .field("Value", "1k<100k")
//!     .contains("Casecode", "08")
//!     .build();
//!
//! let found = engine.filter(Category::Resistor, &records, &query).unwrap();
//! assert_eq!(found.matches.len(), 1);
//! assert_eq!(found.matches[0][0], "R-0001");
//!
//! // R-0003 has no value on file; it is skipped with a note.
//! assert_eq!(found.diagnostics.len(), 1);
//! assert_eq!(found.diagnostics[0].part, "R-0003");
//! ```
//!
//! # Field Query Language
//!
//! | Text | Meaning |
//! |------|---------|
//! | `0805` | cell equals `0805` (substring mode: cell contains `0805`) |
//! | `<10k` | value ≤ 10k |
//! | `5<` | value ≥ 5 |
//! | `2<10` | 2 ≤ value ≤ 10 |
//! | `>10` | value ≥ 10 |
//! | `10>` | value ≤ 10 |
//! | `10>2` | 2 ≤ value ≤ 10 |
//! | `10+-2` | 8 ≤ value ≤ 12 |
//!
//! At most one operator may appear in a field. Blank fields are ignored.
//! A cell containing `x` means "undefined for this part": any constraint
//! on that field skips the record.
//!
//! # Suffixes
//!
//! | Suffix | Multiplier |
//! |--------|-----------|
//! | `f` `p` `n` `u` `m` | 1e-15 … 1e-3 |
//! | `k` `M` | 1e3, 1e6 |
//! | `V` | 1 |

mod constraint;
mod engine;
mod error;
mod eval;
mod query;
mod schema;
mod token;
mod traits;
mod value;

// Re-export public API
pub use constraint::{parse_constraint, Constraint, ConstraintError};
pub use engine::{
    Diagnostic, FilterOutcome, QueryEngine, RecordOutcome, SearchPlan, DEFAULT_RESULT_LIMIT,
};
pub use error::{Result, SieveError};
pub use eval::{evaluate, MatchOutcome};
pub use query::{FieldQuery, Query};
pub use schema::{Category, CategorySchema, FieldSpec, SchemaRegistry};
pub use token::{tokenize, Operator, Tokens};
pub use traits::Record;
pub use value::{parse_value, suffix_multiplier, UNDEFINED_MARKER};
