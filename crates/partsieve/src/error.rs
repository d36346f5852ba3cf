//! Error types for the partsieve crate.
//!
//! [`SieveError`] covers failures that stop a call: malformed numbers handed
//! to [`parse_value`](crate::parse_value) directly, and caller contract
//! violations (unknown category, unknown field, short records, bad schema
//! tables). Problems scoped to one field of one record never surface here;
//! they become diagnostics on the returned
//! [`FilterOutcome`](crate::FilterOutcome).

use thiserror::Error;

/// Errors that can occur when parsing values or running a search.
#[derive(Debug, Error)]
pub enum SieveError {
    /// The input holds no digits, or more than one decimal point.
    #[error("invalid number format: {input:?}")]
    InvalidNumberFormat { input: String },

    /// No schema is registered for the requested category.
    #[error("no schema registered for category '{0}'")]
    InvalidCategory(String),

    /// The query names a field the category's schema does not define.
    #[error("field '{field}' is not part of the {category} schema")]
    UnknownField { category: String, field: String },

    /// A record is too short for a column the schema points at.
    #[error("{category} field '{field}' reads column {column}, but the record has {len} cells")]
    ColumnOutOfRange {
        category: String,
        field: String,
        column: usize,
        len: usize,
    },

    /// A schema table failed validation.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A schema document could not be deserialized.
    #[error("schema format error: {0}")]
    SchemaFormat(String),
}

impl SieveError {
    /// Returns `true` for errors caused by a caller handing in data that
    /// breaks the engine's input contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            SieveError::UnknownField { .. } | SieveError::ColumnOutOfRange { .. }
        )
    }
}

impl From<serde_json::Error> for SieveError {
    fn from(err: serde_json::Error) -> Self {
        SieveError::SchemaFormat(err.to_string())
    }
}

impl From<serde_yaml::Error> for SieveError {
    fn from(err: serde_yaml::Error) -> Self {
        SieveError::SchemaFormat(err.to_string())
    }
}

/// Result type for partsieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
