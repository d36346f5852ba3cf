//! Query builder.
//!
//! A [`Query`] is what the search form holds when the user presses search:
//! for each field, the text typed into its entry box and whether the
//! "not whole entry" (substring) box is ticked. Fields left blank impose no
//! constraint.

use std::collections::BTreeMap;

use crate::engine::DEFAULT_RESULT_LIMIT;

/// Raw query input for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldQuery {
    /// Text typed by the user.
    pub text: String,
    /// Match the text anywhere in the cell instead of the whole cell.
    pub substring: bool,
}

impl FieldQuery {
    /// Whole-entry query.
    pub fn exact(text: impl Into<String>) -> Self {
        FieldQuery {
            text: text.into(),
            substring: false,
        }
    }

    /// Substring query.
    pub fn substring(text: impl Into<String>) -> Self {
        FieldQuery {
            text: text.into(),
            substring: true,
        }
    }

    /// Returns `true` if this field constrains the search.
    ///
    /// Blank and whitespace-only text means "don't care".
    pub fn is_active(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Per-field search input plus the maximum number of results wanted.
///
/// # Example
///
/// ```
/// use partsieve::Query;
///
/// let query = Query::new()
///     .field("Value", "1k<100k")
///     .contains("Casecode", "08")
///     .field("Tolerance", "")
///     .limit(20)
///     .build();
///
/// assert_eq!(query.active_fields().count(), 2);
/// assert_eq!(query.get_limit(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    fields: BTreeMap<String, FieldQuery>,
    limit: usize,
}

impl Default for Query {
    fn default() -> Self {
        Query {
            fields: BTreeMap::new(),
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl Query {
    /// Creates an empty query, which matches every record.
    pub fn new() -> Self {
        Query::default()
    }

    /// Builds a query from `(field, text, substring)` triples, as read off
    /// a search form. Later entries for the same field replace earlier ones.
    pub fn from_entries<I, N, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, T, bool)>,
        N: Into<String>,
        T: Into<String>,
    {
        entries
            .into_iter()
            .fold(Query::new(), |query, (name, text, substring)| {
                query.entry(name, text, substring)
            })
    }

    // ========================================================================
    // Field builders
    // ========================================================================

    /// Sets the input for a field.
    pub fn entry(
        mut self,
        name: impl Into<String>,
        text: impl Into<String>,
        substring: bool,
    ) -> Self {
        self.fields.insert(
            name.into(),
            FieldQuery {
                text: text.into(),
                substring,
            },
        );
        self
    }

    /// Sets a whole-entry input for a field.
    pub fn field(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.entry(name, text, false)
    }

    /// Sets a substring input for a field.
    pub fn contains(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.entry(name, text, true)
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Sets the maximum number of matches to return.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = n;
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the input for a field, if one was given.
    pub fn get(&self, name: &str) -> Option<&FieldQuery> {
        self.fields.get(name)
    }

    /// All field inputs, including blank ones.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FieldQuery)> {
        self.fields.iter().map(|(name, q)| (name.as_str(), q))
    }

    /// Field inputs that constrain the search.
    pub fn active_fields(&self) -> impl Iterator<Item = (&str, &FieldQuery)> {
        self.entries().filter(|(_, q)| q.is_active())
    }

    /// Maximum number of matches to return.
    pub fn get_limit(&self) -> usize {
        self.limit
    }

    /// Returns `true` if no field constrains the search.
    pub fn is_empty(&self) -> bool {
        self.active_fields().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit() {
        assert_eq!(Query::new().get_limit(), DEFAULT_RESULT_LIMIT);
        assert_eq!(DEFAULT_RESULT_LIMIT, 100);
    }

    #[test]
    fn blank_fields_are_inactive() {
        let query = Query::new()
            .field("Value", "")
            .field("Casecode", "   ")
            .build();
        assert!(query.is_empty());
        assert_eq!(query.entries().count(), 2);
    }

    #[test]
    fn builders_set_mode() {
        let query = Query::new()
            .field("Value", "10k")
            .contains("Casecode", "08")
            .build();
        assert_eq!(query.get("Value"), Some(&FieldQuery::exact("10k")));
        assert_eq!(query.get("Casecode"), Some(&FieldQuery::substring("08")));
        assert_eq!(query.get("Voltage"), None);
        assert!(!query.is_empty());
    }

    #[test]
    fn from_entries_last_wins() {
        let query = Query::from_entries([
            ("Value", "1k", false),
            ("Casecode", "", false),
            ("Value", "2k", true),
        ]);
        assert_eq!(query.get("Value"), Some(&FieldQuery::substring("2k")));
        let active: Vec<_> = query.active_fields().map(|(name, _)| name).collect();
        assert_eq!(active, vec!["Value"]);
    }
}
