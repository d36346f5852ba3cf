//! Query execution over catalog records.
//!
//! [`QueryEngine`] resolves a category's schema and compiles a [`Query`]
//! into a [`SearchPlan`]: one parsed [`Constraint`] per active field, in
//! schema order. The plan is immutable and can be reused for every record
//! of the search (or shared across threads).
//!
//! A record matches when every active field matches:
//!
//! ```text
//! match = ∀ active field f: evaluate(constraint(f), record[column(f)])
//! ```
//!
//! Per-field problems (undefined cells, unparseable numbers, ambiguous
//! query text) turn into a miss plus a [`Diagnostic`] and never stop the
//! scan. Only contract violations (unknown category, a query field the
//! schema does not define, a record shorter than the schema) are errors.

use std::fmt;

use crate::constraint::{parse_constraint, Constraint};
use crate::error::{Result, SieveError};
use crate::eval::evaluate;
use crate::query::Query;
use crate::schema::{Category, CategorySchema, FieldSpec, SchemaRegistry};
use crate::traits::Record;

/// Number of matches returned when a query sets no limit.
pub const DEFAULT_RESULT_LIMIT: usize = 100;

/// A per-field note produced while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Identifier of the record (its first cell).
    pub part: String,
    /// Field the note is about.
    pub field: String,
    /// What happened.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for part {} {}: {}", self.part, self.field, self.message)
    }
}

/// Verdict for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Whether every active field matched.
    pub included: bool,
    /// Notes produced by this record's fields, in schema order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a search.
#[derive(Debug)]
pub struct FilterOutcome<'r, R> {
    /// Matching records in input order, at most the query's limit.
    pub matches: Vec<&'r R>,
    /// Notes from every record scanned, in scan order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of records that matched before the limit was applied.
    pub total_matches: usize,
}

impl<'r, R> FilterOutcome<'r, R> {
    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns `true` if matches were cut off by the limit.
    pub fn is_truncated(&self) -> bool {
        self.total_matches > self.matches.len()
    }
}

#[derive(Debug, Clone)]
struct ActiveField<'s> {
    spec: &'s FieldSpec,
    constraint: Constraint,
}

/// A query compiled against one category schema.
#[derive(Debug, Clone)]
pub struct SearchPlan<'s> {
    schema: &'s CategorySchema,
    active: Vec<ActiveField<'s>>,
    limit: usize,
}

impl<'s> SearchPlan<'s> {
    /// Parses the active fields of `query` against `schema`.
    ///
    /// # Errors
    ///
    /// [`SieveError::UnknownField`] if the query names a field the schema
    /// does not define, whether or not its text is blank.
    pub fn compile(schema: &'s CategorySchema, query: &Query) -> Result<Self> {
        let category = schema.category();

        if let Some((name, _)) = query.entries().find(|(name, _)| schema.field(name).is_none()) {
            return Err(SieveError::UnknownField {
                category: category.to_string(),
                field: name.to_string(),
            });
        }

        let active: Vec<ActiveField<'s>> = schema
            .fields()
            .iter()
            .filter_map(|spec| {
                let input = query.get(&spec.name).filter(|q| q.is_active())?;
                let constraint = parse_constraint(&input.text, input.substring);
                if let Constraint::Invalid(reason) = &constraint {
                    tracing::warn!(%category, field = %spec.name, %reason, "query text not understood");
                }
                Some(ActiveField { spec, constraint })
            })
            .collect();

        tracing::debug!(
            %category,
            active_fields = active.len(),
            limit = query.get_limit(),
            "compiled search plan"
        );

        Ok(SearchPlan {
            schema,
            active,
            limit: query.get_limit(),
        })
    }

    /// The schema this plan reads records with.
    pub fn schema(&self) -> &'s CategorySchema {
        self.schema
    }

    /// Parsed constraints of the active fields, in evaluation order.
    pub fn constraints(&self) -> impl Iterator<Item = (&str, &Constraint)> + '_ {
        self.active
            .iter()
            .map(|field| (field.spec.name.as_str(), &field.constraint))
    }

    /// Maximum number of matches [`filter`](Self::filter) returns.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Evaluates every active field against one record.
    ///
    /// All active fields are checked, even after one has failed, so the
    /// diagnostics describe the whole record.
    ///
    /// # Errors
    ///
    /// [`SieveError::ColumnOutOfRange`] if the record has no cell at a
    /// queried field's column.
    pub fn evaluate<R: Record + ?Sized>(&self, record: &R) -> Result<RecordOutcome> {
        let mut included = true;
        let mut diagnostics = Vec::new();

        for field in &self.active {
            let column = field.spec.column;
            let cell = record
                .cell(column)
                .ok_or_else(|| SieveError::ColumnOutOfRange {
                    category: self.schema.category().to_string(),
                    field: field.spec.name.clone(),
                    column,
                    len: record.cell_count(),
                })?;

            let outcome = evaluate(&field.constraint, cell);
            included &= outcome.matched;

            if let Some(message) = outcome.diagnostic {
                tracing::debug!(
                    part = record.part_id(),
                    field = %field.spec.name,
                    %message,
                    "field skipped"
                );
                diagnostics.push(Diagnostic {
                    part: record.part_id().to_string(),
                    field: field.spec.name.clone(),
                    message,
                });
            }
        }

        Ok(RecordOutcome {
            included,
            diagnostics,
        })
    }

    /// Tests whether one record matches.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> Result<bool> {
        Ok(self.evaluate(record)?.included)
    }

    /// Counts matching records, ignoring the limit.
    pub fn count<R: Record>(&self, records: &[R]) -> Result<usize> {
        let mut n = 0;
        for record in records {
            if self.matches(record)? {
                n += 1;
            }
        }
        Ok(n)
    }

    /// Scans `records` in order and collects the matches.
    ///
    /// Matches keep input order and stop accumulating at the limit; the scan
    /// itself continues so that diagnostics cover every record.
    pub fn filter<'r, R: Record>(&self, records: &'r [R]) -> Result<FilterOutcome<'r, R>> {
        let span = tracing::debug_span!(
            "partsieve.filter",
            category = %self.schema.category(),
            records = records.len(),
            matches = tracing::field::Empty
        );
        let _entered = span.enter();

        let mut matches = Vec::new();
        let mut diagnostics = Vec::new();
        let mut total_matches = 0;

        for record in records {
            let outcome = self.evaluate(record)?;
            diagnostics.extend(outcome.diagnostics);
            if outcome.included {
                total_matches += 1;
                if matches.len() < self.limit {
                    matches.push(record);
                }
            }
        }

        span.record("matches", total_matches);

        Ok(FilterOutcome {
            matches,
            diagnostics,
            total_matches,
        })
    }
}

/// Entry point for searches against a set of category schemas.
///
/// # Example
///
/// ```
/// use partsieve::{Category, Query, QueryEngine};
///
/// let mut row = vec!["x"; 13];
/// row[0] = "R-0001";
/// row[1] = "10.2k";
/// row[12] = "0805";
/// let records = vec![row];
///
/// let engine = QueryEngine::builtin();
/// let query = Query::new().field("Value", "10k<11k").contains("Casecode", "08");
/// let found = engine.filter(Category::Resistor, &records, &query).unwrap();
///
/// assert_eq!(found.matches.len(), 1);
/// assert!(found.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    registry: SchemaRegistry,
}

impl QueryEngine {
    /// Creates an engine over the given schemas.
    pub fn new(registry: SchemaRegistry) -> Self {
        QueryEngine { registry }
    }

    /// Creates an engine over [`SchemaRegistry::builtin`].
    pub fn builtin() -> Self {
        QueryEngine::new(SchemaRegistry::builtin())
    }

    /// The schemas this engine resolves categories with.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Compiles `query` for `category`.
    ///
    /// # Errors
    ///
    /// [`SieveError::InvalidCategory`] if the category has no schema, and
    /// [`SieveError::UnknownField`] as for [`SearchPlan::compile`].
    pub fn plan(&self, category: Category, query: &Query) -> Result<SearchPlan<'_>> {
        SearchPlan::compile(self.registry.get(category)?, query)
    }

    /// Filters `records` of `category` by `query`.
    pub fn filter<'r, R: Record>(
        &self,
        category: Category,
        records: &'r [R],
        query: &Query,
    ) -> Result<FilterOutcome<'r, R>> {
        self.plan(category, query)?.filter(records)
    }
}
