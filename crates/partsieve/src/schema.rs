//! Category schemas: which column of a record holds which parameter.
//!
//! Every component category has its own field list. The order of a
//! [`CategorySchema`]'s fields is the order in which query fields are
//! evaluated. A [`SchemaRegistry`] holds one schema per category and is
//! built once, validated, and then only read.
//!
//! Schemas can come from [`SchemaRegistry::builtin`] or from a document
//! supplied by the data layer:
//!
//! ```
//! use partsieve::{Category, SchemaRegistry};
//!
//! let yaml = r#"
//! resistor:
//!   - name: Value
//!     column: 1
//!     example: "10.2k"
//!   - name: Casecode
//!     column: 12
//! "#;
//!
//! let registry = SchemaRegistry::from_yaml(yaml).unwrap();
//! let schema = registry.get(Category::Resistor).unwrap();
//! assert_eq!(schema.field("Casecode").unwrap().column, 12);
//! assert!(registry.get(Category::Capacitor).is_err());
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// Component category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Resistor,
    Capacitor,
    Ic,
    Connector,
}

impl Category {
    /// All categories, in catalog order.
    pub const ALL: [Category; 4] = [
        Category::Resistor,
        Category::Capacitor,
        Category::Ic,
        Category::Connector,
    ];

    /// Returns the lowercase tag of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Resistor => "resistor",
            Category::Capacitor => "capacitor",
            Category::Ic => "ic",
            Category::Connector => "connector",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = SieveError;

    /// Parses a category tag, ignoring case and a plural `s`.
    fn from_str(s: &str) -> Result<Self> {
        let tag = s.trim().to_ascii_lowercase();
        let singular = tag.strip_suffix('s').unwrap_or(&tag);
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == tag || c.as_str() == singular)
            .ok_or_else(|| SieveError::InvalidCategory(s.to_string()))
    }
}

/// One queryable parameter of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as shown next to the entry box.
    pub name: String,
    /// Position of the parameter within a record.
    pub column: usize,
    /// Sample input shown as a hint, e.g. `"10.2k"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl FieldSpec {
    /// Creates a field without an example hint.
    pub fn new(name: impl Into<String>, column: usize) -> Self {
        FieldSpec {
            name: name.into(),
            column,
            example: None,
        }
    }

    /// Sets the example hint.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// Ordered field list of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySchema {
    category: Category,
    fields: Vec<FieldSpec>,
}

impl CategorySchema {
    /// Creates a schema, rejecting empty or duplicate field names.
    pub fn new(category: Category, fields: Vec<FieldSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(SieveError::InvalidSchema(format!(
                    "{category} has a field with an empty name"
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SieveError::InvalidSchema(format!(
                    "{category} defines field '{}' more than once",
                    field.name
                )));
            }
        }
        Ok(CategorySchema { category, fields })
    }

    /// The category this schema describes.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Fields in evaluation order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Smallest record length that covers every column of this schema.
    pub fn min_record_len(&self) -> usize {
        self.fields.iter().map(|f| f.column + 1).max().unwrap_or(0)
    }
}

/// Schemas for all categories known to a session.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<Category, CategorySchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        SchemaRegistry::default()
    }

    /// Registry describing the standard parts-database layout.
    pub fn builtin() -> Self {
        let tables = [
            (
                Category::Resistor,
                vec![
                    FieldSpec::new("Value", 1).with_example("10.2k"),
                    FieldSpec::new("Casecode", 12).with_example("0805"),
                    FieldSpec::new("Powerrating", 7).with_example("0.125"),
                    FieldSpec::new("Voltage", 8).with_example("50"),
                    FieldSpec::new("Tolerance", 9).with_example("0.1"),
                ],
            ),
            (
                Category::Capacitor,
                vec![
                    FieldSpec::new("Value", 1).with_example("100p"),
                    FieldSpec::new("Casecode", 12).with_example("0805"),
                    FieldSpec::new("Voltage", 7).with_example("50V"),
                    FieldSpec::new("Tolerance", 9).with_example("0.1"),
                ],
            ),
            (
                Category::Ic,
                vec![
                    FieldSpec::new("Description", 10),
                    FieldSpec::new("Casecode", 12),
                    FieldSpec::new("MPN", 13),
                ],
            ),
            (
                Category::Connector,
                vec![
                    FieldSpec::new("contacts", 8),
                    FieldSpec::new("Gender", 7),
                    FieldSpec::new("Current", 9),
                    FieldSpec::new("Package Type", 11),
                ],
            ),
        ];

        let schemas = tables
            .into_iter()
            .map(|(category, fields)| (category, CategorySchema { category, fields }))
            .collect();
        SchemaRegistry { schemas }
    }

    /// Adds or replaces the schema of its category.
    pub fn insert(&mut self, schema: CategorySchema) -> Option<CategorySchema> {
        self.schemas.insert(schema.category, schema)
    }

    /// Returns the schema for `category`.
    ///
    /// # Errors
    ///
    /// [`SieveError::InvalidCategory`] if the category has no schema.
    pub fn get(&self, category: Category) -> Result<&CategorySchema> {
        self.schemas
            .get(&category)
            .ok_or_else(|| SieveError::InvalidCategory(category.to_string()))
    }

    /// Categories with a registered schema.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.schemas.keys().copied()
    }

    /// Builds a registry from a JSON object of category tag to field list.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: BTreeMap<Category, Vec<FieldSpec>> = serde_json::from_str(json)?;
        Self::from_tables(tables)
    }

    /// Builds a registry from a YAML mapping of category tag to field list.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let tables: BTreeMap<Category, Vec<FieldSpec>> = serde_yaml::from_str(yaml)?;
        Self::from_tables(tables)
    }

    /// Serializes the registry as JSON in the shape [`from_json`](Self::from_json) reads.
    pub fn to_json(&self) -> Result<String> {
        let tables: BTreeMap<Category, &[FieldSpec]> = self
            .schemas
            .iter()
            .map(|(category, schema)| (*category, schema.fields()))
            .collect();
        Ok(serde_json::to_string_pretty(&tables)?)
    }

    fn from_tables(tables: BTreeMap<Category, Vec<FieldSpec>>) -> Result<Self> {
        let mut registry = SchemaRegistry::new();
        for (category, fields) in tables {
            registry.insert(CategorySchema::new(category, fields)?);
        }
        Ok(registry)
    }
}
