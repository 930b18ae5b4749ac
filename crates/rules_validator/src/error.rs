//! Error types for evaluator setup and ruleset checks.

use thiserror::Error;

/// Defects in a ruleset definition, found before any record is validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Two rules share a field name
    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    /// Rule declares no constraints
    #[error("Field '{0}' declares no constraints")]
    EmptyField(String),

    /// Range bounds are inverted
    #[error("Invalid range for field '{field}': min {min} is greater than max {max}")]
    InvalidRange { field: String, min: i64, max: i64 },

    /// Custom constraint names a predicate the evaluator does not know
    #[error("Field '{field}' uses unknown predicate '{name}'")]
    UnknownPredicate { field: String, name: String },
}

impl DefinitionError {
    /// Creates a new unknown predicate error.
    pub fn unknown_predicate(field: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownPredicate {
            field: field.into(),
            name: name.into(),
        }
    }

    /// Creates a new invalid range error.
    pub fn invalid_range(field: impl Into<String>, min: i64, max: i64) -> Self {
        Self::InvalidRange {
            field: field.into(),
            min,
            max,
        }
    }
}

/// Errors raised while registering custom predicates.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Invalid regex pattern
    #[error("Invalid regex pattern for predicate '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// Name collides with a built-in constraint kind
    #[error("Predicate name '{0}' is reserved for a built-in constraint")]
    ReservedName(String),
}
