//! Error types for rulesets and records.
//!
//! A failed validation is not an exceptional condition: it is returned to the
//! caller as a [`ConstraintViolation`] value carrying the message configured
//! for the constraint that failed.

use thiserror::Error;

/// The first (or, when collecting, each) constraint a record failed.
///
/// Displays as exactly the configured message, so it can be surfaced to end
/// users unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    /// Field the failing constraint is attached to
    pub field: String,
    /// Constraint kind that failed (e.g. "present", "range(1|1000)")
    pub constraint: String,
    /// Human-readable message
    pub message: String,
}

impl ConstraintViolation {
    /// Creates a new constraint violation.
    pub fn new(
        field: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while building a record from external data.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Top-level JSON value is not an object
    #[error("Record must be a JSON object")]
    NotAnObject,

    /// Field holds a value with no scalar representation
    #[error("Field '{field}' holds an unsupported value (arrays and objects are not allowed)")]
    UnsupportedValue {
        /// Field name
        field: String,
    },

    /// JSON syntax error
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}
