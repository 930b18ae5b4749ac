//! Ruleset types and structures.
//!
//! A [`Ruleset`] is the declarative description of a record type: an ordered
//! list of [`FieldRule`]s, each holding an ordered list of constraints with
//! the message to report when that constraint fails.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FieldValue;

/// Validation rules for one record type.
///
/// Field order is declaration order, and evaluation follows it.
///
/// # Example
///
/// ```rust
/// use rules_core::{ConstraintKind, FieldRule, RuleConstraint, Ruleset};
///
/// let ruleset = Ruleset {
///     name: "borrow_book".to_string(),
///     version: "1.0.0".to_string(),
///     description: None,
///     fields: vec![FieldRule {
///         name: "Book_Frequency".to_string(),
///         description: None,
///         constraints: vec![RuleConstraint::new(ConstraintKind::Range { min: 1, max: 1000 })],
///     }],
/// };
/// assert_eq!(ruleset.field("Book_Frequency").map(|f| f.constraints.len()), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Name of the record type these rules apply to
    pub name: String,

    /// Semantic version of the ruleset
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Field rules in declaration order
    #[serde(default)]
    pub fields: Vec<FieldRule>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Ruleset {
    /// Looks up the rule for a field.
    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Total number of constraints across all fields.
    pub fn constraint_count(&self) -> usize {
        self.fields.iter().map(|f| f.constraints.len()).sum()
    }

    /// Names of the custom predicates the ruleset refers to, in order of
    /// first use.
    pub fn custom_predicates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for constraint in self.fields.iter().flat_map(|f| &f.constraints) {
            if let ConstraintKind::Custom { name } = &constraint.kind {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// The constraints declared for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Field name as it appears in the record
    pub name: String,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Constraints in evaluation order
    #[serde(default)]
    pub constraints: Vec<RuleConstraint>,
}

impl FieldRule {
    /// Returns true if the field carries a `required` constraint.
    ///
    /// Fields without one are only checked when their value is non-empty.
    pub fn is_required(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ConstraintKind::Required))
    }
}

/// A constraint together with the message reported when it fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConstraint {
    /// What the constraint checks
    #[serde(flatten)]
    pub kind: ConstraintKind,

    /// Message reported on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleConstraint {
    /// Creates a constraint reporting the default message.
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a constraint reporting `message` on failure.
    pub fn with_message(kind: ConstraintKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Resolves the message to report when `value` of `field` fails this
    /// constraint.
    pub fn failure_message(&self, field: &str, value: &FieldValue) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!("{}: {} does not validate as {}", field, value, self.kind),
        }
    }
}

/// The closed set of constraint kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConstraintKind {
    /// Value must not be the zero value of its type
    Required,

    /// Timestamp must lie within the tolerance window around now
    Present,

    /// Timestamp must not be later than now plus the tolerance
    Past,

    /// Timestamp must not be earlier than now minus the tolerance
    Future,

    /// Number must lie within the closed interval
    Range {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Named predicate supplied by the evaluator's registry
    Custom {
        /// Registered predicate name
        name: String,
    },
}

impl ConstraintKind {
    /// Returns true for the kinds evaluated against a timestamp.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ConstraintKind::Present | ConstraintKind::Past | ConstraintKind::Future
        )
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Required => write!(f, "required"),
            ConstraintKind::Present => write!(f, "present"),
            ConstraintKind::Past => write!(f, "past"),
            ConstraintKind::Future => write!(f, "future"),
            ConstraintKind::Range { min, max } => write!(f, "range({}|{})", min, max),
            ConstraintKind::Custom { name } => write!(f, "{}", name),
        }
    }
}
