//! Builder pattern for creating rulesets.
//!
//! This module provides ergonomic builders for constructing rulesets and
//! their field rules with a fluent API.

use crate::{ConstraintKind, FieldRule, RuleConstraint, Ruleset};

/// Builder for creating a `Ruleset`.
///
/// # Example
///
/// ```rust
/// use rules_core::{FieldRuleBuilder, RulesetBuilder};
///
/// let ruleset = RulesetBuilder::new("borrow_book")
///     .description("Library loan record")
///     .field(
///         FieldRuleBuilder::new("Book_Frequency")
///             .required("Book frequency must be between 1 and 1000")
///             .range(1, 1000, "Book frequency must be between 1 and 1000")
///             .build(),
///     )
///     .build();
///
/// assert_eq!(ruleset.version, "1.0.0");
/// assert_eq!(ruleset.constraint_count(), 2);
/// ```
#[derive(Debug)]
pub struct RulesetBuilder {
    name: String,
    version: String,
    description: Option<String>,
    fields: Vec<FieldRule>,
}

impl RulesetBuilder {
    /// Creates a new ruleset builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: "1.0.0".to_string(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Sets the ruleset version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the ruleset description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field rule.
    pub fn field(mut self, field: FieldRule) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends multiple field rules.
    pub fn fields(mut self, fields: Vec<FieldRule>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Builds the ruleset.
    pub fn build(self) -> Ruleset {
        Ruleset {
            name: self.name,
            version: self.version,
            description: self.description,
            fields: self.fields,
        }
    }
}

/// Builder for creating a `FieldRule`.
///
/// Constraints are evaluated in the order they are added.
///
/// # Example
///
/// ```rust
/// use rules_core::{ConstraintKind, FieldRuleBuilder};
///
/// let rule = FieldRuleBuilder::new("Borb_Day")
///     .required("Borrow day must be today")
///     .present("Borrow day must be today")
///     .build();
///
/// assert!(rule.is_required());
/// assert_eq!(rule.constraints[1].kind, ConstraintKind::Present);
/// ```
#[derive(Debug)]
pub struct FieldRuleBuilder {
    name: String,
    description: Option<String>,
    constraints: Vec<RuleConstraint>,
}

impl FieldRuleBuilder {
    /// Creates a new field rule builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            constraints: Vec::new(),
        }
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a constraint.
    pub fn constraint(mut self, constraint: RuleConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a `required` constraint.
    pub fn required(self, message: impl Into<String>) -> Self {
        self.constraint(RuleConstraint::with_message(ConstraintKind::Required, message))
    }

    /// Adds a `present` constraint.
    pub fn present(self, message: impl Into<String>) -> Self {
        self.constraint(RuleConstraint::with_message(ConstraintKind::Present, message))
    }

    /// Adds a `past` constraint.
    pub fn past(self, message: impl Into<String>) -> Self {
        self.constraint(RuleConstraint::with_message(ConstraintKind::Past, message))
    }

    /// Adds a `future` constraint.
    pub fn future(self, message: impl Into<String>) -> Self {
        self.constraint(RuleConstraint::with_message(ConstraintKind::Future, message))
    }

    /// Adds an inclusive `range` constraint.
    pub fn range(self, min: i64, max: i64, message: impl Into<String>) -> Self {
        self.constraint(RuleConstraint::with_message(
            ConstraintKind::Range { min, max },
            message,
        ))
    }

    /// Adds a constraint backed by a named custom predicate.
    pub fn custom(self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.constraint(RuleConstraint::with_message(
            ConstraintKind::Custom { name: name.into() },
            message,
        ))
    }

    /// Builds the field rule.
    pub fn build(self) -> FieldRule {
        FieldRule {
            name: self.name,
            description: self.description,
            constraints: self.constraints,
        }
    }
}
