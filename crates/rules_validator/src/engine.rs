//! Main validation engine.
//!
//! This module provides the [`RuleEvaluator`], which walks a ruleset in
//! declaration order and checks each constraint against the record.

use crate::constraints::satisfies;
use crate::{DefinitionError, PredicateContext, PredicateRegistry};
use chrono::{DateTime, Duration, Utc};
use rules_core::{
    ConstraintKind, ConstraintViolation, Record, RecordValidator, Ruleset, ValidationContext,
    ValidationReport, ValidationResult, ValidationStats, DEFAULT_TOLERANCE_SECS,
};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Rule evaluator for records.
///
/// Evaluation is pure: it reads the record, the ruleset and the instant it is
/// given, and mutates nothing, so one evaluator can be shared across threads.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use rules_core::{FieldRuleBuilder, Record, RecordValidator, RulesetBuilder};
/// use rules_validator::RuleEvaluator;
///
/// let ruleset = RulesetBuilder::new("borrow_book")
///     .field(
///         FieldRuleBuilder::new("Borb_Day")
///             .required("Borrow day must be today")
///             .present("Borrow day must be today")
///             .build(),
///     )
///     .build();
///
/// let now = Utc::now();
/// let evaluator = RuleEvaluator::new();
///
/// let record = Record::new().with("Borb_Day", now);
/// assert!(evaluator.validate(&record, &ruleset, now).is_ok());
///
/// let record = Record::new().with("Borb_Day", now + Duration::hours(24));
/// let violation = evaluator.validate(&record, &ruleset, now).unwrap_err();
/// assert_eq!(violation.to_string(), "Borrow day must be today");
/// ```
#[derive(Debug, Clone)]
pub struct RuleEvaluator {
    registry: PredicateRegistry,
}

impl RuleEvaluator {
    /// Creates an evaluator with the default predicates.
    pub fn new() -> Self {
        Self::with_registry(PredicateRegistry::with_defaults())
    }

    /// Creates an evaluator bound to `registry`.
    pub fn with_registry(registry: PredicateRegistry) -> Self {
        Self { registry }
    }

    /// The predicates available to `custom` constraints.
    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    /// Validates a record and returns a full report.
    ///
    /// Without `collect_all` the report holds at most the first violation.
    /// With it, every failing field contributes its first failing constraint.
    pub fn validate_with_context(
        &self,
        record: &Record,
        ruleset: &Ruleset,
        context: &ValidationContext,
    ) -> ValidationReport {
        let ctx = PredicateContext {
            now: context.resolve_now(),
            tolerance: context.tolerance,
        };
        let mut stats = ValidationStats::default();
        let violations = self.evaluate(record, ruleset, &ctx, context.collect_all, &mut stats);

        ValidationReport::from_violations(violations, stats)
    }

    /// Walks the ruleset and collects violations.
    fn evaluate(
        &self,
        record: &Record,
        ruleset: &Ruleset,
        ctx: &PredicateContext,
        collect_all: bool,
        stats: &mut ValidationStats,
    ) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        for rule in &ruleset.fields {
            let value = record.value(&rule.name);

            // Optional fields are only checked once they hold a value
            if value.is_empty() && !rule.is_required() {
                debug!("Skipping empty optional field '{}'", rule.name);
                stats.fields_skipped += 1;
                continue;
            }

            debug!(
                "Checking field '{}' ({} constraints)",
                rule.name,
                rule.constraints.len()
            );
            stats.fields_checked += 1;

            for constraint in &rule.constraints {
                stats.constraints_evaluated += 1;
                let passed = satisfies(&constraint.kind, value, ctx, &self.registry);
                trace!(
                    "Field '{}' {} -> {}",
                    rule.name,
                    constraint.kind,
                    if passed { "pass" } else { "fail" }
                );

                if !passed {
                    violations.push(ConstraintViolation::new(
                        &rule.name,
                        constraint.kind.to_string(),
                        constraint.failure_message(&rule.name, value),
                    ));
                    if !collect_all {
                        return violations;
                    }
                    break;
                }
            }
        }

        violations
    }

    /// Checks that a ruleset is well-formed for this evaluator.
    ///
    /// Useful before validating records: a ruleset with an unknown predicate
    /// fails every record that sets the field.
    pub fn check_definition(&self, ruleset: &Ruleset) -> Vec<DefinitionError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for rule in &ruleset.fields {
            if !seen.insert(rule.name.as_str()) {
                errors.push(DefinitionError::DuplicateField(rule.name.clone()));
            }

            if rule.constraints.is_empty() {
                errors.push(DefinitionError::EmptyField(rule.name.clone()));
            }

            for constraint in &rule.constraints {
                match &constraint.kind {
                    ConstraintKind::Range { min, max } if min > max => {
                        errors.push(DefinitionError::invalid_range(&rule.name, *min, *max));
                    }
                    ConstraintKind::Custom { name } if !self.registry.contains(name) => {
                        errors.push(DefinitionError::unknown_predicate(&rule.name, name));
                    }
                    _ => {}
                }
            }
        }

        errors
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordValidator for RuleEvaluator {
    fn validate(&self, record: &Record, ruleset: &Ruleset, now: DateTime<Utc>) -> ValidationResult {
        let ctx = PredicateContext {
            now,
            tolerance: Duration::seconds(DEFAULT_TOLERANCE_SECS),
        };
        let mut stats = ValidationStats::default();

        match self.evaluate(record, ruleset, &ctx, false, &mut stats).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rules_core::{FieldRuleBuilder, RulesetBuilder};

    const RANGE_MSG: &str = "Book frequency must be between 1 and 1000";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    fn ruleset() -> Ruleset {
        RulesetBuilder::new("loan")
            .field(
                FieldRuleBuilder::new("Borb_Day")
                    .required("borrow day missing")
                    .present("borrow day must be today")
                    .build(),
            )
            .field(
                FieldRuleBuilder::new("Book_Frequency")
                    .required(RANGE_MSG)
                    .range(1, 1000, RANGE_MSG)
                    .build(),
            )
            .field(
                FieldRuleBuilder::new("Color_Bar")
                    .custom("letters_only", "color must be letters")
                    .build(),
            )
            .build()
    }

    fn valid_record() -> Record {
        Record::new()
            .with("Borb_Day", now())
            .with("Book_Frequency", 1)
            .with("Color_Bar", "red")
    }

    #[test]
    fn test_valid_record() {
        let evaluator = RuleEvaluator::new();
        assert_eq!(evaluator.validate(&valid_record(), &ruleset(), now()), Ok(()));
    }

    #[test]
    fn test_first_failure_wins() {
        let record = valid_record()
            .with("Borb_Day", now() + Duration::hours(24))
            .with("Book_Frequency", 1001);

        let violation = RuleEvaluator::new()
            .validate(&record, &ruleset(), now())
            .unwrap_err();
        assert_eq!(violation.field, "Borb_Day");
        assert_eq!(violation.constraint, "present");
        assert_eq!(violation.message, "borrow day must be today");
    }

    #[test]
    fn test_required_checked_before_later_constraints() {
        let record = Record::new().with("Book_Frequency", 1).with("Color_Bar", "red");

        let violation = RuleEvaluator::new()
            .validate(&record, &ruleset(), now())
            .unwrap_err();
        assert_eq!(violation.constraint, "required");
        assert_eq!(violation.message, "borrow day missing");
    }

    #[test]
    fn test_zero_frequency_fails_required_with_range_message() {
        let record = valid_record().with("Book_Frequency", 0);

        let violation = RuleEvaluator::new()
            .validate(&record, &ruleset(), now())
            .unwrap_err();
        assert_eq!(violation.constraint, "required");
        assert_eq!(violation.message, RANGE_MSG);
    }

    #[test]
    fn test_empty_optional_field_skipped() {
        let record = valid_record().with("Color_Bar", "");
        let evaluator = RuleEvaluator::new();
        assert_eq!(evaluator.validate(&record, &ruleset(), now()), Ok(()));

        let report = evaluator.validate_with_context(
            &record,
            &ruleset(),
            &ValidationContext::new().with_now(now()),
        );
        assert_eq!(report.stats.fields_skipped, 1);
        assert_eq!(report.stats.fields_checked, 2);
        assert_eq!(report.stats.constraints_evaluated, 4);
    }

    #[test]
    fn test_set_optional_field_checked() {
        let record = valid_record().with("Color_Bar", "*฿");
        let violation = RuleEvaluator::new()
            .validate(&record, &ruleset(), now())
            .unwrap_err();
        assert_eq!(violation.message, "color must be letters");
    }

    #[test]
    fn test_collect_all() {
        let record = Record::new()
            .with("Borb_Day", now() - Duration::hours(24))
            .with("Book_Frequency", -1)
            .with("Color_Bar", "*฿");
        let context = ValidationContext::new().with_now(now()).with_collect_all(true);

        let report = RuleEvaluator::new().validate_with_context(&record, &ruleset(), &context);
        assert!(!report.passed);
        let messages: Vec<&str> = report.violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["borrow day must be today", RANGE_MSG, "color must be letters"]
        );
        assert_eq!(report.message(), Some("borrow day must be today"));
    }

    #[test]
    fn test_context_first_only_by_default() {
        let record = Record::new();
        let report = RuleEvaluator::new().validate_with_context(
            &record,
            &ruleset(),
            &ValidationContext::new().with_now(now()),
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.stats.fields_checked, 1);
    }

    #[test]
    fn test_context_tolerance() {
        let record = valid_record().with("Borb_Day", now() + Duration::minutes(5));
        let evaluator = RuleEvaluator::new();

        let strict = ValidationContext::new().with_now(now());
        assert!(!evaluator.validate_with_context(&record, &ruleset(), &strict).passed);

        let relaxed = strict.with_tolerance(Duration::minutes(10));
        assert!(evaluator.validate_with_context(&record, &ruleset(), &relaxed).passed);
    }

    #[test]
    fn test_huge_tolerance_does_not_panic() {
        let record = valid_record().with("Borb_Day", now() - Duration::days(36_500));
        let context = ValidationContext::new()
            .with_now(now())
            .with_tolerance(Duration::seconds(100_000_000_000_000));

        let report = RuleEvaluator::new().validate_with_context(&record, &ruleset(), &context);
        assert!(report.passed);
    }

    #[test]
    fn test_unknown_predicate_fails() {
        let evaluator = RuleEvaluator::with_registry(PredicateRegistry::new());
        let violation = evaluator
            .validate(&valid_record(), &ruleset(), now())
            .unwrap_err();
        assert_eq!(violation.field, "Color_Bar");
        assert_eq!(violation.constraint, "letters_only");
    }

    #[test]
    fn test_default_message() {
        let ruleset = RulesetBuilder::new("loan")
            .field(
                FieldRuleBuilder::new("Book_Frequency")
                    .constraint(rules_core::RuleConstraint::new(ConstraintKind::Range {
                        min: 1,
                        max: 1000,
                    }))
                    .build(),
            )
            .build();
        let record = Record::new().with("Book_Frequency", 1001);

        let violation = RuleEvaluator::new()
            .validate(&record, &ruleset, now())
            .unwrap_err();
        assert_eq!(
            violation.message,
            "Book_Frequency: 1001 does not validate as range(1|1000)"
        );
    }

    #[test]
    fn test_check_definition() {
        let broken = RulesetBuilder::new("broken")
            .field(FieldRuleBuilder::new("a").range(10, 1, "inverted").build())
            .field(FieldRuleBuilder::new("a").custom("nope", "unknown").build())
            .field(FieldRuleBuilder::new("b").build())
            .build();

        let errors = RuleEvaluator::new().check_definition(&broken);
        assert_eq!(
            errors,
            vec![
                DefinitionError::invalid_range("a", 10, 1),
                DefinitionError::DuplicateField("a".to_string()),
                DefinitionError::unknown_predicate("a", "nope"),
                DefinitionError::EmptyField("b".to_string()),
            ]
        );

        assert!(RuleEvaluator::new().check_definition(&ruleset()).is_empty());
    }
}
