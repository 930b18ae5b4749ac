//! Validation traits and types for rulesets.
//!
//! This module defines the trait implemented by record validators together
//! with the context and report types they exchange with callers.

use chrono::{DateTime, Duration, Utc};

use crate::{ConstraintViolation, Record, Ruleset, ToRecord};

/// Slack applied to temporal constraints, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 120;

/// Result type for validation operations.
pub type ValidationResult<T = ()> = std::result::Result<T, ConstraintViolation>;

/// Core trait for validating records against a ruleset.
///
/// Implementations must be pure: the outcome depends only on the record, the
/// ruleset and `now`.
///
/// # Example
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use rules_core::{Record, RecordValidator, Ruleset, ValidationResult};
///
/// struct AcceptAll;
///
/// impl RecordValidator for AcceptAll {
///     fn validate(&self, _record: &Record, _ruleset: &Ruleset, _now: DateTime<Utc>) -> ValidationResult {
///         Ok(())
///     }
/// }
/// ```
pub trait RecordValidator: Send + Sync {
    /// Validates `record` at the instant `now`.
    ///
    /// Returns the first failing constraint in declaration order.
    fn validate(&self, record: &Record, ruleset: &Ruleset, now: DateTime<Utc>) -> ValidationResult;

    /// Validates `record` against the wall clock.
    fn validate_now(&self, record: &Record, ruleset: &Ruleset) -> ValidationResult {
        self.validate(record, ruleset, Utc::now())
    }

    /// Validates a host value through its record snapshot.
    fn validate_entity<T: ToRecord + ?Sized>(
        &self,
        entity: &T,
        ruleset: &Ruleset,
        now: DateTime<Utc>,
    ) -> ValidationResult
    where
        Self: Sized,
    {
        self.validate(&entity.to_record(), ruleset, now)
    }
}

/// Options for a validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationContext {
    /// Evaluation instant; the wall clock is read when unset
    pub now: Option<DateTime<Utc>>,

    /// Slack applied to temporal constraints
    pub tolerance: Duration,

    /// Report every failing field instead of stopping at the first
    pub collect_all: bool,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self {
            now: None,
            tolerance: Duration::seconds(DEFAULT_TOLERANCE_SECS),
            collect_all: false,
        }
    }
}

impl ValidationContext {
    /// Creates a new validation context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the evaluation instant.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Sets the temporal tolerance.
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets whether all failing fields are reported.
    pub fn with_collect_all(mut self, collect_all: bool) -> Self {
        self.collect_all = collect_all;
        self
    }

    /// Returns the pinned instant, or reads the wall clock.
    pub fn resolve_now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

/// Report of validation results.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Whether every constraint passed
    pub passed: bool,

    /// Failing constraints in declaration order
    pub violations: Vec<ConstraintViolation>,

    /// Evaluation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationStats {
    /// Number of fields whose constraints were evaluated
    pub fields_checked: usize,

    /// Number of fields skipped because they were empty and optional
    pub fields_skipped: usize,

    /// Number of constraints evaluated
    pub constraints_evaluated: usize,
}

impl ValidationReport {
    /// Creates a report from collected violations.
    pub fn from_violations(violations: Vec<ConstraintViolation>, stats: ValidationStats) -> Self {
        Self {
            passed: violations.is_empty(),
            violations,
            stats,
        }
    }

    /// Message of the first violation, if any.
    pub fn message(&self) -> Option<&str> {
        self.violations.first().map(|v| v.message.as_str())
    }

    /// Converts the report into the first-violation result.
    pub fn into_result(self) -> ValidationResult {
        match self.violations.into_iter().next() {
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

    #[test]
    fn test_context_defaults() {
        let context = ValidationContext::new();
        assert_eq!(context.now, None);
        assert_eq!(context.tolerance, Duration::minutes(2));
        assert!(!context.collect_all);
    }

    #[test]
    fn test_context_pinned_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let context = ValidationContext::new()
            .with_now(now)
            .with_tolerance(Duration::seconds(30))
            .with_collect_all(true);

        assert_eq!(context.resolve_now(), now);
        assert_eq!(context.tolerance, Duration::seconds(30));
        assert!(context.collect_all);
    }

    #[test]
    fn test_report_first_message() {
        let report = ValidationReport::from_violations(
            vec![
                ConstraintViolation::new("a", "required", "first"),
                ConstraintViolation::new("b", "required", "second"),
            ],
            ValidationStats::default(),
        );
        assert!(!report.passed);
        assert_eq!(report.message(), Some("first"));
        assert_eq!(report.into_result().unwrap_err().message, "first");

        let report = ValidationReport::from_violations(Vec::new(), ValidationStats::default());
        assert!(report.passed);
        assert_eq!(report.message(), None);
        assert_eq!(report.into_result(), Ok(()));
    }
}
