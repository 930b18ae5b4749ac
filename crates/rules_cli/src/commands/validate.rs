use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rules_core::{Record, ValidationContext};
use rules_parser::parse_file;
use rules_validator::RuleEvaluator;
use std::path::Path;
use tracing::{debug, info};

use crate::output;

/// Options for one `validate` invocation.
pub struct ValidateArgs<'a> {
    pub ruleset: &'a str,
    pub record: &'a str,
    pub now: Option<&'a str>,
    pub tolerance_secs: Option<i64>,
    pub all: bool,
    pub format: &'a str,
}

pub fn execute(args: ValidateArgs<'_>) -> Result<()> {
    info!("Validating record {} against {}", args.record, args.ruleset);

    let ruleset = parse_file(Path::new(args.ruleset))
        .with_context(|| format!("Failed to parse ruleset file: {}", args.ruleset))?;

    let content = std::fs::read_to_string(args.record)
        .with_context(|| format!("Failed to read record file: {}", args.record))?;
    let record = Record::from_json_str(&content)
        .with_context(|| format!("Failed to parse record file: {}", args.record))?;

    let context = build_context(&args)?;
    debug!("Validation context: {:?}", context);

    let evaluator = RuleEvaluator::new();
    for error in evaluator.check_definition(&ruleset) {
        output::print_warning(&error.to_string());
    }

    if args.format != "json" {
        output::print_info(&format!(
            "Ruleset loaded: {} v{} ({} fields)",
            ruleset.name,
            ruleset.version,
            ruleset.fields.len()
        ));
    }

    let report = evaluator.validate_with_context(&record, &ruleset, &context);
    output::print_validation_report(&report, args.format);

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

fn build_context(args: &ValidateArgs<'_>) -> Result<ValidationContext> {
    let mut context = ValidationContext::new().with_collect_all(args.all);

    if let Some(raw) = args.now {
        context = context.with_now(parse_instant(raw)?);
    }

    if let Some(secs) = args.tolerance_secs {
        anyhow::ensure!(secs >= 0, "Tolerance must not be negative, got {}", secs);
        let tolerance = Duration::try_seconds(secs)
            .with_context(|| format!("Tolerance of {} seconds is out of range", secs))?;
        context = context.with_tolerance(tolerance);
    }

    Ok(context)
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    let instant = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("Invalid --now value '{}', expected RFC 3339", raw))?;
    Ok(instant.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn args<'a>(now: Option<&'a str>, tolerance_secs: Option<i64>) -> ValidateArgs<'a> {
        ValidateArgs {
            ruleset: "rules.yml",
            record: "record.json",
            now,
            tolerance_secs,
            all: true,
            format: "text",
        }
    }

    #[test]
    fn test_build_context() {
        let context = build_context(&args(Some("2024-03-01T17:00:00+07:00"), Some(30))).unwrap();
        assert_eq!(
            context.now,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(context.tolerance, Duration::seconds(30));
        assert!(context.collect_all);
    }

    #[test]
    fn test_build_context_rejects_bad_input() {
        assert!(build_context(&args(Some("yesterday"), None)).is_err());
        assert!(build_context(&args(None, Some(-1))).is_err());
        assert!(build_context(&args(None, Some(i64::MAX))).is_err());
    }

    #[test]
    fn test_build_context_large_tolerance() {
        let context = build_context(&args(None, Some(100_000_000_000_000))).unwrap();
        assert_eq!(context.tolerance, Duration::seconds(100_000_000_000_000));
    }
}
