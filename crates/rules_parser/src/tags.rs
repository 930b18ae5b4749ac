//! Compact tag syntax for field constraints.
//!
//! A tag string is a comma-separated list of entries, each of the form
//! `name[(args)][~message]`:
//!
//! ```text
//! required~Book frequency must be between 1 and 1000, range(1|1000)~Book frequency must be between 1 and 1000
//! ```
//!
//! `required`, `present`, `past`, `future` and `range` are matched without
//! regard to case; any other name becomes a custom predicate reference with
//! its case preserved. Messages cannot contain commas.

use crate::{ParserError, Result};
use rules_core::{ConstraintKind, FieldRule, RuleConstraint};

/// Parses a tag string into constraints, in order.
///
/// # Example
///
/// ```rust
/// use rules_core::ConstraintKind;
/// use rules_parser::parse_tags;
///
/// let constraints = parse_tags("required~need a day, Present~day must be today").unwrap();
/// assert_eq!(constraints[1].kind, ConstraintKind::Present);
/// assert_eq!(constraints[1].message.as_deref(), Some("day must be today"));
/// ```
pub fn parse_tags(tags: &str) -> Result<Vec<RuleConstraint>> {
    if tags.trim().is_empty() {
        return Ok(Vec::new());
    }

    tags.split(',').map(parse_entry).collect()
}

/// Builds a field rule from a field name and its tag string.
pub fn parse_field_tags(name: impl Into<String>, tags: &str) -> Result<FieldRule> {
    Ok(FieldRule {
        name: name.into(),
        description: None,
        constraints: parse_tags(tags)?,
    })
}

fn parse_entry(entry: &str) -> Result<RuleConstraint> {
    let (spec, message) = match entry.split_once('~') {
        Some((spec, message)) => (spec.trim(), Some(message.trim())),
        None => (entry.trim(), None),
    };

    if spec.is_empty() {
        return Err(ParserError::invalid_tag(entry, "empty constraint name"));
    }

    let (name, args) = split_args(spec)?;
    let kind = match name.to_ascii_lowercase().as_str() {
        "required" => no_args(ConstraintKind::Required, spec, args)?,
        "present" => no_args(ConstraintKind::Present, spec, args)?,
        "past" => no_args(ConstraintKind::Past, spec, args)?,
        "future" => no_args(ConstraintKind::Future, spec, args)?,
        "range" => parse_range(spec, args)?,
        _ => no_args(
            ConstraintKind::Custom {
                name: name.to_string(),
            },
            spec,
            args,
        )?,
    };

    Ok(RuleConstraint {
        kind,
        message: message.filter(|m| !m.is_empty()).map(str::to_string),
    })
}

/// Splits `name(args)` into its parts.
fn split_args(spec: &str) -> Result<(&str, Option<&str>)> {
    let Some((name, rest)) = spec.split_once('(') else {
        return Ok((spec, None));
    };

    let args = rest
        .strip_suffix(')')
        .ok_or_else(|| ParserError::invalid_tag(spec, "missing closing parenthesis"))?;

    Ok((name.trim(), Some(args.trim())))
}

fn no_args(kind: ConstraintKind, spec: &str, args: Option<&str>) -> Result<ConstraintKind> {
    match args {
        None => Ok(kind),
        Some(_) => Err(ParserError::invalid_tag(
            spec,
            format!("'{}' takes no arguments", kind),
        )),
    }
}

fn parse_range(spec: &str, args: Option<&str>) -> Result<ConstraintKind> {
    let args = args.ok_or_else(|| ParserError::invalid_tag(spec, "range needs (min|max)"))?;

    let (min, max) = args
        .split_once('|')
        .ok_or_else(|| ParserError::invalid_tag(spec, "range bounds must be separated by '|'"))?;

    let bound = |raw: &str| {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| ParserError::invalid_tag(spec, format!("'{}' is not an integer", raw.trim())))
    };

    Ok(ConstraintKind::Range {
        min: bound(min)?,
        max: bound(max)?,
    })
}
