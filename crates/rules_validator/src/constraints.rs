//! Constraint evaluation logic.
//!
//! This module decides whether a single field value satisfies a single
//! constraint:
//! - Required: value must not be the zero value of its type
//! - Present/Past/Future: timestamp must lie within the temporal window
//! - Range: number must lie within the inclusive bounds
//! - Custom: named predicate from the registry must accept the value
//!
//! A constraint applied to a value of the wrong type fails.

use crate::temporal::{is_future, is_past, is_present};
use crate::{PredicateContext, PredicateRegistry};
use rules_core::{ConstraintKind, FieldValue};
use tracing::warn;

/// Evaluates one constraint against one value.
pub fn satisfies(
    kind: &ConstraintKind,
    value: &FieldValue,
    ctx: &PredicateContext,
    registry: &PredicateRegistry,
) -> bool {
    match kind {
        ConstraintKind::Required => !value.is_empty(),
        ConstraintKind::Present => value
            .as_timestamp()
            .is_some_and(|ts| is_present(ts, ctx.now, ctx.tolerance)),
        ConstraintKind::Past => value
            .as_timestamp()
            .is_some_and(|ts| is_past(ts, ctx.now, ctx.tolerance)),
        ConstraintKind::Future => value
            .as_timestamp()
            .is_some_and(|ts| is_future(ts, ctx.now, ctx.tolerance)),
        ConstraintKind::Range { min, max } => in_range(value, *min, *max),
        ConstraintKind::Custom { name } => match registry.get(name) {
            Some(predicate) => predicate(value, ctx),
            None => {
                warn!("No predicate registered under '{}', constraint fails", name);
                false
            }
        },
    }
}

/// Inclusive range check. Integers compare exactly; floats compare against
/// the widened bounds.
fn in_range(value: &FieldValue, min: i64, max: i64) -> bool {
    match value {
        FieldValue::Int(i) => (min..=max).contains(i),
        FieldValue::Float(f) => *f >= min as f64 && *f <= max as f64,
        _ => false,
    }
}
