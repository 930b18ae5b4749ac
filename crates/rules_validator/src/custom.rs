//! Custom named predicates.
//!
//! A [`PredicateRegistry`] maps names to predicate functions. It is built up
//! front and handed to the evaluator, which looks names up when it meets a
//! `custom` constraint.

use crate::RegistryError;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use rules_core::FieldValue;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Name of the default text predicate: Thai script, Latin letters and
/// whitespace only.
pub const LETTERS_ONLY: &str = "letters_only";

const LETTERS_ONLY_PATTERN: &str = r"^[\p{Thai}a-zA-Z\s]+$";

/// Names taken by the built-in constraint kinds.
pub const RESERVED_NAMES: [&str; 5] = ["required", "present", "past", "future", "range"];

/// Inputs a predicate may consult besides the field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredicateContext {
    /// Evaluation instant
    pub now: DateTime<Utc>,
    /// Temporal tolerance in effect
    pub tolerance: Duration,
}

/// A shareable predicate function.
pub type Predicate = Arc<dyn Fn(&FieldValue, &PredicateContext) -> bool + Send + Sync>;

/// Table of named predicates available to `custom` constraints.
///
/// # Example
///
/// ```rust
/// use rules_core::FieldValue;
/// use rules_validator::PredicateRegistry;
///
/// let mut registry = PredicateRegistry::new();
/// registry
///     .register("even", |value, _ctx| value.as_int().is_some_and(|i| i % 2 == 0))
///     .unwrap();
///
/// assert!(registry.contains("even"));
/// ```
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    predicates: BTreeMap<String, Predicate>,
}

impl PredicateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the default predicates.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let letters = Regex::new(LETTERS_ONLY_PATTERN).expect("built-in pattern is valid");
        registry
            .predicates
            .insert(LETTERS_ONLY.to_string(), text_predicate(letters));
        registry
    }

    /// Registers a predicate under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(&FieldValue, &PredicateContext) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        check_name(&name)?;
        self.predicates.insert(name, Arc::new(predicate));
        Ok(self)
    }

    /// Registers a text predicate that passes when the value matches `pattern`.
    ///
    /// Non-text values fail.
    pub fn register_pattern(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<&mut Self, RegistryError> {
        let name = name.into();
        check_name(&name)?;
        let regex = Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            name: name.clone(),
            source,
        })?;
        self.predicates.insert(name, text_predicate(regex));
        Ok(self)
    }

    /// Looks up a predicate.
    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Returns the number of registered predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("predicates", &self.predicates.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn check_name(name: &str) -> Result<(), RegistryError> {
    if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name)) {
        return Err(RegistryError::ReservedName(name.to_string()));
    }
    Ok(())
}

fn text_predicate(regex: Regex) -> Predicate {
    Arc::new(move |value: &FieldValue, _ctx: &PredicateContext| {
        value.as_text().is_some_and(|s| regex.is_match(s))
    })
}
