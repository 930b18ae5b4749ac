//! # Field Rules Validator
//!
//! Rule evaluator for field rulesets. This crate provides the logic that
//! checks a record against a ruleset:
//!
//! - Required-ness (zero values fail)
//! - Temporal windows (`present`, `past`, `future`) with a clock-skew tolerance
//! - Inclusive numeric ranges
//! - Custom named predicates from an explicit registry
//!
//! Fields and constraints are evaluated in declaration order and the first
//! failing constraint is reported with its configured message.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use rules_core::{FieldRuleBuilder, Record, RecordValidator, RulesetBuilder};
//! use rules_validator::RuleEvaluator;
//!
//! let ruleset = RulesetBuilder::new("borrow_book")
//!     .field(
//!         FieldRuleBuilder::new("Book_Frequency")
//!             .required("Book frequency must be between 1 and 1000")
//!             .range(1, 1000, "Book frequency must be between 1 and 1000")
//!             .build(),
//!     )
//!     .build();
//!
//! let evaluator = RuleEvaluator::new();
//! let record = Record::new().with("Book_Frequency", -1);
//!
//! match evaluator.validate(&record, &ruleset, Utc::now()) {
//!     Ok(()) => println!("Validation passed!"),
//!     Err(violation) => println!("Validation failed: {}", violation),
//! }
//! ```

mod constraints;
mod custom;
mod engine;
mod error;
pub mod temporal;

pub use constraints::*;
pub use custom::*;
pub use engine::*;
pub use error::*;
