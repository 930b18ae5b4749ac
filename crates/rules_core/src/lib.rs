//! # Field Rules Core
//!
//! Core data structures and types for the Field Rules Engine.
//!
//! A ruleset declares, per field of a record type, an ordered list of
//! constraints and the message to report when each one fails. This crate
//! holds those declarations, the record values they are checked against, and
//! the context/report types shared by validators.
//!
//! ## Key Concepts
//!
//! - **Ruleset**: ordered field rules for one record type
//! - **Constraint**: `required`, `present`, `past`, `future`, `range(min|max)`
//!   or a named custom predicate
//! - **Record**: the field values of one instance, immutable during validation
//!
//! ## Example
//!
//! ```rust
//! use rules_core::{FieldRuleBuilder, Record, RulesetBuilder};
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
//! let record = Record::new().with("Book_Frequency", 1);
//! assert_eq!(ruleset.fields.len(), 1);
//! assert_eq!(record.value("Book_Frequency").as_int(), Some(1));
//! ```

pub mod builder;
pub mod error;
pub mod record;
pub mod ruleset;
pub mod validator;

pub use builder::*;
pub use error::*;
pub use record::*;
pub use ruleset::*;
pub use validator::*;
