pub mod check;
pub mod predicates;
pub mod validate;
