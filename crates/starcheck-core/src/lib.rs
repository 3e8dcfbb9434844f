//! Core contracts for Starcheck.
//!
//! This crate defines the schema types, typed value model, and validation
//! report shared by the validation engine and the domain record crates.

pub mod error;
pub mod report;
pub mod schema;
pub mod validation;
pub mod value;

pub use error::{Error, Result};
pub use report::{ErrorKind, ValidationError, ValidationReport};
pub use schema::{BusinessRule, Constraint, FieldDescriptor, FieldType, Schema};
pub use validation::check_schema;
pub use value::{FieldPath, Record, TypedValue};
