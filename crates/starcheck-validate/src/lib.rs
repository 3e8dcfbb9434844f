//! Validation engine for Starcheck schemas.
//!
//! Coerces raw JSON input into typed records, evaluates per-field
//! constraints and cross-field business rules, and aggregates failures
//! into an ordered [`starcheck_core::ValidationReport`]. Field errors
//! aggregate across sibling fields; business rules are evaluated
//! fail-fast in declaration order.

mod coerce;
mod engine;
pub mod timestamp;

pub use engine::validate;
pub use timestamp::{TIMESTAMP_FORMAT, parse_timestamp};
