use thiserror::Error;

/// Core error type shared across Starcheck crates.
///
/// Validation failures are not represented here; they are returned as data
/// in a [`crate::ValidationReport`]. This type covers problems with the
/// schema definitions themselves.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Convenience alias for results returned by Starcheck crates.
pub type Result<T> = std::result::Result<T, Error>;
