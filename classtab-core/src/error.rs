//! Common error types for the classtab pipeline

use thiserror::Error;

/// Common result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the normalization pipeline
///
/// Per-cell parse misses are not errors: a cell that matches no pattern tier
/// simply contributes zero entries. Only whole-batch conditions appear here.
#[derive(Error, Debug)]
pub enum Error {
    /// A required semantic column could not be located in the header row
    #[error("Required column not found: {0}")]
    MissingColumn(&'static str),

    /// Parsing produced zero fact rows across all source rows
    #[error("No valid data extracted")]
    NoValidData,
}
