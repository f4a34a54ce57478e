//! Error types for the query engine.

use thiserror::Error;

use crate::schema::DimensionKind;

/// Errors raised when a query or screen is configured incorrectly.
///
/// Evaluation itself never fails: malformed ranges simply match nothing.
/// Only configuration mistakes (dimensions the screen never declared,
/// kind mismatches, bad page sizes) surface as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query references a dimension that the schema does not declare.
    #[error("unknown dimension '{0}'")]
    UnknownDimension(String),

    /// The query uses a dimension with a constraint of the wrong kind.
    #[error("dimension '{name}' is a {actual} dimension, not a {expected} dimension")]
    KindMismatch {
        name: String,
        expected: DimensionKind,
        actual: DimensionKind,
    },

    /// A single-select dimension received more than one value.
    #[error("dimension '{name}' is single-select but {count} values are selected")]
    TooManyValues { name: String, count: usize },

    /// Two dimensions in one schema share a name.
    #[error("dimension '{0}' is declared more than once")]
    DuplicateDimension(String),

    /// Option search was requested on a dimension not marked searchable.
    #[error("dimension '{0}' does not support option search")]
    NotSearchable(String),

    /// Page size of zero.
    #[error("items per page must be at least 1")]
    InvalidPageSize,
}

/// Result type for query engine operations.
pub type Result<T> = std::result::Result<T, QueryError>;
