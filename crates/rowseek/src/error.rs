//! Error types for the rowseek crate.

use thiserror::Error;

/// Errors raised by the query pipeline.
///
/// Only a malformed page request can fail. Missing fields, type mismatches
/// and empty collections degrade per row instead of aborting the query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Page size must be a positive number of rows.
    #[error("invalid page spec: page size must be positive, got {page_size}")]
    InvalidPageSpec { page_size: i64 },
}

/// Result type for rowseek operations.
pub type Result<T> = std::result::Result<T, QueryError>;
