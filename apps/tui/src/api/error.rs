//! Error types for fetching essentiality data

use thiserror::Error;

/// Errors that end an in-flight fetch. Both carry a user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Missing or empty gene identifier; raised before any network call
    #[error("{0}")]
    Validation(String),

    /// Transport failure, API-level error, or missing data in the response
    #[error("{0}")]
    Upstream(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
