//! Error types for northwind-core.
//!
//! Argument errors are raised before a query reads any record.

use thiserror::Error;

/// Query error type
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing predicate: {0}")]
    MissingPredicate(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

impl serde::Serialize for QueryError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
