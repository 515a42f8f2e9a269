use northwind_core::QueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Unknown task '{0}' (run `northwind-queries list` to see available tasks)")]
    UnknownTask(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True for errors raised by a query rejecting its arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AppError::Query(QueryError::InvalidArgument(_) | QueryError::MissingPredicate(_))
        )
    }
}
