//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add persistence context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("persistence failed: {context}")]
    Persistence {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tab config: {context}")]
    Format {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid tab config: {0}")]
    InvalidDocument(String),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
