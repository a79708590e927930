//! Error conversion helpers for storage and serialization results
//!
//! Provides extension traits for cleaner error handling with key context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add storage-key context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// store.set(&key, &json)
    ///     .with_key_context("save", &key)?;
    /// ```
    fn with_key_context(self, action: &str, key: &str) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_key_context(self, action: &str, key: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Persistence {
            context: format!("{} '{}'", action, key),
            source: e,
        })
    }
}

/// Extension trait for converting `serde_json::Result` with context.
pub trait JsonResultExt<T> {
    fn with_json_context(self, action: &str) -> ApplicationResult<T>;
}

impl<T> JsonResultExt<T> for serde_json::Result<T> {
    fn with_json_context(self, action: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Format {
            context: action.to_string(),
            source: e,
        })
    }
}
