//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::ItemPath;

/// Domain errors represent violations of the bookmark tree's structure.
/// These are independent of persistence concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("no item at {0}")]
    NoItemAt(ItemPath),

    #[error("tab not found: {0}")]
    TabNotFound(String),

    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("unknown container id: {0}")]
    InvalidContainer(String),

    #[error("invalid grid size: {0} (expected <rows>x<cols>)")]
    InvalidGridSize(String),

    #[error("cannot delete the last tab: {0}")]
    LastTab(String),
}

impl DomainError {
    /// True for the "referenced thing no longer exists" family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::ItemNotFound(_) | DomainError::NoItemAt(_) | DomainError::TabNotFound(_)
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
