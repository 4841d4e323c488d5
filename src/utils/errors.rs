use thiserror::Error;

use crate::core::Operation;

/// Failures surfaced by the catalog controllers.
///
/// Lookups that find nothing are not errors; they return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Fetch failed during {operation}: {message}")]
    FetchFailed { operation: Operation, message: String },

    #[error("Store failed during {operation}: {message}")]
    StoreFailed { operation: Operation, message: String },
}

impl CatalogError {
    pub fn fetch(operation: Operation, error: anyhow::Error) -> Self {
        Self::FetchFailed {
            operation,
            message: format!("{:#}", error),
        }
    }

    pub fn store(operation: Operation, error: anyhow::Error) -> Self {
        Self::StoreFailed {
            operation,
            message: format!("{:#}", error),
        }
    }

    /// The operation that triggered this failure.
    pub fn operation(&self) -> &Operation {
        match self {
            Self::FetchFailed { operation, .. } | Self::StoreFailed { operation, .. } => operation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::FetchFailed { message, .. } | Self::StoreFailed { message, .. } => message,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
