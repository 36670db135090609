//! Error types for the booth store.

use crate::error::{Classify, ErrorKind};
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during booth operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BoothError {
    #[error("Booth not found: {0}")]
    NotFound(String),

    /// Another booth already uses this PIN.
    #[error("Booth conflict: {0}")]
    Conflict(String),

    #[error("Booth validation error: {0}")]
    ValidationError(String),

    /// Recording a sale would overflow the sales total.
    #[error("Sales total overflow")]
    SalesOverflow,

    #[error("Booth store unavailable: {0}")]
    Unavailable(String),

    #[error("Booth store error: {0}")]
    StoreError(String),
}

impl From<StoreError> for BoothError {
    fn from(e: StoreError) -> Self {
        match e.downcast_rejected::<BoothError>() {
            Ok(typed) => typed,
            Err(e @ (StoreError::Unavailable | StoreError::Dropped)) => {
                BoothError::Unavailable(e.to_string())
            }
            Err(StoreError::NotFound(id)) => BoothError::NotFound(id),
            Err(StoreError::Conflict(reason)) | Err(StoreError::AlreadyExists(reason)) => {
                BoothError::Conflict(reason)
            }
            Err(other) => BoothError::StoreError(other.to_string()),
        }
    }
}

impl Classify for BoothError {
    fn kind(&self) -> ErrorKind {
        match self {
            BoothError::Unavailable(_) => ErrorKind::Network,
            BoothError::NotFound(_) => ErrorKind::NotFound,
            BoothError::Conflict(_) | BoothError::ValidationError(_) => ErrorKind::Validation,
            BoothError::SalesOverflow | BoothError::StoreError(_) => ErrorKind::Remote,
        }
    }
}
