//! Error types for the user store.

use crate::error::{Classify, ErrorKind};
use crate::model::Cents;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Student number or email already belongs to another user.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// A debit larger than the balance.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Cents, available: Cents },

    /// A credit that would overflow the balance.
    #[error("Balance overflow")]
    BalanceOverflow,

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// The store could not be reached.
    #[error("User store unavailable: {0}")]
    Unavailable(String),

    /// Any other store failure.
    #[error("User store error: {0}")]
    StoreError(String),
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e.downcast_rejected::<UserError>() {
            Ok(typed) => typed,
            Err(e @ (StoreError::Unavailable | StoreError::Dropped)) => {
                UserError::Unavailable(e.to_string())
            }
            Err(StoreError::NotFound(id)) => UserError::NotFound(id),
            Err(StoreError::Conflict(reason)) | Err(StoreError::AlreadyExists(reason)) => {
                UserError::AlreadyExists(reason)
            }
            Err(other) => UserError::StoreError(other.to_string()),
        }
    }
}

impl Classify for UserError {
    fn kind(&self) -> ErrorKind {
        match self {
            UserError::Unavailable(_) => ErrorKind::Network,
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::AlreadyExists(_) | UserError::ValidationError(_) => ErrorKind::Validation,
            UserError::InsufficientBalance { .. }
            | UserError::BalanceOverflow
            | UserError::StoreError(_) => ErrorKind::Remote,
        }
    }
}
