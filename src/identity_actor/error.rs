//! Error types for the identity provider.

use crate::error::{Classify, ErrorKind};
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityError {
    #[error("Email already in use: {0}")]
    EmailInUse(String),

    /// Wrong email or password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("Identity store error: {0}")]
    StoreError(String),
}

impl From<StoreError> for IdentityError {
    fn from(e: StoreError) -> Self {
        match e.downcast_rejected::<IdentityError>() {
            Ok(typed) => typed,
            Err(e @ (StoreError::Unavailable | StoreError::Dropped)) => {
                IdentityError::Unavailable(e.to_string())
            }
            Err(StoreError::Conflict(reason)) | Err(StoreError::AlreadyExists(reason)) => {
                IdentityError::EmailInUse(reason)
            }
            Err(other) => IdentityError::StoreError(other.to_string()),
        }
    }
}

impl Classify for IdentityError {
    fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Unavailable(_) => ErrorKind::Network,
            IdentityError::InvalidCredentials => ErrorKind::NotFound,
            IdentityError::EmailInUse(_)
            | IdentityError::WeakPassword { .. }
            | IdentityError::InvalidEmail(_) => ErrorKind::Validation,
            IdentityError::StoreError(_) => ErrorKind::Remote,
        }
    }
}
