//! # Store Errors
//!
//! Errors raised by the record store engine itself, independent of any
//! particular record type.

use crate::error::{Classify, ErrorKind};

/// Errors that can occur while talking to a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store task is gone; the request could not be delivered.
    #[error("Store unavailable")]
    Unavailable,
    /// The store accepted the request but dropped the reply channel.
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    /// A uniqueness constraint (student number, email, booth PIN) would be broken.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// A record with the requested id already exists.
    #[error("Record already exists: {0}")]
    AlreadyExists(String),
    /// The record's own hook rejected the request.
    #[error("Rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Recovers the record's typed error from a [`StoreError::Rejected`].
    ///
    /// Returns `Err(self)` unchanged for every other variant or when the
    /// boxed error is of a different type.
    pub fn downcast_rejected<E>(self) -> Result<E, StoreError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            StoreError::Rejected(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(StoreError::Rejected(other)),
            },
            other => Err(other),
        }
    }
}

impl Classify for StoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Unavailable | StoreError::Dropped => ErrorKind::Network,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Conflict(_) | StoreError::AlreadyExists(_) => ErrorKind::Validation,
            StoreError::Rejected(_) => ErrorKind::Remote,
        }
    }
}
