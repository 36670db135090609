//! Error types for the ledger.

use crate::booth_actor::BoothError;
use crate::error::{Classify, ErrorKind};
use crate::model::Cents;
use crate::store::StoreError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors that can occur while recording a purchase.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Booth not found: {0}")]
    BoothNotFound(String),

    /// A cart line names a product the booth does not sell.
    #[error("Unknown product {product} at booth {booth}")]
    UnknownProduct { booth: String, product: String },

    #[error("Ledger validation error: {0}")]
    ValidationError(String),

    #[error("Buyer not found: {0}")]
    BuyerNotFound(String),

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: Cents, available: Cents },

    /// The buyer was debited but the booth could not be credited.
    /// `refunded` says whether the debit was undone.
    #[error("Booth credit failed ({reason}); buyer refunded: {refunded}")]
    CreditFailed { reason: String, refunded: bool },

    /// A request id already used for a different purchase.
    #[error("Request id {0} was already used for another purchase")]
    RequestIdReused(String),

    /// Ledger entries are append-only.
    #[error("Ledger entries cannot be modified")]
    Immutable,

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    #[error("Ledger store error: {0}")]
    StoreError(String),
}

impl From<StoreError> for LedgerError {
    fn from(e: StoreError) -> Self {
        match e.downcast_rejected::<LedgerError>() {
            Ok(typed) => typed,
            Err(e @ (StoreError::Unavailable | StoreError::Dropped)) => {
                LedgerError::Unavailable(e.to_string())
            }
            Err(other) => LedgerError::StoreError(other.to_string()),
        }
    }
}

impl From<UserError> for LedgerError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(id) => LedgerError::BuyerNotFound(id),
            UserError::InsufficientBalance {
                requested,
                available,
            } => LedgerError::InsufficientBalance {
                requested,
                available,
            },
            UserError::Unavailable(reason) => LedgerError::Unavailable(reason),
            other => LedgerError::StoreError(other.to_string()),
        }
    }
}

impl From<BoothError> for LedgerError {
    fn from(e: BoothError) -> Self {
        match e {
            BoothError::NotFound(id) => LedgerError::BoothNotFound(id),
            BoothError::Unavailable(reason) => LedgerError::Unavailable(reason),
            other => LedgerError::StoreError(other.to_string()),
        }
    }
}

impl Classify for LedgerError {
    fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Unavailable(_) => ErrorKind::Network,
            LedgerError::BoothNotFound(_)
            | LedgerError::BuyerNotFound(_)
            | LedgerError::UnknownProduct { .. } => ErrorKind::NotFound,
            LedgerError::ValidationError(_)
            | LedgerError::InsufficientBalance { .. }
            | LedgerError::RequestIdReused(_)
            | LedgerError::Immutable => ErrorKind::Validation,
            LedgerError::CreditFailed { .. } | LedgerError::StoreError(_) => ErrorKind::Remote,
        }
    }
}
