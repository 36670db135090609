use crate::error::{Classify, ErrorKind};
use crate::ledger_actor::LedgerError;
use crate::model::{Cents, ProductId};
use crate::user_actor::UserError;
use thiserror::Error;

/// Why a purchase did not go through.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PurchaseError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("No booth selected")]
    BoothNotFound,

    #[error("Student not found: {0}")]
    StudentNotFound(String),

    #[error("No student selected")]
    NoStudentSelected,

    /// The booth selected in the terminal does not sell this product.
    #[error("Product {0} is not on this booth's menu")]
    UnknownProduct(ProductId),

    /// Caught locally from the last known balance; nothing was sent.
    #[error("Insufficient balance: total {total}, balance {balance}")]
    InsufficientBalance { total: Cents, balance: Cents },

    #[error("Cart total overflows")]
    TotalOverflow,

    /// A student lookup failed for a reason other than a miss.
    #[error("Student lookup failed: {0}")]
    Lookup(#[source] UserError),

    /// The ledger refused or failed the purchase.
    #[error("Purchase failed: {0}")]
    RemoteFailure(#[from] LedgerError),
}

impl Classify for PurchaseError {
    fn kind(&self) -> ErrorKind {
        match self {
            PurchaseError::BoothNotFound
            | PurchaseError::StudentNotFound(_)
            | PurchaseError::NoStudentSelected
            | PurchaseError::UnknownProduct(_) => ErrorKind::NotFound,
            PurchaseError::EmptyCart
            | PurchaseError::InsufficientBalance { .. }
            | PurchaseError::TotalOverflow => ErrorKind::Validation,
            PurchaseError::Lookup(e) => e.kind(),
            PurchaseError::RemoteFailure(e) if e.is_network() => ErrorKind::Network,
            PurchaseError::RemoteFailure(_) => ErrorKind::Remote,
        }
    }
}
