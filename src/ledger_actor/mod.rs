//! Ledger: the append-only purchase record.
//!
//! Unlike the other stores, ids are never generated here; every entry is
//! keyed by the request id the client chose. See
//! [`LedgerClient::submit`](crate::clients::LedgerClient::submit).

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::LedgerClient;
use crate::model::{TransactionId, TransactionRecord};
use crate::store::StoreActor;

/// Creates a new ledger actor and its client.
///
/// The actor must be run with a `(UserClient, BoothClient)` context.
pub fn new(buffer_size: usize) -> (StoreActor<TransactionRecord>, LedgerClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, TransactionId::generate);
    (actor, LedgerClient::new(generic_client))
}
