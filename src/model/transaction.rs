use super::ids::{BoothId, ProductId, TransactionId, UserId};
use super::money::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cart line as sent to the ledger: which product and how many.
/// Prices are resolved by the ledger from the booth catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A purchase submitted to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Client-generated; resubmitting the same id never charges twice.
    pub request_id: TransactionId,
    pub booth_id: BoothId,
    pub booth_name: String,
    pub buyer_id: UserId,
    pub buyer_name: String,
    /// Who rang the sale up.
    pub actor_id: UserId,
    pub actor_name: String,
    pub items: Vec<CartLine>,
}

/// A sold line with the price it was sold at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Cents,
    pub quantity: u32,
}

/// An immutable ledger entry.
///
/// # Store
/// Managed by a [`StoreActor`](crate::store::StoreActor). Entries are only
/// ever created; the `on_create` hook performs the debit and credit, see
/// [`impl Record for TransactionRecord`](#impl-Record-for-TransactionRecord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub buyer_id: UserId,
    pub buyer_name: String,
    pub booth_id: BoothId,
    pub booth_name: String,
    pub actor_id: UserId,
    pub actor_name: String,
    pub items: Vec<LineItem>,
    /// `Σ unit_price × quantity` over `items`.
    pub total: Cents,
    pub created_at: DateTime<Utc>,
    /// Lines still to be priced; empty once the entry is committed.
    #[serde(skip)]
    pub(crate) pending: Vec<CartLine>,
}

impl TransactionRecord {
    /// An unpriced entry for `request`, stored under `id`.
    pub fn from_request(id: TransactionId, request: PurchaseRequest) -> Self {
        Self {
            id,
            buyer_id: request.buyer_id,
            buyer_name: request.buyer_name,
            booth_id: request.booth_id,
            booth_name: request.booth_name,
            actor_id: request.actor_id,
            actor_name: request.actor_name,
            items: Vec::new(),
            total: 0,
            created_at: Utc::now(),
            pending: request.items,
        }
    }
}

/// Exact-match lookups over ledger entries.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionFilter {
    All,
    Buyer(UserId),
    Booth(BoothId),
}
