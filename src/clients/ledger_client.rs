//! # Ledger Client
//!
//! Submits purchases and reads purchase history.

use crate::ledger_actor::LedgerError;
use crate::model::{BoothId, PurchaseRequest, TransactionFilter, TransactionId, TransactionRecord, UserId};
use crate::store::{RecordClient, StoreClient, StoreError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// A committed purchase as seen by the submitter.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    pub record: TransactionRecord,
    /// `true` when this request id had already been committed and the
    /// original record was returned without charging again.
    pub replayed: bool,
}

/// Client for interacting with the ledger.
#[derive(Clone, Debug)]
pub struct LedgerClient {
    inner: StoreClient<TransactionRecord>,
}

#[async_trait]
impl RecordClient<TransactionRecord> for LedgerClient {
    type Error = LedgerError;

    fn inner(&self) -> &StoreClient<TransactionRecord> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        LedgerError::from(e)
    }
}

impl LedgerClient {
    pub fn new(inner: StoreClient<TransactionRecord>) -> Self {
        Self { inner }
    }

    /// Records a purchase: debit the buyer, credit the booth, append the entry.
    ///
    /// Submitting the same `request_id` again returns the original record
    /// with `replayed = true` and moves no money. A request id reused for a
    /// different buyer or booth is refused.
    #[instrument(skip(self, request), fields(request_id = %request.request_id))]
    pub async fn submit(&self, request: PurchaseRequest) -> Result<PurchaseReceipt, LedgerError> {
        debug!("Sending request");
        let request_id = request.request_id.clone();
        let (buyer_id, booth_id) = (request.buyer_id.clone(), request.booth_id.clone());

        let (id, replayed) = match self.inner.create(request).await {
            Ok(id) => (id, false),
            Err(StoreError::AlreadyExists(_)) => (request_id, true),
            Err(e) => return Err(LedgerError::from(e)),
        };

        let record = self
            .inner
            .get(id.clone())
            .await?
            .ok_or_else(|| LedgerError::StoreError(format!("committed entry {id} is missing")))?;

        if replayed {
            if record.buyer_id != buyer_id || record.booth_id != booth_id {
                return Err(LedgerError::RequestIdReused(id.to_string()));
            }
            info!(%id, "Purchase already recorded, replaying");
        }
        Ok(PurchaseReceipt { record, replayed })
    }

    /// A buyer's purchases, newest first.
    #[instrument(skip(self))]
    pub async fn history_for_buyer(&self, buyer_id: UserId) -> Result<Vec<TransactionRecord>, LedgerError> {
        let records = self.find(TransactionFilter::Buyer(buyer_id)).await?;
        Ok(newest_first(records))
    }

    /// A booth's sales, newest first.
    #[instrument(skip(self))]
    pub async fn history_for_booth(&self, booth_id: BoothId) -> Result<Vec<TransactionRecord>, LedgerError> {
        let records = self.find(TransactionFilter::Booth(booth_id)).await?;
        Ok(newest_first(records))
    }

    #[instrument(skip(self))]
    pub async fn get_transaction(&self, id: TransactionId) -> Result<Option<TransactionRecord>, LedgerError> {
        self.get(id).await
    }
}

fn newest_first(mut records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CartLine;
    use crate::store::mock::MockStore;

    fn request(id: &str, buyer: &str) -> PurchaseRequest {
        PurchaseRequest {
            request_id: TransactionId::from(id),
            booth_id: BoothId::from("b1"),
            booth_name: "Snacks".into(),
            buyer_id: UserId::from(buyer),
            buyer_name: "Ann".into(),
            actor_id: UserId::from("staff"),
            actor_name: "Bob".into(),
            items: vec![CartLine {
                product_id: "p1".into(),
                quantity: 1,
            }],
        }
    }

    #[tokio::test]
    async fn test_duplicate_create_is_a_replay() {
        let stored = TransactionRecord::from_request(TransactionId::from("t1"), request("t1", "u1"));
        let mut mock = MockStore::<TransactionRecord>::new();
        mock.expect_create()
            .return_err(StoreError::AlreadyExists("t1".into()));
        mock.expect_get(TransactionId::from("t1")).return_ok(Some(stored));

        let client = LedgerClient::new(mock.client());
        let receipt = client.submit(request("t1", "u1")).await.unwrap();
        assert!(receipt.replayed);
        assert_eq!(receipt.record.id, TransactionId::from("t1"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_reused_request_id_for_other_buyer_is_refused() {
        let stored = TransactionRecord::from_request(TransactionId::from("t1"), request("t1", "u1"));
        let mut mock = MockStore::<TransactionRecord>::new();
        mock.expect_create()
            .return_err(StoreError::AlreadyExists("t1".into()));
        mock.expect_get(TransactionId::from("t1")).return_ok(Some(stored));

        let client = LedgerClient::new(mock.client());
        let err = client.submit(request("t1", "u9")).await.unwrap_err();
        assert_eq!(err, LedgerError::RequestIdReused("t1".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_rejection_keeps_ledger_error() {
        let mut mock = MockStore::<TransactionRecord>::new();
        mock.expect_create()
            .return_err(StoreError::Rejected(Box::new(LedgerError::InsufficientBalance {
                requested: 500,
                available: 100,
            })));

        let client = LedgerClient::new(mock.client());
        let err = client.submit(request("t2", "u1")).await.unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { requested: 500, .. }));
        mock.verify();
    }
}
