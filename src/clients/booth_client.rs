//! # Booth Client
//!
//! High-level API over the booth store.

use crate::booth_actor::{BoothAction, BoothActionResult, BoothError};
use crate::model::{Booth, BoothCreate, BoothFilter, BoothId, Cents, UserId};
use crate::store::{RecordClient, StoreClient, StoreError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the booth store.
#[derive(Clone, Debug)]
pub struct BoothClient {
    inner: StoreClient<Booth>,
}

#[async_trait]
impl RecordClient<Booth> for BoothClient {
    type Error = BoothError;

    fn inner(&self) -> &StoreClient<Booth> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        BoothError::from(e)
    }
}

fn unexpected(result: BoothActionResult) -> BoothError {
    BoothError::StoreError(format!("unexpected action result {result:?}"))
}

impl BoothClient {
    pub fn new(inner: StoreClient<Booth>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_booth(&self, params: BoothCreate) -> Result<BoothId, BoothError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(BoothError::from)
    }

    /// The booth whose PIN is `pin`, if any. PINs are unique.
    #[instrument(skip(self, pin))]
    pub async fn find_by_pin(&self, pin: &str) -> Result<Option<Booth>, BoothError> {
        let mut hits = self.find(BoothFilter::Pin(pin.to_string())).await?;
        Ok(hits.pop())
    }

    #[instrument(skip(self))]
    pub async fn add_member(&self, id: BoothId, user_id: UserId) -> Result<bool, BoothError> {
        debug!("Sending request");
        match self.inner.perform_action(id, BoothAction::AddMember(user_id)).await? {
            BoothActionResult::AddMember(added) => Ok(added),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_member(&self, id: BoothId, user_id: UserId) -> Result<bool, BoothError> {
        debug!("Sending request");
        match self.inner.perform_action(id, BoothAction::RemoveMember(user_id)).await? {
            BoothActionResult::RemoveMember(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    /// Adds `amount` to the booth's sales total; returns the new total.
    #[instrument(skip(self))]
    pub async fn record_sale(&self, id: BoothId, amount: Cents) -> Result<Cents, BoothError> {
        debug!("Sending request");
        match self.inner.perform_action(id, BoothAction::RecordSale(amount)).await? {
            BoothActionResult::RecordSale(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;

    #[tokio::test]
    async fn test_find_by_pin_returns_single_booth() {
        let booth = Booth::from_parts(BoothId::from("b1"), BoothCreate::new("Snacks", "", "111111"));
        let mut mock = MockStore::<Booth>::new();
        mock.expect_find().return_ok(vec![booth]);
        mock.expect_find().return_ok(vec![]);

        let client = BoothClient::new(mock.client());
        let hit = client.find_by_pin("111111").await.unwrap();
        assert_eq!(hit.map(|b| b.id), Some(BoothId::from("b1")));
        assert!(client.find_by_pin("999999").await.unwrap().is_none());
        mock.verify();
    }

    #[tokio::test]
    async fn test_add_member_reports_rejection() {
        let mut mock = MockStore::<Booth>::new();
        mock.expect_action(BoothId::from("b1"))
            .return_err(StoreError::NotFound("b1".into()));

        let client = BoothClient::new(mock.client());
        let err = client
            .add_member(BoothId::from("b1"), UserId::from("u1"))
            .await
            .unwrap_err();
        assert_eq!(err, BoothError::NotFound("b1".into()));
        mock.verify();
    }
}
