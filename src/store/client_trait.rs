//! # RecordClient Trait
//!
//! Shared read/delete operations for the typed clients (`UserClient`,
//! `BoothClient`, ...), built on a generic [`StoreClient`].

use super::{Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Implemented by every typed store client.
///
/// Supplies `get`, `find` and `delete` so each client only writes the
/// operations that are specific to its record.
#[async_trait]
pub trait RecordClient<T: Record>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic store client.
    fn inner(&self) -> &StoreClient<T>;

    /// Maps store errors to the record-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Point lookup by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Exact-match lookup.
    #[tracing::instrument(skip(self))]
    async fn find(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(filter).await.map_err(Self::map_error)
    }

    /// Removes a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
