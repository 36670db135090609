//! # User Client
//!
//! High-level API over the user store: profile creation, lookups and the
//! balance/booth-access actions.

use crate::model::{BoothId, Cents, User, UserCreate, UserFilter, UserId, UserUpdate};
use crate::store::{RecordClient, StoreClient, StoreError};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the user store.
#[derive(Clone, Debug)]
pub struct UserClient {
    inner: StoreClient<User>,
}

#[async_trait]
impl RecordClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &StoreClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        UserError::from(e)
    }
}

fn unexpected(result: UserActionResult) -> UserError {
    UserError::StoreError(format!("unexpected action result {result:?}"))
}

impl UserClient {
    pub fn new(inner: StoreClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(student_number = %params.student_number))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(UserError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(UserError::from)
    }

    /// The user holding `student_number`, if any.
    #[instrument(skip(self))]
    pub async fn find_by_student_number(
        &self,
        student_number: &str,
    ) -> Result<Option<User>, UserError> {
        let mut hits = self
            .find(UserFilter::StudentNumber(student_number.to_string()))
            .await?;
        Ok(hits.pop())
    }

    /// The user registered under `email` (case-insensitive), if any.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let mut hits = self.find(UserFilter::Email(email.to_string())).await?;
        Ok(hits.pop())
    }

    /// Takes `amount` from the balance; returns the new balance.
    #[instrument(skip(self))]
    pub async fn debit(&self, id: UserId, amount: Cents) -> Result<Cents, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(id, UserAction::Debit(amount)).await? {
            UserActionResult::Debit(balance) => Ok(balance),
            other => Err(unexpected(other)),
        }
    }

    /// Adds `amount` to the balance; returns the new balance.
    #[instrument(skip(self))]
    pub async fn credit(&self, id: UserId, amount: Cents) -> Result<Cents, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(id, UserAction::Credit(amount)).await? {
            UserActionResult::Credit(balance) => Ok(balance),
            other => Err(unexpected(other)),
        }
    }

    /// Returns `true` if access was newly granted.
    #[instrument(skip(self))]
    pub async fn grant_booth_access(&self, id: UserId, booth_id: BoothId) -> Result<bool, UserError> {
        match self
            .inner
            .perform_action(id, UserAction::GrantBoothAccess(booth_id))
            .await?
        {
            UserActionResult::GrantBoothAccess(added) => Ok(added),
            other => Err(unexpected(other)),
        }
    }
}
