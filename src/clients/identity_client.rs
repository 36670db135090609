//! # Identity Client
//!
//! Sign-up and sign-in against the identity provider.

use crate::identity_actor::IdentityError;
use crate::model::{Credential, CredentialCreate, CredentialFilter, UserId};
use crate::store::{RecordClient, StoreClient, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    /// Opaque per-sign-in token.
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

/// Client for interacting with the identity provider.
#[derive(Clone, Debug)]
pub struct IdentityClient {
    inner: StoreClient<Credential>,
}

#[async_trait]
impl RecordClient<Credential> for IdentityClient {
    type Error = IdentityError;

    fn inner(&self) -> &StoreClient<Credential> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        IdentityError::from(e)
    }
}

impl IdentityClient {
    pub fn new(inner: StoreClient<Credential>) -> Self {
        Self { inner }
    }

    /// Creates a credential and returns the new uid.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, IdentityError> {
        debug!("Sending request");
        let id = self
            .inner
            .create(CredentialCreate {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        info!(%id, "Signed up");
        Ok(id)
    }

    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        debug!("Sending request");
        let credential = self
            .find(CredentialFilter::Email(email.to_string()))
            .await?
            .pop()
            .filter(|c| c.verify(password));

        let Some(credential) = credential else {
            warn!("Sign-in refused");
            return Err(IdentityError::InvalidCredentials);
        };
        Ok(Session {
            user_id: credential.id,
            email: credential.email,
            token: Uuid::new_v4().to_string(),
            issued_at: Utc::now(),
        })
    }
}
