use super::error::AccessError;
use crate::clients::{BoothClient, UserClient};
use crate::model::{BoothId, Role, UserId, UserUpdate};
use crate::retry::{with_retry, RetryPolicy};
use crate::store::RecordClient;
use tracing::{error, info, instrument, warn};

/// What a PIN is being checked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    /// Student council access; the PIN is the configured admin PIN.
    Admin,
    /// Joining a booth as staff; the PIN identifies the booth.
    BoothJoin,
}

/// A successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// The booth joined, for [`AccessScope::BoothJoin`].
    pub scope_id: Option<BoothId>,
    /// The user already had this access; nothing was written.
    pub already_member: bool,
}

/// Verifies PINs and records the resulting access on the user and booth.
#[derive(Clone, Debug)]
pub struct AccessVerifier {
    users: UserClient,
    booths: BoothClient,
    admin_pin: String,
    retry: RetryPolicy,
}

impl AccessVerifier {
    pub fn new(users: UserClient, booths: BoothClient, admin_pin: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            users,
            booths,
            admin_pin: admin_pin.into(),
            retry,
        }
    }

    /// Checks `secret` for `scope` and grants access to `actor_id`.
    #[instrument(skip(self, secret))]
    pub async fn verify_access(
        &self,
        secret: &str,
        actor_id: &UserId,
        scope: AccessScope,
    ) -> Result<AccessGrant, AccessError> {
        let result = match scope {
            AccessScope::Admin => self.grant_admin(secret, actor_id).await,
            AccessScope::BoothJoin => self.join_booth(secret, actor_id).await,
        };
        match &result {
            Ok(grant) => info!(?grant, "Access granted"),
            Err(e) => warn!(error = %e, "Access refused"),
        }
        result
    }

    async fn grant_admin(&self, secret: &str, actor_id: &UserId) -> Result<AccessGrant, AccessError> {
        if secret != self.admin_pin {
            return Err(AccessError::InvalidPin);
        }
        let update = UserUpdate {
            role: Some(Role::Admin),
            ..UserUpdate::default()
        };
        with_retry(&self.retry, "grant_admin", || {
            self.users.update_user(actor_id.clone(), update.clone())
        })
        .await
        .map_err(|e| AccessError::from_user(e, actor_id))?;

        Ok(AccessGrant {
            scope_id: None,
            already_member: false,
        })
    }

    async fn join_booth(&self, pin: &str, actor_id: &UserId) -> Result<AccessGrant, AccessError> {
        let booth = with_retry(&self.retry, "find_booth_by_pin", || self.booths.find_by_pin(pin))
            .await
            .map_err(AccessError::from_booth)?
            .ok_or(AccessError::BoothNotFound)?;

        let user = with_retry(&self.retry, "get_user", || self.users.get(actor_id.clone()))
            .await
            .map_err(|e| AccessError::from_user(e, actor_id))?
            .ok_or_else(|| AccessError::UserNotFound(actor_id.clone()))?;

        if user.has_booth_access(&booth.id) && booth.has_member(actor_id) {
            return Ok(AccessGrant {
                scope_id: Some(booth.id),
                already_member: true,
            });
        }

        let newly_added = with_retry(&self.retry, "add_booth_member", || {
            self.booths.add_member(booth.id.clone(), actor_id.clone())
        })
        .await
        .map_err(AccessError::from_booth)?;

        let granted = with_retry(&self.retry, "grant_booth_access", || {
            self.users.grant_booth_access(actor_id.clone(), booth.id.clone())
        })
        .await;

        if let Err(e) = granted {
            warn!(booth_id = %booth.id, error = %e, "User-side write failed, undoing booth membership");
            // A membership that predates this join is left alone.
            let mut partial = !newly_added;
            if newly_added {
                let undo = with_retry(&self.retry, "remove_booth_member", || {
                    self.booths.remove_member(booth.id.clone(), actor_id.clone())
                })
                .await;
                if let Err(undo_error) = undo {
                    error!(
                        booth_id = %booth.id,
                        error = %undo_error,
                        "Booth lists the user but the user does not list the booth"
                    );
                    partial = true;
                }
            }
            return Err(AccessError::WriteFailed {
                reason: e.to_string(),
                partial,
            });
        }

        Ok(AccessGrant {
            scope_id: Some(booth.id),
            already_member: false,
        })
    }
}
