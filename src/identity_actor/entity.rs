//! Record trait implementation for [`Credential`].

use super::error::IdentityError;
use crate::model::{Credential, CredentialCreate, CredentialFilter, UserId};
use crate::store::Record;
use async_trait::async_trait;

/// Shortest password the identity provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

#[async_trait]
impl Record for Credential {
    type Id = UserId;
    type Create = CredentialCreate;
    type Update = ();
    type Filter = CredentialFilter;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = IdentityError;

    fn from_create_params(id: UserId, params: CredentialCreate) -> Result<Self, IdentityError> {
        if !params.email.contains('@') {
            return Err(IdentityError::InvalidEmail(params.email));
        }
        if params.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(Credential::new(id, params))
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        self.email
            .eq_ignore_ascii_case(&other.email)
            .then(|| self.email.clone())
    }

    fn matches(&self, filter: &CredentialFilter) -> bool {
        match filter {
            CredentialFilter::Email(email) => self.email.eq_ignore_ascii_case(email),
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), IdentityError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_is_weak() {
        let result = Credential::from_create_params(
            UserId::from("u1"),
            CredentialCreate {
                email: "ann@example.com".into(),
                password: "abc".into(),
            },
        );
        assert_eq!(result.unwrap_err(), IdentityError::WeakPassword { min: 6 });
    }

    #[test]
    fn test_emails_conflict_ignoring_case() {
        let create = |email: &str| CredentialCreate {
            email: email.into(),
            password: "hunter22".into(),
        };
        let a = Credential::from_create_params(UserId::from("u1"), create("ann@example.com")).unwrap();
        let b = Credential::from_create_params(UserId::from("u2"), create("Ann@Example.com")).unwrap();
        assert!(b.conflicts_with(&a).is_some());
        assert!(a.matches(&CredentialFilter::Email("ANN@example.com".into())));
    }
}
