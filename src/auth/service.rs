use super::error::AuthError;
use crate::clients::{IdentityClient, Session, UserClient};
use crate::model::{User, UserCreate, UserId};
use crate::retry::{with_retry, RetryPolicy};
use std::fmt;
use tracing::{info, instrument};

/// What a student fills in to register.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    pub student_number: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("student_number", &self.student_number)
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Local checks, run before any remote call.
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            &self.student_number,
            &self.name,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AuthError::Validation("Please fill in all fields".into()));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::Validation("Passwords do not match".into()));
        }
        if !self.email.contains('@') {
            return Err(AuthError::Validation("Please enter a valid email address".into()));
        }
        Ok(())
    }
}

/// Registration, login and logout.
#[derive(Clone, Debug)]
pub struct AuthService {
    users: UserClient,
    identity: IdentityClient,
    retry: RetryPolicy,
}

impl AuthService {
    pub fn new(users: UserClient, identity: IdentityClient, retry: RetryPolicy) -> Self {
        Self {
            users,
            identity,
            retry,
        }
    }

    /// Creates the sign-in and the student profile.
    ///
    /// The student number and email checks run concurrently. The new
    /// profile is a student with a zero balance and no booth access.
    #[instrument(skip(self, form), fields(student_number = %form.student_number))]
    pub async fn register(&self, form: RegistrationForm) -> Result<UserId, AuthError> {
        form.validate()?;
        let student_number = form.student_number.trim();
        let email = form.email.trim();

        let (by_number, by_email) = tokio::try_join!(
            with_retry(&self.retry, "find_by_student_number", || {
                self.users.find_by_student_number(student_number)
            }),
            with_retry(&self.retry, "find_by_email", || self.users.find_by_email(email)),
        )?;
        if by_number.is_some() || by_email.is_some() {
            return Err(AuthError::AlreadyRegistered);
        }

        let uid = with_retry(&self.retry, "sign_up", || {
            self.identity.sign_up(email, &form.password)
        })
        .await?;

        let profile = UserCreate::student(student_number, form.name.trim(), email).with_id(uid);
        let id = with_retry(&self.retry, "create_profile", || {
            self.users.create_user(profile.clone())
        })
        .await?;

        info!(%id, "Registration successful");
        Ok(id)
    }

    /// Signs in by student number: the profile supplies the email the
    /// identity provider knows the user by.
    #[instrument(skip(self, password))]
    pub async fn login(&self, student_number: &str, password: &str) -> Result<(Session, User), AuthError> {
        let user = with_retry(&self.retry, "find_by_student_number", || {
            self.users.find_by_student_number(student_number)
        })
        .await?
        .ok_or(AuthError::StudentNotFound)?;

        let session = with_retry(&self.retry, "sign_in", || {
            self.identity.sign_in(&user.email, password)
        })
        .await?;

        info!(user_id = %user.id, "Login successful");
        Ok((session, user))
    }

    pub fn logout(&self, session: Session) {
        info!(user_id = %session.user_id, "Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            student_number: "100".into(),
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        }
    }

    #[test]
    fn test_form_messages() {
        assert_eq!(form().validate(), Ok(()));

        let blank = RegistrationForm {
            name: String::new(),
            ..form()
        };
        assert_eq!(
            blank.validate(),
            Err(AuthError::Validation("Please fill in all fields".into()))
        );

        let bad_email = RegistrationForm {
            email: "ann.example.com".into(),
            ..form()
        };
        assert_eq!(
            bad_email.validate(),
            Err(AuthError::Validation("Please enter a valid email address".into()))
        );
    }

    #[test]
    fn test_debug_hides_passwords() {
        let printed = format!("{:?}", form());
        assert!(!printed.contains("hunter22"));
        assert!(printed.contains("ann@example.com"));
    }
}
