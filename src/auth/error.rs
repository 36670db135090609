use crate::error::{Classify, ErrorKind};
use crate::identity_actor::IdentityError;
use crate::user_actor::UserError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// The form was rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Student number or email already registered")]
    AlreadyRegistered,

    #[error("Student number not found")]
    StudentNotFound,

    #[error("Invalid student number or password")]
    InvalidCredentials,

    #[error("Network connection error. Please check your internet connection and try again.")]
    Network(String),

    #[error("Identity provider error: {0}")]
    Identity(#[source] IdentityError),

    #[error("Profile store error: {0}")]
    Profile(#[source] UserError),
}

impl From<UserError> for AuthError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::AlreadyExists(_) => AuthError::AlreadyRegistered,
            UserError::ValidationError(reason) => AuthError::Validation(reason),
            e if e.is_network() => AuthError::Network(e.to_string()),
            e => AuthError::Profile(e),
        }
    }
}

impl From<IdentityError> for AuthError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::EmailInUse(_) => AuthError::AlreadyRegistered,
            IdentityError::InvalidCredentials => AuthError::InvalidCredentials,
            IdentityError::WeakPassword { .. } | IdentityError::InvalidEmail(_) => {
                AuthError::Validation(e.to_string())
            }
            e if e.is_network() => AuthError::Network(e.to_string()),
            e => AuthError::Identity(e),
        }
    }
}

impl Classify for AuthError {
    fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::AlreadyRegistered => ErrorKind::Validation,
            AuthError::StudentNotFound | AuthError::InvalidCredentials => ErrorKind::NotFound,
            AuthError::Network(_) => ErrorKind::Network,
            AuthError::Identity(_) | AuthError::Profile(_) => ErrorKind::Remote,
        }
    }
}
