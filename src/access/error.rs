use crate::booth_actor::BoothError;
use crate::error::{Classify, ErrorKind};
use crate::model::UserId;
use crate::user_actor::UserError;
use thiserror::Error;

/// Why an access request was refused.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccessError {
    #[error("Invalid PIN")]
    InvalidPin,

    /// No booth uses the PIN that was entered.
    #[error("Invalid booth PIN")]
    BoothNotFound,

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Still failing after the configured retries.
    #[error("Network connection error: {0}")]
    Network(String),

    /// A membership write failed. `partial` is set when the booth is left
    /// listing the user but the user does not list the booth: either the
    /// booth already listed them or the undo failed.
    #[error("Failed to grant access: {reason} (partial: {partial})")]
    WriteFailed { reason: String, partial: bool },
}

impl AccessError {
    pub(crate) fn from_user(e: UserError, id: &UserId) -> Self {
        match e {
            UserError::NotFound(_) => AccessError::UserNotFound(id.clone()),
            e if e.is_network() => AccessError::Network(e.to_string()),
            e => AccessError::WriteFailed {
                reason: e.to_string(),
                partial: false,
            },
        }
    }

    pub(crate) fn from_booth(e: BoothError) -> Self {
        match e {
            BoothError::NotFound(_) => AccessError::BoothNotFound,
            e if e.is_network() => AccessError::Network(e.to_string()),
            e => AccessError::WriteFailed {
                reason: e.to_string(),
                partial: false,
            },
        }
    }
}

impl Classify for AccessError {
    fn kind(&self) -> ErrorKind {
        match self {
            AccessError::InvalidPin | AccessError::BoothNotFound | AccessError::UserNotFound(_) => {
                ErrorKind::NotFound
            }
            AccessError::Network(_) => ErrorKind::Network,
            AccessError::WriteFailed { .. } => ErrorKind::Remote,
        }
    }
}
