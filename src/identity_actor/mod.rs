//! Identity provider: email/password credentials keyed by user id.

pub mod entity;
pub mod error;

pub use entity::MIN_PASSWORD_LEN;
pub use error::*;

use crate::clients::IdentityClient;
use crate::model::{Credential, UserId};
use crate::store::StoreActor;

/// Creates a new identity actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Credential>, IdentityClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, UserId::generate);
    (actor, IdentityClient::new(generic_client))
}
