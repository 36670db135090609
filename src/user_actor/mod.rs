//! User profile store: records, balance actions and errors.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::model::{User, UserId};
use crate::store::StoreActor;

/// Creates a new user store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<User>, UserClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, UserId::generate);
    (actor, UserClient::new(generic_client))
}
