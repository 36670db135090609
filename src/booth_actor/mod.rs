//! Booth store: booths, their catalogs, staff and sales totals.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::BoothClient;
use crate::model::{Booth, BoothId};
use crate::store::StoreActor;

/// Creates a new booth store actor and its client.
pub fn new(buffer_size: usize) -> (StoreActor<Booth>, BoothClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, BoothId::generate);
    (actor, BoothClient::new(generic_client))
}
