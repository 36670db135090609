//! # Store Messages
//!
//! Request envelope sent from a [`StoreClient`](super::StoreClient) to its
//! [`StoreActor`](super::StoreActor). Every variant carries a `oneshot`
//! sender for the reply.

use super::error::StoreError;
use super::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests understood by every record store.
///
/// Point lookup by id, exact-match lookup by field, create, update and
/// delete, plus a record-specific `Action` for mutations
/// that must be checked and applied atomically (debits, membership
/// changes).
#[derive(Debug)]
pub enum StoreRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
