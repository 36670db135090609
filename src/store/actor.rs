//! # Store Actor
//!
//! The `StoreActor` owns every record of one type and serves requests
//! from its channel one at a time. Because nothing else can touch the
//! map, check-then-write sequences inside a single request (debit only if
//! the balance covers it, insert only if the PIN is free) are atomic
//! without locks.

use super::client::StoreClient;
use super::error::StoreError;
use super::message::StoreRequest;
use super::record::Record;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of records.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new()` returns the actor and its client.
/// 2. **Wire**: pass the dependencies (other clients) to `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use async_trait::async_trait;
/// use fraserpay::store::{Record, StoreActor};
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl Record for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = String;
///     type Filter = String;
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.0 })
///     }
///     fn matches(&self, text: &String) -> bool { &self.text == text }
///     async fn on_update(&mut self, text: String, _: &()) -> Result<(), NoteError> {
///         self.text = text;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let counter = std::sync::atomic::AtomicU32::new(1);
///     let (actor, client) = StoreActor::<Note>::new(8, move || {
///         counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
///     });
///     tokio::spawn(actor.run(()));
///     let id = client.create(NoteCreate("hello".into())).await.unwrap();
///     assert_eq!(client.find("hello".into()).await.unwrap()[0].id, id);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: takes the record's requested id (refusing duplicates) or
///   generates one, builds the record, rejects it if it conflicts with a
///   stored record, runs `on_create`, then inserts it.
/// * **Get** / **Find**: return clones; `Find` scans with [`Record::matches`].
/// * **Update** / **Action**: run the hook on a copy, re-check conflicts,
///   and commit the copy only when everything succeeded.
/// * **Delete**: runs `on_delete`, then removes the record.
pub struct StoreActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Record> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// * `buffer_size` - capacity of the request channel; senders wait when it is full.
    /// * `next_id_fn` - generates ids for creates that do not request one.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, StoreClient::new(sender))
    }

    fn find_conflict(&self, id: &T::Id, candidate: &T) -> Option<String> {
        self.store
            .iter()
            .filter(|(other_id, _)| *other_id != id)
            .find_map(|(_, existing)| candidate.conflicts_with(existing))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "User" instead of "fraserpay::model::user::User"
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { params, respond_to } => {
                    debug!(record_type, ?params, "Create");
                    let id = match T::requested_id(&params) {
                        Some(id) if self.store.contains_key(&id) => {
                            info!(record_type, %id, "Duplicate create refused");
                            let _ = respond_to.send(Err(StoreError::AlreadyExists(id.to_string())));
                            continue;
                        }
                        Some(id) => id,
                        None => (self.next_id_fn)(),
                    };

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(record_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(reason) = self.find_conflict(&id, &item) {
                        warn!(record_type, %id, %reason, "Create conflicts");
                        let _ = respond_to.send(Err(StoreError::Conflict(reason)));
                        continue;
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(record_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(record_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(record_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Find { filter, respond_to } => {
                    let found: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(record_type, ?filter, hits = found.len(), "Find");
                    let _ = respond_to.send(Ok(found));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?update, "Update");
                    let Some(mut candidate) = self.store.get(&id).cloned() else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = candidate.on_update(update, &context).await {
                        warn!(record_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    if let Some(reason) = self.find_conflict(&id, &candidate) {
                        warn!(record_type, %id, %reason, "Update conflicts");
                        let _ = respond_to.send(Err(StoreError::Conflict(reason)));
                        continue;
                    }
                    self.store.insert(id.clone(), candidate.clone());
                    info!(record_type, %id, "Updated");
                    let _ = respond_to.send(Ok(candidate));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(record_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(record_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(record_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(record_type, %id, ?action, "Action");
                    let Some(mut candidate) = self.store.get(&id).cloned() else {
                        warn!(record_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = match candidate.handle_action(action, &context).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(record_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(StoreError::Rejected(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(reason) = self.find_conflict(&id, &candidate) {
                        warn!(record_type, %id, %reason, "Action conflicts");
                        let _ = respond_to.send(Err(StoreError::Conflict(reason)));
                        continue;
                    }
                    self.store.insert(id.clone(), candidate);
                    info!(record_type, %id, "Action ok");
                    let _ = respond_to.send(Ok(result));
                }
            }
        }

        info!(record_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Locker {
        id: u64,
        code: String,
        coins: u32,
    }

    #[derive(Debug)]
    struct LockerCreate {
        id: Option<u64>,
        code: String,
    }

    #[derive(Debug)]
    enum LockerAction {
        Withdraw(u32),
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    enum LockerError {
        #[error("empty locker")]
        Empty,
        #[error("blank code")]
        BlankCode,
    }

    #[async_trait]
    impl Record for Locker {
        type Id = u64;
        type Create = LockerCreate;
        type Update = String;
        type Filter = String;
        type Action = LockerAction;
        type ActionResult = u32;
        type Context = ();
        type Error = LockerError;

        fn requested_id(params: &LockerCreate) -> Option<u64> {
            params.id
        }

        fn from_create_params(id: u64, params: LockerCreate) -> Result<Self, LockerError> {
            if params.code.is_empty() {
                return Err(LockerError::BlankCode);
            }
            Ok(Self {
                id,
                code: params.code,
                coins: 3,
            })
        }

        fn conflicts_with(&self, other: &Self) -> Option<String> {
            (self.code == other.code).then(|| format!("code {} taken", self.code))
        }

        fn matches(&self, code: &String) -> bool {
            &self.code == code
        }

        async fn on_update(&mut self, code: String, _ctx: &()) -> Result<(), LockerError> {
            self.code = code;
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: LockerAction,
            _ctx: &(),
        ) -> Result<u32, LockerError> {
            match action {
                LockerAction::Withdraw(n) => {
                    // mutate first so a failed action proves the copy was discarded
                    self.coins = self.coins.saturating_sub(n);
                    if n > 3 {
                        return Err(LockerError::Empty);
                    }
                    Ok(self.coins)
                }
            }
        }
    }

    fn spawn_lockers() -> StoreClient<Locker> {
        let counter = AtomicU64::new(100);
        let (actor, client) = StoreActor::<Locker>::new(8, move || counter.fetch_add(1, Ordering::SeqCst));
        tokio::spawn(actor.run(()));
        client
    }

    fn create(code: &str) -> LockerCreate {
        LockerCreate {
            id: None,
            code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_get_and_find() {
        let client = spawn_lockers();
        let id = client.create(create("A1")).await.unwrap();
        assert_eq!(id, 100);

        let locker = client.get(id).await.unwrap().unwrap();
        assert_eq!(locker.code, "A1");

        let hits = client.find("A1".to_string()).await.unwrap();
        assert_eq!(hits, vec![locker]);
        assert!(client.find("B2".to_string()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_conflicting_create_and_update_are_refused() {
        let client = spawn_lockers();
        client.create(create("A1")).await.unwrap();
        let second = client.create(create("B2")).await.unwrap();

        let err = client.create(create("A1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let err = client.update(second, "A1".to_string()).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(client.get(second).await.unwrap().unwrap().code, "B2");
    }

    #[tokio::test]
    async fn test_requested_id_is_used_once() {
        let client = spawn_lockers();
        let params = LockerCreate {
            id: Some(7),
            code: "Z9".to_string(),
        };
        assert_eq!(client.create(params).await.unwrap(), 7);

        let again = LockerCreate {
            id: Some(7),
            code: "Y8".to_string(),
        };
        let err = client.create(again).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(ref id) if id == "7"));
        assert!(client.find("Y8".to_string()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_action_leaves_record_untouched() {
        let client = spawn_lockers();
        let id = client.create(create("A1")).await.unwrap();

        let err = client
            .perform_action(id, LockerAction::Withdraw(5))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_rejected::<LockerError>().unwrap(), LockerError::Empty);
        assert_eq!(client.get(id).await.unwrap().unwrap().coins, 3);

        let left = client
            .perform_action(id, LockerAction::Withdraw(2))
            .await
            .unwrap();
        assert_eq!(left, 1);
    }

    #[tokio::test]
    async fn test_rejected_create_and_missing_records() {
        let client = spawn_lockers();
        let err = client.create(create("")).await.unwrap_err();
        assert_eq!(err.downcast_rejected::<LockerError>().unwrap(), LockerError::BlankCode);

        assert!(client.get(42).await.unwrap().is_none());
        assert!(matches!(
            client.update(42, "X".to_string()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(client.delete(42).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_closed_store_is_unavailable() {
        let counter = AtomicU64::new(1);
        let (actor, client) = StoreActor::<Locker>::new(8, move || counter.fetch_add(1, Ordering::SeqCst));
        let handle = tokio::spawn(actor.run(()));

        let id = client.create(create("A1")).await.unwrap();
        client.delete(id).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());

        handle.abort();
        let _ = handle.await;
        assert!(matches!(client.get(id).await, Err(StoreError::Unavailable)));
    }
}
