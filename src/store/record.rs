//! # Record Trait
//!
//! The contract every stored record (users, booths, ledger entries,
//! credentials) implements so a single generic [`StoreActor`](super::StoreActor)
//! can own and serve it.
//!
//! Associated types keep each store's payloads apart: a `Booth` store only
//! accepts `BoothCreate`, a `User` store only `UserCreate`, and so on.
//! Hooks have default implementations wherever "do nothing" is a sensible
//! answer.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be managed by a [`StoreActor`](super::StoreActor).
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other stores. The `Context`
/// type is handed to the actor's `run()` rather than its constructor, which
/// lets stores that depend on each other (the ledger needs users and booths)
/// be created first and wired afterwards.
#[async_trait]
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Unique identifier of the record.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload used to create a record.
    type Create: Send + Sync + Debug;

    /// Payload used to update an existing record.
    type Update: Send + Sync + Debug;

    /// Exact-match lookup criteria (student number, email, PIN, ...).
    type Filter: Send + Sync + Debug;

    /// Record-specific mutations beyond plain updates.
    type Action: Send + Sync + Debug;

    /// Result returned by [`Record::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` when none are needed.
    type Context: Send + Sync;

    /// The record's own error type. It travels back to the caller boxed in
    /// [`StoreError::Rejected`](super::StoreError::Rejected).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Client-assigned id for this create request, if any.
    ///
    /// When this returns `Some`, the store uses it instead of generating an
    /// id, and a second create with the same id is refused with
    /// [`StoreError::AlreadyExists`](super::StoreError::AlreadyExists)
    /// before any hook runs.
    fn requested_id(_params: &Self::Create) -> Option<Self::Id> {
        None
    }

    /// Builds the record from its id and creation payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Returns a description of the clash when `self` may not coexist with
    /// `other` (duplicate student number, duplicate PIN, ...).
    fn conflicts_with(&self, _other: &Self) -> Option<String> {
        None
    }

    /// Whether this record satisfies `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update. Runs against a copy that is committed only on `Ok`.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handles a record-specific action. Runs against a copy that is
    /// committed only on `Ok`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
