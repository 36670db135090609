//! Generic record store engine.
//!
//! Each record type (users, booths, ledger entries, credentials) lives in
//! its own [`StoreActor`], a Tokio task that owns the records and serves
//! requests sequentially. The rest of the crate talks to it through a
//! cloneable [`StoreClient`].
//!
//! - [`Record`] - what a record type must provide
//! - [`StoreActor`] - the owning task
//! - [`StoreClient`] / [`RecordClient`] - the request side
//! - [`StoreError`] - engine-level failures
//!
//! See [`mock`] for testing services without running actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::RecordClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use record::Record;
