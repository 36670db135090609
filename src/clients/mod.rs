//! Typed wrappers around [`StoreClient`](crate::store::StoreClient).
//!
//! Services never send raw store requests; they hold these clients, which
//! unwrap action results and convert store errors into each record's own
//! error type.

pub mod booth_client;
pub mod identity_client;
pub mod ledger_client;
pub mod user_client;

pub use booth_client::*;
pub use identity_client::*;
pub use ledger_client::*;
pub use user_client::*;
