//! Plain data types: users, booths, products, ledger entries and
//! credentials, plus their create/update/filter payloads.
//!
//! The [`Record`](crate::store::Record) implementations live next to the
//! store that owns each type (`user_actor`, `booth_actor`, ...).

pub mod booth;
pub mod credential;
pub mod document;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod user;

pub use booth::*;
pub use credential::*;
pub use ids::*;
pub use money::*;
pub use transaction::*;
pub use user::*;
