//! # System Lifecycle
//!
//! Starting, wiring and stopping the stores.
//!
//! [`FraserPaySystem::start`] creates the user, booth, ledger and identity
//! stores, then runs each on its own task. Dependencies are injected when a
//! store is run rather than when it is created: the ledger is handed user
//! and booth clients through its `run()` context, so every store can be
//! constructed independently first.
//!
//! ```rust,no_run
//! use fraserpay::lifecycle::{Config, FraserPaySystem};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let system = FraserPaySystem::start(Config::from_env()?);
//! let report = system.importer().import_users("studentNumber,name,email,role\n1,Ann,ann@x.org,student").await?;
//! assert_eq!(report.created, 1);
//! system.shutdown().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**, closing the sending side of each channel
//! 2. **Stores see the closure** when `recv()` returns `None`, and log their final size
//! 3. **Await** every task
//!
//! The dependency graph is acyclic (only the ledger depends on others),
//! so channel closure alone is enough to stop everything.

pub mod config;
pub mod system;
pub mod tracing;

pub use config::*;
pub use system::*;
pub use self::tracing::*;
