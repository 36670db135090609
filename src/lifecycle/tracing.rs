//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter
//! filtered by `RUST_LOG` (default `info`).
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: `Actor started` / `Shutdown` with the final record count
//! - **Record operations**: `Created`, `Updated`, `Action ok`, `Deleted`, with
//!   `record_type` and `id` fields; failures at `warn`
//! - **Services**: one `info` line per outcome (`Access granted`,
//!   `Purchase complete`, `Users imported`), retries at `warn`
//! - **Money that may be lost**: a failed refund or a failed membership
//!   undo is logged at `error`
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info fraserpay demo
//! RUST_LOG=fraserpay::store=debug fraserpay demo   # full payloads
//! ```
//!
//! With `RUST_LOG=info` a purchase looks like:
//!
//! ```text
//! INFO Action ok record_type="User" id=6f0c...
//! INFO Action ok record_type="Booth" id=1d2e...
//! INFO Purchase recorded id=req-1 total=450
//! INFO Created record_type="TransactionRecord" id=req-1 size=1
//! INFO process_purchase: Purchase complete transaction_id=req-1 total=450 replayed=false
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // record_type carries the context instead
        .compact()
        .init();
}
