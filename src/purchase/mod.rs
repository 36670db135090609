//! Booth purchases.
//!
//! - [`Cart`] - products picked for the current student
//! - [`PurchaseOrchestrator`] - checks, submits to the ledger, refreshes the balance
//! - [`Terminal`] - per-booth session state tying the two together

pub mod cart;
pub mod error;
pub mod orchestrator;
pub mod terminal;

pub use cart::{Cart, CartItem};
pub use error::PurchaseError;
pub use orchestrator::{Checkout, PurchaseOrchestrator, PurchaseOutcome, StudentSummary};
pub use terminal::Terminal;
