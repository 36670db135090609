//! # FraserPay
//!
//! > **Cashless ticket payments for a school fundraising event.**
//!
//! Students carry a ticket balance. Booths sell products and charge that
//! balance; staff join a booth with its PIN, and the student council
//! manages booths and users, including bulk imports from CSV.
//!
//! ## 🏗️ Design
//!
//! Every kind of record (users, booths, ledger entries, credentials) lives
//! in its own **store actor**: a Tokio task that owns the records and serves
//! requests one at a time over a channel. Because a single task owns each
//! map, invariants like "a debit never takes the balance below zero" or
//! "booth PINs are unique" are checked and written in one step without
//! locks.
//!
//! The services on top (access verification, purchases, registration,
//! import) receive typed client handles when they are built. Nothing is a
//! global.
//!
//! ### Money
//! All amounts are integer cents ([`model::Cents`]). Dollar strings are
//! parsed exactly at the import boundary and formatted only for display.
//!
//! ### Errors
//! Each store and service has its own `thiserror` enum. They all classify
//! into [`error::ErrorKind`], and only `Network` failures are retried
//! ([`retry::with_retry`]).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`store`])
//! The generic [`StoreActor`](store::StoreActor) and the [`Record`](store::Record)
//! trait every stored type implements, plus [`MockStore`](store::mock::MockStore)
//! for tests.
//!
//! ### 2. The Stores ([`user_actor`], [`booth_actor`], [`ledger_actor`], [`identity_actor`])
//! `Record` implementations, actions and errors for each type. The ledger's
//! `on_create` hook is where a purchase actually happens.
//!
//! ### 3. The Interface ([`clients`])
//! Typed wrappers such as [`UserClient`](clients::UserClient) and
//! [`LedgerClient`](clients::LedgerClient).
//!
//! ### 4. The Services ([`access`], [`purchase`], [`auth`], [`import`])
//! PIN verification, booth checkout, registration and login, CSV import.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`FraserPaySystem`](lifecycle::FraserPaySystem) starts and wires the
//! stores; [`Config`](lifecycle::Config) and
//! [`setup_tracing`](lifecycle::setup_tracing) cover the rest.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Walk through a join, a purchase and an import
//! RUST_LOG=info cargo run -- demo
//!
//! # Print an import template
//! cargo run -- template booths-with-products
//! ```

pub mod access;
pub mod auth;
pub mod booth_actor;
pub mod clients;
pub mod error;
pub mod format;
pub mod identity_actor;
pub mod import;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
pub mod purchase;
pub mod retry;
pub mod store;
pub mod user_actor;
