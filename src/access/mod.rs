//! PIN-based access: the administrator PIN and booth join PINs.
//!
//! - [`AccessVerifier`] - checks a PIN and grants the matching access
//! - [`AccessScope`] / [`AccessGrant`] - what was asked for and what was granted
//! - [`AccessError`] - why it was refused

pub mod error;
pub mod verifier;

pub use error::AccessError;
pub use verifier::{AccessGrant, AccessScope, AccessVerifier};
