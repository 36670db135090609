//! Student registration and sign-in.

pub mod error;
pub mod service;

pub use crate::clients::{IdentityClient, Session};
pub use error::AuthError;
pub use service::{AuthService, RegistrationForm};
