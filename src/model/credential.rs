use super::ids::UserId;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// An email/password sign-in for one user.
///
/// Only a salted SHA-256 digest of the password is kept. A single fast
/// hash pass is not a production password hash; a deployment would swap in
/// a slow KDF such as argon2 or bcrypt.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub id: UserId,
    pub email: String,
    salt: String,
    digest: String,
    pub created_at: DateTime<Utc>,
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl Credential {
    pub fn new(id: UserId, params: CredentialCreate) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self {
            id,
            email: params.email,
            digest: password_digest(&salt, &params.password),
            salt,
            created_at: Utc::now(),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        password_digest(&self.salt, password) == self.digest
    }
}

/// Payload for signing up. `Debug` never prints the password.
#[derive(Clone)]
pub struct CredentialCreate {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCreate")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Lookups over credentials.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialFilter {
    /// Compared case-insensitively.
    Email(String),
}
