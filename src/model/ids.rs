//! Typed identifiers.
//!
//! Every id is an opaque string on the wire. Freshly generated ids are
//! UUID v4, matching the uids the hosted identity provider issued.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// A fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifies a user profile; shared with the identity provider's uid.
    UserId
);
string_id!(
    /// Identifies a booth.
    BoothId
);
string_id!(
    /// Identifies a product within a booth catalog.
    ProductId
);
string_id!(
    /// Identifies a ledger entry.
    ///
    /// Generated by the client before submission and used as the
    /// idempotency key: the ledger stores at most one entry per id.
    TransactionId
);
