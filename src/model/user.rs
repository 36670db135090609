use super::ids::{BoothId, UserId};
use super::money::Cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What a user is allowed to do.
///
/// Wire names follow the hosted store (`student`, `booth`, `sac`); the
/// spelled-out forms are accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "booth", alias = "booth-staff")]
    BoothStaff,
    #[serde(rename = "sac", alias = "admin")]
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0:?}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "booth" | "booth-staff" | "booth_staff" => Ok(Role::BoothStaff),
            "sac" | "admin" => Ok(Role::Admin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Student => "student",
            Role::BoothStaff => "booth",
            Role::Admin => "sac",
        })
    }
}

/// A registered user and their ticket balance.
///
/// # Store
/// Managed by a [`StoreActor`](crate::store::StoreActor); see
/// [`impl Record for User`](#impl-Record-for-User) for the create/update
/// payloads and the balance actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub student_number: String,
    pub role: Role,
    /// Balance in cents. Only ledger debits/credits change it.
    #[serde(rename = "tickets")]
    pub balance: Cents,
    #[serde(default)]
    pub booth_access: Vec<BoothId>,
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The QR payload scanned at booths; a pure function of the id.
    pub fn qr_payload(id: &UserId) -> String {
        format!("USER:{id}")
    }

    /// Builds a user from its id and creation payload.
    pub fn from_parts(id: UserId, params: UserCreate) -> Self {
        Self {
            qr_code: Self::qr_payload(&id),
            id,
            name: params.name,
            email: params.email,
            student_number: params.student_number,
            role: params.role,
            balance: params.balance,
            booth_access: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_booth_access(&self, booth_id: &BoothId) -> bool {
        self.booth_access.contains(booth_id)
    }
}

/// Payload for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    /// Uid issued by the identity provider; generated when absent.
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub student_number: String,
    pub role: Role,
    pub balance: Cents,
}

impl UserCreate {
    /// A student with an empty balance.
    pub fn student(
        student_number: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            student_number: student_number.into(),
            role: Role::Student,
            balance: 0,
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_balance(mut self, balance: Cents) -> Self {
        self.balance = balance;
        self
    }
}

/// Payload for updating an existing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// Exact-match lookups over users.
#[derive(Debug, Clone, PartialEq)]
pub enum UserFilter {
    All,
    StudentNumber(String),
    /// Compared case-insensitively.
    Email(String),
}
