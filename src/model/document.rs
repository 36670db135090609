//! Decoding records received as JSON documents.
//!
//! Field presence and types are checked by `serde` when the document is
//! parsed; the checks serde cannot express (derived fields, set
//! semantics) are done here. Nothing downstream has to re-validate.

use super::booth::Booth;
use super::user::User;
use std::collections::HashSet;
use std::hash::Hash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("QR payload {found:?} does not match user {id}")]
    QrMismatch { id: String, found: String },
    #[error("Duplicate entry {0} in {1}")]
    Duplicate(String, &'static str),
}

fn ensure_unique<T: Eq + Hash + ToString>(items: &[T], field: &'static str) -> Result<(), DocumentError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(DocumentError::Duplicate(item.to_string(), field));
        }
    }
    Ok(())
}

/// Parses and checks a user document.
pub fn decode_user(json: &str) -> Result<User, DocumentError> {
    let user: User = serde_json::from_str(json)?;
    let expected = User::qr_payload(&user.id);
    if user.qr_code != expected {
        return Err(DocumentError::QrMismatch {
            id: user.id.to_string(),
            found: user.qr_code,
        });
    }
    ensure_unique(&user.booth_access, "booth_access")?;
    Ok(user)
}

/// Parses and checks a booth document.
pub fn decode_booth(json: &str) -> Result<Booth, DocumentError> {
    let booth: Booth = serde_json::from_str(json)?;
    ensure_unique(&booth.members, "members")?;
    let product_ids: Vec<_> = booth.products.iter().map(|p| &p.id).collect();
    ensure_unique(&product_ids, "products")?;
    Ok(booth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    const USER: &str = r#"{
        "id": "u1",
        "name": "Ann",
        "email": "ann@example.com",
        "student_number": "123456",
        "role": "sac",
        "tickets": 1250,
        "booth_access": ["b1"],
        "qr_code": "USER:u1",
        "created_at": "2025-03-15T10:00:00Z"
    }"#;

    #[test]
    fn test_decode_user_uses_wire_names() {
        let user = decode_user(USER).unwrap();
        assert_eq!(user.balance, 1250);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.booth_access.len(), 1);
    }

    #[test]
    fn test_decode_user_rejects_negative_balance() {
        let doc = USER.replace("1250", "-5");
        assert!(matches!(decode_user(&doc), Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn test_decode_user_rejects_missing_and_unknown_fields() {
        let missing = USER.replace(r#""student_number": "123456","#, "");
        assert!(matches!(decode_user(&missing), Err(DocumentError::Malformed(_))));

        let unknown = USER.replace(r#""role": "sac","#, r#""role": "sac", "extra": 1,"#);
        assert!(matches!(decode_user(&unknown), Err(DocumentError::Malformed(_))));

        let bad_role = USER.replace(r#""sac""#, r#""janitor""#);
        assert!(matches!(decode_user(&bad_role), Err(DocumentError::Malformed(_))));
    }

    #[test]
    fn test_decode_user_checks_qr_payload() {
        let doc = USER.replace("USER:u1", "USER:u2");
        assert!(matches!(decode_user(&doc), Err(DocumentError::QrMismatch { .. })));
    }

    #[test]
    fn test_decode_booth_defaults_and_duplicates() {
        let doc = r#"{
            "id": "b1", "name": "Bake Sale", "description": "Cookies", "pin": "111111",
            "created_at": "2025-03-15T10:00:00Z"
        }"#;
        let booth = decode_booth(doc).unwrap();
        assert!(booth.members.is_empty());
        assert_eq!(booth.sales_total, 0);

        let dup = r#"{
            "id": "b1", "name": "Bake Sale", "description": "Cookies", "pin": "111111",
            "members": ["u1", "u1"], "created_at": "2025-03-15T10:00:00Z"
        }"#;
        assert!(matches!(decode_booth(dup), Err(DocumentError::Duplicate(_, "members"))));
    }
}
