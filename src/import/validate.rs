use super::csv::Row;
use thiserror::Error;

/// Which records an import file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Users,
    /// Booths, optionally with `productN*` columns.
    Booths,
}

impl ImportKind {
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            ImportKind::Users => &["studentNumber", "name", "email", "role"],
            ImportKind::Booths => &["name", "description", "pin"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CSV file is empty")]
    Empty,
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// Checks that `rows` is non-empty and has every column `kind` requires.
///
/// Only the first row is inspected; every row shares the header's keys.
pub fn validate_rows(rows: &[Row], kind: ImportKind) -> Result<(), ValidationError> {
    let first = rows.first().ok_or(ValidationError::Empty)?;
    let missing: Vec<String> = kind
        .required_fields()
        .iter()
        .filter(|field| !first.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}
