//! Creates users and booths from validated import files.

use super::csv::{parse_document, CsvDocument, CsvError, CsvRow, Row};
use super::validate::{validate_rows, ImportKind, ValidationError};
use crate::clients::{BoothClient, UserClient};
use crate::model::{parse_dollars, BoothCreate, ProductCreate, Role, UserCreate};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// The whole file was refused; nothing was created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error(transparent)]
    Csv(#[from] CsvError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A row that did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub created: usize,
    pub failed: Vec<RowFailure>,
}

impl ImportReport {
    fn fail(&mut self, line: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(line, %reason, "Import row failed");
        self.failed.push(RowFailure { line, reason });
    }
}

fn field<'a>(row: &'a Row, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or_default()
}

/// Builds a user profile from an import row. Imported users start with a
/// zero balance.
pub fn user_from_row(row: &Row) -> Result<UserCreate, String> {
    let role: Role = field(row, "role").parse().map_err(|e| format!("{e}"))?;
    Ok(UserCreate::student(field(row, "studentNumber"), field(row, "name"), field(row, "email")).with_role(role))
}

/// Builds a booth from an import row, including any `productN*` columns.
///
/// Products are numbered from 1 and read until the first missing
/// `productNName` column. A product with a blank name is skipped.
pub fn booth_from_row(row: &Row) -> Result<BoothCreate, String> {
    let mut booth = BoothCreate::new(field(row, "name"), field(row, "description"), field(row, "pin"));
    for n in 1.. {
        let Some(name) = row.get(&format!("product{n}Name")) else {
            break;
        };
        if name.is_empty() {
            continue;
        }
        let price = parse_dollars(field(row, &format!("product{n}Price")))
            .map_err(|e| format!("product {n}: {e}"))?;
        let mut product = ProductCreate::new(name.clone(), price);
        let image = field(row, &format!("product{n}Image"));
        if !image.is_empty() {
            product = product.with_image(image);
        }
        booth = booth.with_product(product);
    }
    Ok(booth)
}

/// Bulk import into the user and booth stores.
///
/// Rows are created one at a time. A failing row is reported and the rest
/// of the file is still imported.
#[derive(Clone, Debug)]
pub struct Importer {
    users: UserClient,
    booths: BoothClient,
}

impl Importer {
    pub fn new(users: UserClient, booths: BoothClient) -> Self {
        Self { users, booths }
    }

    fn prepare(text: &str, kind: ImportKind) -> Result<(CsvDocument, ImportReport), ImportError> {
        let doc = parse_document(text)?;
        let rows: Vec<Row> = doc.rows.iter().map(|r| r.fields.clone()).collect();
        validate_rows(&rows, kind)?;

        let mut report = ImportReport::default();
        for rejected in &doc.rejected {
            report.fail(
                rejected.line,
                format!("expected {} fields, found {}", rejected.expected, rejected.found),
            );
        }
        Ok((doc, report))
    }

    #[instrument(skip(self, text))]
    pub async fn import_users(&self, text: &str) -> Result<ImportReport, ImportError> {
        let (doc, mut report) = Self::prepare(text, ImportKind::Users)?;
        for CsvRow { line, fields } in doc.rows {
            let created = match user_from_row(&fields) {
                Ok(params) => self.users.create_user(params).await.map_err(|e| e.to_string()),
                Err(reason) => Err(reason),
            };
            match created {
                Ok(_) => report.created += 1,
                Err(reason) => report.fail(line, reason),
            }
        }
        info!(created = report.created, failed = report.failed.len(), "Users imported");
        Ok(report)
    }

    #[instrument(skip(self, text))]
    pub async fn import_booths(&self, text: &str) -> Result<ImportReport, ImportError> {
        let (doc, mut report) = Self::prepare(text, ImportKind::Booths)?;
        for CsvRow { line, fields } in doc.rows {
            let created = match booth_from_row(&fields) {
                Ok(params) => self.booths.create_booth(params).await.map_err(|e| e.to_string()),
                Err(reason) => Err(reason),
            };
            match created {
                Ok(_) => report.created += 1,
                Err(reason) => report.fail(line, reason),
            }
        }
        info!(created = report.created, failed = report.failed.len(), "Booths imported");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::csv::parse_rows;
    use crate::import::templates::BOOTH_WITH_PRODUCTS_TEMPLATE;

    #[test]
    fn test_booth_products_are_read_in_order() {
        let rows = parse_rows(BOOTH_WITH_PRODUCTS_TEMPLATE).unwrap();
        let booth = booth_from_row(&rows[0]).unwrap();
        assert_eq!(booth.name, "Sample Booth");
        assert_eq!(booth.products.len(), 2);
        assert_eq!(booth.products[0].price, 999);
        assert_eq!(booth.products[0].image.as_deref(), Some("https://example.com/image1.jpg"));
        assert_eq!(booth.products[1].price, 1499);
        assert_eq!(booth.products[1].image, None);

        let hot_dogs = booth_from_row(&rows[1]).unwrap();
        assert_eq!(hot_dogs.products[1].name, "Soda");
        assert_eq!(hot_dogs.products[1].price, 250);
    }

    #[test]
    fn test_bad_price_fails_the_row() {
        let rows = parse_rows("name,description,pin,product1Name,product1Price\nA,B,1,Pie,free").unwrap();
        let err = booth_from_row(&rows[0]).unwrap_err();
        assert!(err.starts_with("product 1"), "{err}");
    }

    #[test]
    fn test_user_role_is_parsed() {
        let rows = parse_rows("studentNumber,name,email,role\n1,A,a@x.org,booth\n2,B,b@x.org,wizard").unwrap();
        assert_eq!(user_from_row(&rows[0]).unwrap().role, Role::BoothStaff);
        assert!(user_from_row(&rows[1]).is_err());
    }
}
