//! Bulk import of users and booths from CSV.
//!
//! - [`csv`] - tolerant line-based reader
//! - [`validate`] - required-column checks per import kind
//! - [`templates`] - sample files
//! - [`Importer`] - turns rows into records

pub mod csv;
pub mod importer;
pub mod templates;
pub mod validate;

pub use csv::{parse_document, parse_rows, CsvDocument, CsvError, CsvRow, Row, RowError};
pub use importer::{booth_from_row, user_from_row, ImportError, ImportReport, Importer, RowFailure};
pub use templates::{template, TemplateKind, BOOTH_TEMPLATE, BOOTH_WITH_PRODUCTS_TEMPLATE, USER_TEMPLATE};
pub use validate::{validate_rows, ImportKind, ValidationError};
