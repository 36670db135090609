//! Minimal CSV reader for the bulk-import files.
//!
//! The format is deliberately small: one record per line, a header line,
//! commas as separators, double quotes around fields that contain commas
//! and `""` for a literal quote inside a quoted field. Multi-line quoted
//! fields are not supported.

use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// One data row keyed by header name.
pub type Row = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    #[error("CSV must have at least a header row and one data row")]
    MissingData,
}

/// A data row whose field count did not match the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the input.
    pub line: usize,
    pub expected: usize,
    pub found: usize,
}

/// A data row and the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Row,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub header: Vec<String>,
    pub rows: Vec<CsvRow>,
    pub rejected: Vec<RowError>,
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parses `text`, keeping track of rows that had to be dropped.
pub fn parse_document(text: &str) -> Result<CsvDocument, CsvError> {
    // Both \n and \r\n line endings
    let lines: Vec<&str> = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    if lines.len() < 2 {
        return Err(CsvError::MissingData);
    }

    let header: Vec<String> = lines[0].split(',').map(|h| h.trim().to_string()).collect();
    let mut rows = Vec::new();
    let mut rejected = Vec::new();

    for (index, raw) in lines.iter().enumerate().skip(1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let values = split_fields(line);
        if values.len() != header.len() {
            warn!(line = index + 1, expected = header.len(), found = values.len(), "Dropping CSV row");
            rejected.push(RowError {
                line: index + 1,
                expected: header.len(),
                found: values.len(),
            });
            continue;
        }
        rows.push(CsvRow {
            line: index + 1,
            fields: header.iter().cloned().zip(values).collect(),
        });
    }

    Ok(CsvDocument {
        header,
        rows,
        rejected,
    })
}

/// Parses `text` into rows, silently skipping rows with the wrong field count.
pub fn parse_rows(text: &str) -> Result<Vec<Row>, CsvError> {
    Ok(parse_document(text)?
        .rows
        .into_iter()
        .map(|row| row.fields)
        .collect())
}
