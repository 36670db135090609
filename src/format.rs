//! Display helpers for amounts, dates and identifiers.

use crate::model::Cents;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// `1000` cents → `"$10.00"`, with thousands separators.
pub fn format_currency(cents: Cents) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}.{:02}", cents % 100)
}

/// `"Mar 15, 2024"`.
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// The student number, or `"N/A"` when there is none.
pub fn format_student_number(student_number: &str) -> &str {
    if student_number.is_empty() {
        "N/A"
    } else {
        student_number
    }
}

/// `75.4` → `"75%"`. Halves round away from zero.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value.round())
}
