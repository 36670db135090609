//! Money arithmetic in integer cents.
//!
//! Balances and prices are whole cents (`u64`). Dollar amounts only ever
//! appear at the edges: CSV price columns on the way in and
//! [`format_currency`](crate::format::format_currency) on the way out.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// An amount of money in cents.
pub type Cents = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("Invalid price: {0:?}")]
    Invalid(String),
    #[error("Negative price: {0}")]
    Negative(String),
    #[error("Price has more than two decimal places: {0}")]
    SubCent(String),
    #[error("Price out of range: {0}")]
    OutOfRange(String),
}

/// `Σ price × quantity`, or `None` if it would overflow.
pub fn cart_total<I>(lines: I) -> Option<Cents>
where
    I: IntoIterator<Item = (Cents, u32)>,
{
    lines.into_iter().try_fold(0u64, |total, (price, quantity)| {
        price
            .checked_mul(u64::from(quantity))
            .and_then(|subtotal| total.checked_add(subtotal))
    })
}

/// Parses a dollar amount such as `9.99`, `$2.50` or `5` into cents
/// without going through floating point.
pub fn parse_dollars(raw: &str) -> Result<Cents, PriceError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let amount = Decimal::from_str(digits).map_err(|_| PriceError::Invalid(raw.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(raw.to_string()));
    }
    let cents = amount * Decimal::ONE_HUNDRED;
    if cents.fract() != Decimal::ZERO {
        return Err(PriceError::SubCent(raw.to_string()));
    }
    cents
        .to_u64()
        .ok_or_else(|| PriceError::OutOfRange(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_total_is_exact_integer_sum() {
        // 0.1 + 0.2 style amounts that drift in floating point
        let total = cart_total([(10, 3), (20, 3), (999, 1)]).unwrap();
        assert_eq!(total, 10 * 3 + 20 * 3 + 999);
        assert_eq!(cart_total(Vec::new()), Some(0));
    }

    #[test]
    fn test_cart_total_overflow_is_none() {
        assert_eq!(cart_total([(u64::MAX, 2)]), None);
        assert_eq!(cart_total([(u64::MAX, 1), (1, 1)]), None);
    }

    #[test]
    fn test_parse_dollars() {
        assert_eq!(parse_dollars("9.99"), Ok(999));
        assert_eq!(parse_dollars(" $2.50 "), Ok(250));
        assert_eq!(parse_dollars("5"), Ok(500));
        assert_eq!(parse_dollars("14.9"), Ok(1490));
        assert_eq!(parse_dollars("0"), Ok(0));
    }

    #[test]
    fn test_parse_dollars_rejects_bad_input() {
        assert!(matches!(parse_dollars("abc"), Err(PriceError::Invalid(_))));
        assert!(matches!(parse_dollars(""), Err(PriceError::Invalid(_))));
        assert!(matches!(parse_dollars("-1.00"), Err(PriceError::Negative(_))));
        assert!(matches!(parse_dollars("1.005"), Err(PriceError::SubCent(_))));
    }
}
