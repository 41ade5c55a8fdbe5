//! Conversion of raw form text into the typed values the calculators take.
//!
//! The parsers report failures; [`decimal_or_zero`] is the explicit opt-in for
//! the dashboard's habit of treating unreadable amounts as zero.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::ParseError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an amount such as `"901.52"`, `"901,52"` or `"1e3"`.
pub fn parse_decimal(raw: &str) -> Result<Decimal, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|_| ParseError::InvalidDecimal(raw.to_string()))
}

/// Parses a `YYYY-MM-DD` date. An empty field is `Ok(None)`, not an error.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}

pub fn decimal_or_zero(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };
    match parse_decimal(raw) {
        Ok(value) => value,
        Err(ParseError::Empty) => Decimal::ZERO,
        Err(err) => {
            tracing::debug!(%err, "coercing unreadable amount to zero");
            Decimal::ZERO
        }
    }
}

/// Like [`parse_date`] but folds malformed dates into "no date".
pub fn date_or_none(raw: Option<&str>) -> Option<NaiveDate> {
    match parse_date(raw?) {
        Ok(date) => date,
        Err(err) => {
            tracing::debug!(%err, "discarding unreadable date");
            None
        }
    }
}
