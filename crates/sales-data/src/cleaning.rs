//! Value-level cleaning for the raw sales export.
//!
//! Every function here turns one raw CSV field into a typed value or a
//! [`SalesError`] describing the offending input. Row context is attached by
//! the reader.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use sales_core::error::{Result, SalesError};
use tracing::debug;

/// `<digits>[,<digits>] €`, separated by exactly one plain space as in the
/// export.
static UNIT_PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:,(\d+))? €$").expect("valid unit price regex"));

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// ── Dates ─────────────────────────────────────────────────────────────────────

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an ISO date-time whose date part is kept.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| SalesError::InvalidDate(raw.to_string()))
}

/// Parse the optional time-of-day column.
///
/// Only used for display, so an unreadable value becomes `None` instead of
/// failing the load.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let parsed = NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok();
    if parsed.is_none() {
        debug!("ignoring unreadable time value {:?}", raw);
    }
    parsed
}

// ── Prices ────────────────────────────────────────────────────────────────────

/// Parse a unit price written with a decimal comma and a trailing euro sign.
///
/// ```
/// use sales_data::cleaning::parse_unit_price;
///
/// assert_eq!(parse_unit_price("4,50 €").unwrap(), 4.5);
/// assert_eq!(parse_unit_price("12,00 €").unwrap(), 12.0);
/// assert!(parse_unit_price("abc").is_err());
/// ```
pub fn parse_unit_price(raw: &str) -> Result<f64> {
    let s = raw.trim();
    let caps = UNIT_PRICE_RE
        .captures(s)
        .ok_or_else(|| SalesError::InvalidPrice(raw.to_string()))?;

    let normalised = match caps.get(2) {
        Some(frac) => format!("{}.{}", &caps[1], frac.as_str()),
        None => caps[1].to_string(),
    };

    normalised
        .parse::<f64>()
        .map_err(|_| SalesError::InvalidPrice(raw.to_string()))
}

// ── Quantities and labels ─────────────────────────────────────────────────────

/// Parse a unit count. Must be a finite, non-negative number.
pub fn parse_quantity(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(q) if q.is_finite() && q >= 0.0 => Ok(q),
        _ => Err(SalesError::InvalidQuantity(raw.to_string())),
    }
}

/// Trim an article name, rejecting empty ones.
pub fn clean_article(raw: &str) -> Result<String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(SalesError::EmptyArticle);
    }
    Ok(s.to_string())
}

/// Keep the ticket number as an opaque label.
pub fn clean_ticket_number(raw: &str) -> String {
    raw.trim().to_string()
}
