use crate::types::errors::CoercionError;
use crate::types::{Age, FraudFlag};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::trace;

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_YEAR: i64 = 365;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M"
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y"
];

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("regex is valid"));

/// Parses a float that may use either `,` or `.` as its decimal separator.
///
/// Never fails: anything unparsable (including `NaN`) comes back as `None`.
pub fn safe_float(raw: &str) -> Option<f64> {
    try_float(raw)
        .inspect_err(|error| trace!("{error}"))
        .ok()
}

/// Same separator policy as [`safe_float`], but keeps the exact decimal value.
pub fn safe_decimal(raw: &str) -> Option<Decimal> {
    let normalized = normalize_separator(raw)?;

    Decimal::from_str(&normalized)
        .map_err(|_| CoercionError::InvalidNumber(raw.to_string()))
        .inspect_err(|error| trace!("{error}"))
        .ok()
}

/// Pulls the first run of digits out of a raw fraud flag (`"1.0"` -> 1, `"yes"` -> 0).
pub fn extract_fraud_flag(raw: &str) -> FraudFlag {
    DIGIT_RUN.find(raw)
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

/// Parses a transaction timestamp into naive local time.
///
/// Offsets (RFC 3339) are converted to the local timezone, date-only values land on midnight.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, CoercionError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(CoercionError::Empty);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Local).naive_local());
    }

    DATETIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| parse_date_only(value).map(|date| date.and_time(NaiveTime::MIN)))
        .ok_or_else(|| CoercionError::InvalidTimestamp(value.to_string()))
}

/// Parses a calendar date, falling back to the date part of any accepted timestamp.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoercionError> {
    let value = raw.trim();

    if value.is_empty() {
        return Err(CoercionError::Empty);
    }

    parse_date_only(value)
        .or_else(|| parse_timestamp(value).ok().map(|timestamp| timestamp.date()))
        .ok_or_else(|| CoercionError::InvalidDate(value.to_string()))
}

/// Whole years between `dob` and `now`: elapsed days floored, then floor-divided by 365.
pub fn age_in_years(dob: NaiveDate, now: NaiveDateTime) -> Age {
    let elapsed = now.signed_duration_since(dob.and_time(NaiveTime::MIN));

    elapsed.num_seconds()
        .div_euclid(SECONDS_PER_DAY)
        .div_euclid(DAYS_PER_YEAR)
}

fn try_float(raw: &str) -> Result<f64, CoercionError> {
    let normalized = normalize_separator(raw).ok_or(CoercionError::Empty)?;

    match normalized.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(CoercionError::InvalidNumber(raw.to_string()))
    }
}

fn normalize_separator(raw: &str) -> Option<String> {
    let value = raw.trim();

    if value.is_empty() {
        return None;
    }

    Some(value.replace(',', "."))
}

fn parse_date_only(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS.iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
