//! Pure transforms applied to raw input lines by the typed readers.
//!
//! Every function takes the line exactly as typed and either returns the
//! converted value or an error whose message is shown to the user after the
//! caller's error prompt. Nothing here touches the terminal.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

pub const NUMBER_OUT_OF_BOUNDS: &str = "Number is out of bounds";
pub const PREDICATE_FAILED: &str = "Input does not satisfy the predicate.";
pub const NOT_AN_OPTION: &str = "Input does not contain valid options.";
pub const DATE_OUT_OF_RANGE: &str = "Date is out of range.";

static ISO_DATE_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// Parse any `FromStr` number, surfacing the parser's own message.
pub fn parse_number<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|err| anyhow!("{err}"))
}

/// Parse a real number and require `min <= value <= max`.
///
/// NaN never satisfies the range.
pub fn parse_number_in_range(raw: &str, min: f64, max: f64) -> Result<f64> {
    let value: f64 = parse_number(raw)?;
    if value.is_nan() || value < min || value > max {
        return Err(anyhow!(NUMBER_OUT_OF_BOUNDS));
    }
    Ok(value)
}

pub fn check_predicate<P>(raw: &str, predicate: P) -> Result<String>
where
    P: Fn(&str) -> bool,
{
    if !predicate(raw) {
        return Err(anyhow!(PREDICATE_FAILED));
    }
    Ok(raw.to_string())
}

/// Exact, case-sensitive membership. An empty option set rejects everything.
pub fn check_option(raw: &str, options: &HashSet<String>) -> Result<String> {
    if !options.contains(raw) {
        return Err(anyhow!(NOT_AN_OPTION));
    }
    Ok(raw.to_string())
}

/// Parse a calendar date written as `YYYY-MM-DD`.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate> {
    if !ISO_DATE_RE.is_match(raw) {
        return Err(anyhow!("Text '{raw}' could not be parsed as YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| anyhow!("Text '{raw}' could not be parsed: {err}"))
}

/// Parse an ISO date and require `from <= date <= to`.
pub fn parse_iso_date_in_range(raw: &str, from: NaiveDate, to: NaiveDate) -> Result<NaiveDate> {
    let date = parse_iso_date(raw)?;
    if date < from || date > to {
        return Err(anyhow!(DATE_OUT_OF_RANGE));
    }
    Ok(date)
}
