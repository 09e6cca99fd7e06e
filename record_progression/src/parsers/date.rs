use chrono::{Datelike, NaiveDate};

use crate::defaults::DAYS_PER_YEAR;
use crate::error::RecordError;

/// Date layouts found in record tables, tried in order.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%Y-%m-%d"];

/// Parse a record date, ignoring a trailing bracketed annotation such as a
/// footnote marker (`"June 1, 1994[12]"`).
pub fn parse_date(date: &str) -> Result<NaiveDate, RecordError> {
    let stripped = date.split('[').next().unwrap_or_default().trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(stripped, format).ok())
        .ok_or_else(|| {
            log::warn!("Unparsed date: {}", stripped);
            RecordError::UnparseableDate(stripped.to_string())
        })
}

/// Continuous time axis value: the calendar year plus the elapsed share of it.
pub fn year_fraction(date: NaiveDate) -> f64 {
    date.year() as f64 + date.ordinal() as f64 / DAYS_PER_YEAR
}
