//! Date helper functions

use chrono::{DateTime, Datelike, FixedOffset, TimeZone};

use crate::error::{Error, Result};

/// Abbreviated month names in Brazilian Portuguese
const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Parse a repository timestamp.
///
/// Accepts RFC 3339 (`2023-12-10T00:00:00Z`) and the repository's own offset
/// form without a colon (`2021-03-25T19:25:28+0000`).
pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<FixedOffset>> {
    let timestamp = timestamp.trim();
    DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|e| Error::Format(format!("{:?}: {}", timestamp, e)))
}

/// Format a publication date as `dd MMM yyyy` in Portuguese (`10 dez 2023`)
///
/// # Examples
/// ```ignore
/// format_display_date(Some("2023-12-10T00:00:00Z"), &Tz::UTC) // -> "10 dez 2023"
/// ```
pub fn format_display_date<Tz: TimeZone>(timestamp: Option<&str>, tz: &Tz) -> Result<String>
where
    Tz::Offset: std::fmt::Display,
{
    let timestamp =
        timestamp.ok_or_else(|| Error::Format("publication date is missing".to_string()))?;
    let date = parse_timestamp(timestamp)?.with_timezone(tz);
    let month = PT_BR_MONTHS[date.month0() as usize];
    Ok(date.format(&format!("%d {} %Y", month)).to_string())
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}
