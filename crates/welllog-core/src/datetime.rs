//! Date/time normalization for header fields.
//!
//! Source files spell timestamps many ways: DLIS origins carry
//! `creation_time` as a full date-time, LAS well sections a free-text
//! `DATE` such as `12-Mar-2019`. Header date fields are normalized to the
//! ISO 8601 extended format:
//!
//! - Date-times: `YYYY-MM-DDTHH:MM:SS`
//! - Dates: `YYYY-MM-DD`
//! - Date-times with an offset: RFC 3339 (`YYYY-MM-DDTHH:MM:SS+hh:mm`)
//!
//! Values that match none of the known spellings are left as they are.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

/// Date-time layouts with an explicit UTC offset.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y/%m/%d %H:%M:%S%:z",
];

/// Date-time layouts without an offset.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%b-%Y %H:%M:%S",
    "%d-%b-%Y %H:%M",
    "%d %b %Y %H:%M:%S",
    "%a %b %e %H:%M:%S %Y",
];

/// Date-only layouts.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%b %d, %Y",
    "%d.%m.%Y",
];

/// A successfully parsed source timestamp, keeping its precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDateTime {
    /// Date and time with a UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// Date and time without an offset.
    Local(NaiveDateTime),
    /// Calendar date only.
    Date(NaiveDate),
}

impl SourceDateTime {
    /// Formats the value in ISO 8601 extended format.
    pub fn to_iso8601_string(&self) -> String {
        match self {
            SourceDateTime::Zoned(value) => value.to_rfc3339_opts(SecondsFormat::Secs, false),
            SourceDateTime::Local(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
            SourceDateTime::Date(value) => value.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn has_time(&self) -> bool {
        !matches!(self, SourceDateTime::Date(_))
    }
}

/// Parses a source timestamp in any of the supported spellings.
///
/// Returns `None` for empty or unrecognized text.
pub fn parse_source_datetime(value: &str) -> Option<SourceDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(SourceDateTime::Zoned(zoned));
    }
    for format in ZONED_FORMATS {
        if let Ok(zoned) = DateTime::parse_from_str(trimmed, format) {
            return Some(SourceDateTime::Zoned(zoned));
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(SourceDateTime::Local(local));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(SourceDateTime::Date(date));
        }
    }
    None
}

/// Normalizes a source timestamp to ISO 8601, or `None` when unparseable.
///
/// # Examples
///
/// ```
/// use welllog_core::datetime::normalize_datetime;
///
/// assert_eq!(
///     normalize_datetime("2019-03-12 08:15:00").as_deref(),
///     Some("2019-03-12T08:15:00")
/// );
/// assert_eq!(normalize_datetime("12-Mar-2019").as_deref(), Some("2019-03-12"));
/// assert_eq!(normalize_datetime("last tuesday"), None);
/// ```
pub fn normalize_datetime(value: &str) -> Option<String> {
    parse_source_datetime(value).map(|parsed| parsed.to_iso8601_string())
}
