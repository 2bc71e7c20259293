//! Timestamp normalization.
//!
//! Every date shown in the app goes through [`TimestampNormalizer`]. Input
//! shapes are tried in a fixed order and the first rule that applies decides
//! the reading:
//!
//! 1. absent input renders as "Unknown date"
//! 2. the backend sentinel `0-01-01 00:00:00` renders as "Recently"
//! 3. `[year, month, day, hour, minute, second, nano?]` arrays
//! 4. `{year, monthValue, dayOfMonth, ...}` objects
//! 5. strings with a `T` separator and a `+` offset
//! 6. other strings with a `T` separator or `Z` marker
//! 7. `YYYY-MM-DD HH:MM:SS` strings, read as UTC
//! 8. other strings starting with `0-` render as "Recently"
//! 9. anything else goes through the lenient parser
//!
//! Offset-less timestamps (arrays, objects, rules 6 and 7) are taken as UTC.
//! Failures never escape [`TimestampNormalizer::format`]: they become "Recently".

use crate::domain::{
    DateLabel, DateStyle, DisplayZone, LocalDateTimeFields, RECENTLY_LABEL, RawTimestamp,
    SENTINEL_TIMESTAMP, TimestampError,
};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
];

/// Outcome of reading a raw timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing was supplied.
    Absent,
    /// A known placeholder for "no value yet".
    Placeholder,
    /// A real instant.
    At(DateTime<Utc>),
}

/// Resolve a raw timestamp using the precedence rules in the module docs.
pub fn resolve(raw: &RawTimestamp) -> Result<Resolution, TimestampError> {
    let at = match raw {
        RawTimestamp::Absent => return Ok(Resolution::Absent),
        RawTimestamp::Text(text) if text == SENTINEL_TIMESTAMP => {
            return Ok(Resolution::Placeholder);
        }
        RawTimestamp::Components(parts) => from_components(parts)?,
        RawTimestamp::Fields(fields) => from_fields(fields)?,
        RawTimestamp::Text(text) => match parse_text(text)? {
            Some(at) => at,
            None => return Ok(Resolution::Placeholder),
        },
        RawTimestamp::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis)
            .ok_or(TimestampError::EpochOutOfRange(*millis))?,
        RawTimestamp::Malformed(reason) => {
            return Err(TimestampError::Malformed(reason.clone()));
        }
    };

    // year zero is what an uninitialized backend date/time serializes to
    if at.year() < 1 {
        return Ok(Resolution::Placeholder);
    }
    Ok(Resolution::At(at))
}

fn from_components(parts: &[Option<i64>]) -> Result<DateTime<Utc>, TimestampError> {
    let invalid = || TimestampError::InvalidComponents(parts.to_vec());
    if !(6..=7).contains(&parts.len()) || parts.iter().any(Option::is_none) {
        return Err(invalid());
    }

    // the optional seventh element (nanoseconds) is checked but not shown
    let mut values = [0i64; 6];
    for (slot, part) in values.iter_mut().zip(parts) {
        *slot = part.ok_or_else(invalid)?;
    }
    calendar(values)
}

fn from_fields(fields: &LocalDateTimeFields) -> Result<DateTime<Utc>, TimestampError> {
    calendar(fields.with_defaults())
}

/// Build a UTC instant from `[year, month, day, hour, minute, second]`.
///
/// Months are 1-based here, as they are at the input boundary, so they go to
/// chrono unshifted. Out-of-range values are rejected rather than rolled over.
fn calendar(values: [i64; 6]) -> Result<DateTime<Utc>, TimestampError> {
    let [year, month, day, hour, minute, second] = values;
    let invalid = || TimestampError::InvalidDate {
        year,
        month,
        day,
        hour,
        minute,
        second,
    };

    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).map_err(|_| invalid())?,
        u32::try_from(month).map_err(|_| invalid())?,
        u32::try_from(day).map_err(|_| invalid())?,
    )
    .ok_or_else(invalid)?;
    let at = date
        .and_hms_opt(
            u32::try_from(hour).map_err(|_| invalid())?,
            u32::try_from(minute).map_err(|_| invalid())?,
            u32::try_from(second).map_err(|_| invalid())?,
        )
        .ok_or_else(invalid)?;
    Ok(at.and_utc())
}

/// String rules 5 through 9. `Ok(None)` means a legacy placeholder.
fn parse_text(text: &str) -> Result<Option<DateTime<Utc>>, TimestampError> {
    let unparseable = || TimestampError::Unparseable(text.to_string());

    if text.contains('T') && text.contains('+') {
        return parse_with_offset(text)
            .or_else(|| parse_lenient(text))
            .map(Some)
            .ok_or_else(unparseable);
    }

    if text.contains('T') || text.contains('Z') {
        return parse_lenient(text).map(Some).ok_or_else(unparseable);
    }

    if text.contains('-') && text.contains(':') {
        let iso = format!("{}Z", text.replacen(' ', "T", 1));
        return parse_lenient(&iso).map(Some).ok_or_else(unparseable);
    }

    if text.starts_with("0-") {
        return Ok(None);
    }

    parse_lenient(text).map(Some).ok_or_else(unparseable)
}

fn parse_with_offset(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
        .map(|at| at.with_timezone(&Utc))
}

/// Last-resort parser accepting the date shapes seen from the backend and
/// from users' hand-entered data.
pub fn parse_lenient(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(at) = parse_with_offset(text) {
        return Some(at);
    }
    if let Ok(at) = DateTime::parse_from_rfc2822(text) {
        return Some(at.with_timezone(&Utc));
    }

    let naive = text.strip_suffix('Z').unwrap_or(text);
    if let Some(at) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
    {
        return Some(at.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(naive, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
}

/// Renders raw timestamps as display strings.
///
/// Holds display settings only; resolution itself is stateless, so one value
/// can be shared freely across threads and render passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimestampNormalizer {
    pub style: DateStyle,
    pub zone: DisplayZone,
}

impl TimestampNormalizer {
    pub fn new(style: DateStyle, zone: DisplayZone) -> Self {
        Self { style, zone }
    }

    /// Resolve `raw`, absorbing any error into [`DateLabel::Recently`].
    pub fn label(&self, raw: &RawTimestamp) -> DateLabel {
        match resolve(raw) {
            Ok(Resolution::Absent) => DateLabel::Unknown,
            Ok(Resolution::Placeholder) => DateLabel::Recently,
            Ok(Resolution::At(at)) => DateLabel::Date(at),
            Err(err) => {
                log::debug!("Showing '{}' for {:?}: {}", RECENTLY_LABEL, raw, err);
                DateLabel::Recently
            }
        }
    }

    /// Display string for `raw`. Never empty.
    pub fn format(&self, raw: &RawTimestamp) -> String {
        self.label(raw).render(self.style, self.zone)
    }

    pub fn format_value(&self, value: &Value) -> String {
        self.format(&RawTimestamp::from_value(value))
    }
}

/// Format a JSON timestamp as a long-form UTC date, or a fallback label.
pub fn format_timestamp(value: &Value) -> String {
    TimestampNormalizer::default().format_value(value)
}
