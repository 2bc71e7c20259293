use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shown when no timestamp was supplied at all.
pub const UNKNOWN_DATE_LABEL: &str = "Unknown date";

/// Shown for placeholder timestamps and for anything that fails to parse.
pub const RECENTLY_LABEL: &str = "Recently";

/// What a timestamp renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLabel {
    /// A resolved instant.
    Date(DateTime<Utc>),
    /// Placeholder or unparseable input.
    Recently,
    /// No input.
    Unknown,
}

impl DateLabel {
    /// Render the label in the given style, converting dates to `zone` first.
    pub fn render(&self, style: DateStyle, zone: DisplayZone) -> String {
        match self {
            Self::Date(at) => zone.format(at, style.pattern()),
            Self::Recently => RECENTLY_LABEL.to_string(),
            Self::Unknown => UNKNOWN_DATE_LABEL.to_string(),
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DateStyle::default(), DisplayZone::default()))
    }
}

/// Calendar date layouts used across the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `June 15, 2025`
    #[default]
    Long,
    /// `06/15/2025`, as on achievement badges
    Numeric,
    /// `6/15/2025`
    Short,
    /// `6/15/2025, 10:30:00 AM`, as on comments
    #[serde(rename = "datetime", alias = "date_time")]
    DateTime,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            Self::Long => "%B %-d, %Y",
            Self::Numeric => "%m/%d/%Y",
            Self::Short => "%-m/%-d/%Y",
            Self::DateTime => "%-m/%-d/%Y, %-I:%M:%S %p",
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "long"),
            Self::Numeric => write!(f, "numeric"),
            Self::Short => write!(f, "short"),
            Self::DateTime => write!(f, "datetime"),
        }
    }
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "numeric" | "badge" => Ok(Self::Numeric),
            "short" => Ok(Self::Short),
            "datetime" | "date_time" | "date-time" => Ok(Self::DateTime),
            other => Err(format!(
                "Unknown date style '{other}' (expected long, numeric, short or datetime)"
            )),
        }
    }
}

/// Time zone that resolved instants are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DisplayZone {
    #[default]
    Utc,
    /// The host's local zone.
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    fn format(self, at: &DateTime<Utc>, pattern: &str) -> String {
        match self {
            Self::Utc => format_in(at, &Utc, pattern),
            Self::Local => format_in(at, &Local, pattern),
            Self::Fixed(offset) => format_in(at, &offset, pattern),
        }
    }
}

fn format_in<Tz>(at: &DateTime<Utc>, zone: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.with_timezone(zone).format(pattern).to_string()
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for DisplayZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" | "gmt" => return Ok(Self::Utc),
            "local" => return Ok(Self::Local),
            _ => {}
        }
        parse_offset(trimmed)
            .map(Self::Fixed)
            .ok_or_else(|| format!("Invalid display zone '{s}' (expected utc, local or +HH:MM)"))
    }
}

impl TryFrom<String> for DisplayZone {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DisplayZone> for String {
    fn from(zone: DisplayZone) -> Self {
        zone.to_string()
    }
}

/// Parse `+HH`, `+HHMM` or `+HH:MM` (and the `-` forms).
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_15() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_styles_render() {
        let label = DateLabel::Date(june_15());
        let utc = DisplayZone::Utc;
        assert_eq!(label.render(DateStyle::Long, utc), "June 15, 2025");
        assert_eq!(label.render(DateStyle::Numeric, utc), "06/15/2025");
        assert_eq!(label.render(DateStyle::Short, utc), "6/15/2025");
        assert_eq!(
            label.render(DateStyle::DateTime, utc),
            "6/15/2025, 10:30:00 AM"
        );
    }

    #[test]
    fn test_fallback_labels_ignore_style() {
        for style in [DateStyle::Long, DateStyle::Numeric, DateStyle::DateTime] {
            assert_eq!(
                DateLabel::Recently.render(style, DisplayZone::Local),
                "Recently"
            );
            assert_eq!(
                DateLabel::Unknown.render(style, DisplayZone::Utc),
                "Unknown date"
            );
        }
    }

    #[test]
    fn test_fixed_zone_shifts_calendar_day() {
        let late = Utc.with_ymd_and_hms(2025, 6, 15, 23, 30, 0).unwrap();
        let zone: DisplayZone = "+02:00".parse().unwrap();
        assert_eq!(
            DateLabel::Date(late).render(DateStyle::Long, zone),
            "June 16, 2025"
        );
    }

    #[test]
    fn test_display_zone_parse() {
        assert_eq!("UTC".parse::<DisplayZone>().unwrap(), DisplayZone::Utc);
        assert_eq!("local".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert_eq!(
            "-0800".parse::<DisplayZone>().unwrap(),
            DisplayZone::Fixed(FixedOffset::west_opt(8 * 3600).unwrap())
        );
        assert_eq!(
            "+05".parse::<DisplayZone>().unwrap(),
            DisplayZone::Fixed(FixedOffset::east_opt(5 * 3600).unwrap())
        );
        assert!("+25:00".parse::<DisplayZone>().is_err());
        assert!("Europe/Paris".parse::<DisplayZone>().is_err());
        assert_eq!(
            "+05:30".parse::<DisplayZone>().unwrap().to_string(),
            "+05:30"
        );
    }

    #[test]
    fn test_date_style_display_parse() {
        assert_eq!(DateStyle::DateTime.to_string(), "datetime");
        assert_eq!(DateStyle::from_str("BADGE").unwrap(), DateStyle::Numeric);
        assert!(DateStyle::from_str("fancy").is_err());
    }
}
