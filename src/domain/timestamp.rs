use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Placeholder the backend emits for a timestamp that was never set.
pub const SENTINEL_TIMESTAMP: &str = "0-01-01 00:00:00";

/// A timestamp exactly as it arrived from the backend, before interpretation.
///
/// The backend serializes date/times in several ways depending on the endpoint,
/// so the value is kept polymorphic until the normalizer resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawTimestamp {
    /// `null`, a missing field, an empty string, `false` or the number `0`.
    #[default]
    Absent,
    /// `[year, month, day, hour, minute, second, nano?]`. Elements that are not
    /// integers are kept as `None` so the normalizer can reject them.
    Components(Vec<Option<i64>>),
    /// A `LocalDateTime`-style object with named fields.
    Fields(LocalDateTimeFields),
    /// Any non-empty string.
    Text(String),
    /// A JSON number, taken as milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// A value with no timestamp reading (`true`, objects with mistyped fields).
    Malformed(String),
}

/// Named-field date/time as produced by `LocalDateTime` JSON serialization.
///
/// Only the fields used for display are captured; `month`, `dayOfWeek`,
/// `nano` and friends are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalDateTimeFields {
    pub year: Option<i64>,
    pub month_value: Option<i64>,
    pub day_of_month: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
}

impl LocalDateTimeFields {
    /// Resolve each field to its value, falling back to the earliest legal
    /// value when the field is missing or zero.
    pub fn with_defaults(&self) -> [i64; 6] {
        fn or(field: Option<i64>, default: i64) -> i64 {
            match field {
                Some(0) | None => default,
                Some(v) => v,
            }
        }

        [
            or(self.year, 0),
            or(self.month_value, 1),
            or(self.day_of_month, 1),
            or(self.hour, 0),
            or(self.minute, 0),
            or(self.second, 0),
        ]
    }
}

impl RawTimestamp {
    /// Classify a JSON value into one of the timestamp shapes.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(s) if s.is_empty() => Self::Absent,
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => {
                let millis = n
                    .as_i64()
                    .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                    .unwrap_or_default();
                if millis == 0 {
                    Self::Absent
                } else {
                    Self::EpochMillis(millis)
                }
            }
            Value::Array(items) => Self::Components(items.iter().map(Value::as_i64).collect()),
            Value::Object(_) => match LocalDateTimeFields::deserialize(value) {
                Ok(fields) => Self::Fields(fields),
                Err(err) => Self::Malformed(format!("date/time object: {err}")),
            },
            Value::Bool(false) => Self::Absent,
            Value::Bool(true) => Self::Malformed("boolean true".to_string()),
        }
    }

    /// Build from a command-line style argument: JSON when it parses as JSON,
    /// otherwise the text itself.
    pub fn from_arg(arg: &str) -> Self {
        match serde_json::from_str::<Value>(arg) {
            Ok(value) => Self::from_value(&value),
            Err(_) if arg.is_empty() => Self::Absent,
            Err(_) => Self::Text(arg.to_string()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<&Value> for RawTimestamp {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl From<&str> for RawTimestamp {
    fn from(text: &str) -> Self {
        if text.is_empty() {
            Self::Absent
        } else {
            Self::Text(text.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for RawTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
