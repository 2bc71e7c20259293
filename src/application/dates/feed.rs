//! Timestamp helpers for feed items (completion posts, posts, comments).

use super::normalize::{Resolution, TimestampNormalizer, resolve};
use crate::domain::RawTimestamp;
use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Reverse;

/// Layout the backend and feed use for naive timestamps.
pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static NEVER_EDITED: RawTimestamp = RawTimestamp::Absent;

/// Something with creation and (optional) edit timestamps.
pub trait Timestamped {
    fn created_at(&self) -> &RawTimestamp;

    fn updated_at(&self) -> &RawTimestamp {
        &NEVER_EDITED
    }

    /// The edit time when there is one, otherwise the creation time.
    fn last_activity(&self) -> &RawTimestamp {
        let updated = self.updated_at();
        if updated.is_absent() {
            self.created_at()
        } else {
            updated
        }
    }
}

/// Normalize a completion timestamp to the feed's `YYYY-MM-DD HH:MM:SS` form.
///
/// Strings that resolve are re-emitted in UTC; strings that don't are passed
/// through with the `T` separator swapped out and cut to 19 characters so the
/// renderer can still recognize placeholders. Objects and arrays are laid out
/// from their components. Anything else is stamped with `now`.
pub fn canonical_wire_string(raw: &RawTimestamp, now: DateTime<Utc>) -> String {
    match raw {
        RawTimestamp::Text(text) => match resolve(raw) {
            Ok(Resolution::At(at)) => at.format(WIRE_FORMAT).to_string(),
            _ => text.replacen('T', " ", 1).chars().take(19).collect(),
        },
        RawTimestamp::Fields(fields) => layout_components(fields.with_defaults()),
        RawTimestamp::Components(parts) if parts.len() >= 6 => {
            match parts[..6].iter().copied().collect::<Option<Vec<i64>>>() {
                Some(values) => {
                    let mut array = [0i64; 6];
                    array.copy_from_slice(&values);
                    layout_components(array)
                }
                None => iso_now(now),
            }
        }
        _ => iso_now(now),
    }
}

fn layout_components([year, month, day, hour, minute, second]: [i64; 6]) -> String {
    format!("{year}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}

fn iso_now(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sort items newest first by last activity. Items whose activity cannot be
/// resolved to an instant keep their relative order at the end.
pub fn sort_newest_first<T: Timestamped>(items: &mut [T]) {
    items.sort_by_cached_key(|item| match resolve(item.last_activity()) {
        Ok(Resolution::At(at)) => (false, Reverse(Some(at))),
        _ => (true, Reverse(None)),
    });
}

/// Label for a post header: the edit date when the post was edited, the
/// creation date otherwise.
pub fn activity_label<T: Timestamped>(item: &T, normalizer: &TimestampNormalizer) -> String {
    let created = item.created_at();
    let updated = item.updated_at();
    if !updated.is_absent() && updated != created {
        normalizer.format(updated)
    } else {
        normalizer.format(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_canonical_from_offset_string_is_utc() {
        let raw = RawTimestamp::from("2025-05-09T16:11:15.622+02:00");
        assert_eq!(canonical_wire_string(&raw, now()), "2025-05-09 14:11:15");
    }

    #[test]
    fn test_canonical_passes_through_unresolvable_text() {
        assert_eq!(
            canonical_wire_string(&RawTimestamp::from("0-01-01T00:00:00.000000"), now()),
            "0-01-01 00:00:00.00"
        );
        assert_eq!(
            canonical_wire_string(&RawTimestamp::from("soon"), now()),
            "soon"
        );
    }

    #[test]
    fn test_canonical_from_fields_pads_components() {
        let raw = RawTimestamp::from_value(&json!({
            "year": 2025, "monthValue": 6, "dayOfMonth": 5, "hour": 9
        }));
        assert_eq!(canonical_wire_string(&raw, now()), "2025-06-05 09:00:00");

        let empty = RawTimestamp::from_value(&json!({}));
        assert_eq!(canonical_wire_string(&empty, now()), "0-01-01 00:00:00");
    }

    #[test]
    fn test_canonical_from_components_and_absent() {
        let raw = RawTimestamp::from_value(&json!([2025, 6, 15, 10, 30, 0, 999]));
        assert_eq!(canonical_wire_string(&raw, now()), "2025-06-15 10:30:00");

        assert_eq!(
            canonical_wire_string(&RawTimestamp::Absent, now()),
            "2026-01-02T03:04:05.000Z"
        );
        assert_eq!(
            canonical_wire_string(&RawTimestamp::from_value(&json!([1, 2])), now()),
            "2026-01-02T03:04:05.000Z"
        );
    }

    #[test]
    fn test_canonical_numbers_are_stamped_with_now() {
        let raw = RawTimestamp::from_value(&json!(1_749_983_400_000_i64));
        assert_eq!(canonical_wire_string(&raw, now()), "2026-01-02T03:04:05.000Z");
    }
}
