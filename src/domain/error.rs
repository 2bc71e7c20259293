//! Domain error types for timestamp interpretation.
//!
//! These never reach the user: the normalizer maps every one of them to the
//! "Recently" label. They exist so callers that need the reason (logs, the
//! CLI, tests) can get it.

use thiserror::Error;

/// Reasons a raw timestamp could not be turned into an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Malformed timestamp value: {0}")]
    Malformed(String),

    #[error("Expected 6 or 7 integer components, got {0:?}")]
    InvalidComponents(Vec<Option<i64>>),

    #[error(
        "Not a calendar date: {year}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
    )]
    InvalidDate {
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
    },

    #[error("Epoch milliseconds out of range: {0}")]
    EpochOutOfRange(i64),

    #[error("Unparseable timestamp text: {0:?}")]
    Unparseable(String),
}
