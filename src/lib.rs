//! Defensive timestamp display for the origami tutorial platform.
//!
//! The backend sends date/times as arrays, `LocalDateTime` objects, ISO
//! strings, space-separated strings or placeholders. [`format_timestamp`]
//! turns any of them into a long-form date or a fallback label.

pub mod application;
pub mod domain;
pub mod infra;

pub use application::{TimestampNormalizer, format_timestamp};
pub use domain::{DateLabel, DateStyle, DisplayZone, RawTimestamp, TimestampError};
