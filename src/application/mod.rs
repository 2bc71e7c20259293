//! Application layer (use-cases, policies).
//!
//! Timestamp resolution and the display policies built on it, kept free of
//! any I/O so they can run inside a render pass.

pub mod dates;

pub use dates::feed::{Timestamped, activity_label, canonical_wire_string, sort_newest_first};
pub use dates::normalize::{Resolution, TimestampNormalizer, format_timestamp, resolve};
