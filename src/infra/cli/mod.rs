//! CLI infrastructure.
//!
//! Provides input acquisition for the `origami-dates` binary.

pub mod input;
