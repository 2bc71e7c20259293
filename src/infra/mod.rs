//! Infrastructure layer (adapters/implementations).
//!
//! This module contains IO-heavy integrations (config files, stdin).

pub mod app_config;
pub mod cli;
