//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (target site, timeouts, pacing, selectors)
//! - Library configuration (`Config`, `PageLayout`)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    parse_airport_code, parse_date_token, Config, LogFormat, LogLevel, Opt, OutputFormat,
    PageLayout, SessionBackend,
};
