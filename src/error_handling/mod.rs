//! Error handling and extraction statistics.
//!
//! This module provides:
//! - Error type definitions for sessions, searches, and initialization
//! - Extraction statistics tracking (errors, warnings, info metrics)
//!
//! Counted categories are:
//! - **Errors**: Run-level failures that abort a search
//! - **Warnings**: Field-level failures recovered inside the extractor
//! - **Info**: Informational metrics (blocks found, readiness polls, etc.)

mod stats;
mod types;

// Re-export public API
pub use stats::ExtractionStats;
pub use types::{ErrorType, InfoType, InitializationError, SearchError, SessionError, WarningType};
