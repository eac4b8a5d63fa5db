//! Main application modules.
//!
//! This module provides result rendering, statistics printing, and exit code
//! mapping used by the command-line binary.

pub mod output;
pub mod statistics;

use crate::error_handling::SearchError;
use crate::SearchReport;

// Re-export public API
pub use output::{render_listings, NO_FLIGHTS_MESSAGE};
pub use statistics::{print_extraction_statistics, print_search_summary};

/// Exit code for a completed search, including one that found no flights.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a search that failed at run level.
pub const EXIT_SEARCH_FAILURE: i32 = 1;
/// Exit code for invalid configuration or failed initialization.
pub const EXIT_INIT_FAILURE: i32 = 2;

/// Maps a search outcome to the process exit code.
pub fn exit_code(result: &Result<SearchReport, SearchError>) -> i32 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_SEARCH_FAILURE,
    }
}
