//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ExtractionStats, InfoType, WarningType};
use crate::SearchReport;

/// Prints a one-line summary of a finished search.
pub fn print_search_summary(report: &SearchReport) {
    info!("{}", search_summary_line(report));
}

fn search_summary_line(report: &SearchReport) -> String {
    let listings = report.listings.len();
    let sold_out = report.listings.iter().filter(|l| l.is_full()).count();
    format!(
        "✅ {} listing{} ({} sold out) from {} offer block{} in {:.1}s",
        listings,
        if listings == 1 { "" } else { "s" },
        sold_out,
        report.blocks_found,
        if report.blocks_found == 1 { "" } else { "s" },
        report.elapsed_seconds
    )
}

/// Prints error, warning, and info counters to the log.
///
/// Only non-zero counters are printed; a category with no counts is skipped.
pub fn print_extraction_statistics(stats: &ExtractionStats) {
    for line in extraction_statistics_lines(stats) {
        info!("{}", line);
    }
}

fn extraction_statistics_lines(stats: &ExtractionStats) -> Vec<String> {
    let mut lines = Vec::new();

    let total_errors = stats.total_errors();
    if total_errors > 0 {
        lines.push(format!("Error Counts ({} total):", total_errors));
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                lines.push(format!("   {}: {}", error_type.as_str(), count));
            }
        }
    }

    let total_warnings = stats.total_warnings();
    if total_warnings > 0 {
        lines.push(format!("Recovered Field Problems ({} total):", total_warnings));
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                lines.push(format!("   {}: {}", warning_type.as_str(), count));
            }
        }
    }

    if stats.total_info() > 0 {
        lines.push("Search Counts:".to_string());
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                lines.push(format!("   {}: {}", info_type.as_str(), count));
            }
        }
    }

    lines
}
