//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches nothing
/// (`*:not(*)`). Queries built from a broken selector therefore behave like a
/// field that is absent from the page instead of aborting the search.
///
/// # Arguments
///
/// * `selector_str` - The CSS selector string to parse
/// * `context` - Context description for error logging (e.g., "price lookup")
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        parse_selector_unsafe("*:not(*)", "fallback selector")
    })
}

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}
