//! Booking link resolution.
//!
//! The select button of an offer carries an inline action such as
//! `location.href='/flight/checkout/abc'`; the first single-quoted substring is
//! the booking path, resolved against the site's base URL.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::BOOKING_PATH_PATTERN;
use crate::error_handling::WarningType;

fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

static BOOKING_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(BOOKING_PATH_PATTERN, "BOOKING_PATH_RE"));

/// How the booking link of one offer was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Path found in the inline action and resolved against the base URL
    Resolved(String),
    /// The button or its action attribute is absent
    MissingAttribute,
    /// The action carries no quoted path
    Unmatched,
    /// The quoted path does not form a valid URL
    Unresolvable,
}

impl LinkOutcome {
    /// Warning to record when the search URL had to be used instead.
    pub fn warning(&self) -> Option<WarningType> {
        match self {
            LinkOutcome::Resolved(_) => None,
            LinkOutcome::MissingAttribute => Some(WarningType::MissingBookingAttribute),
            LinkOutcome::Unmatched => Some(WarningType::UnmatchedBookingPattern),
            LinkOutcome::Unresolvable => Some(WarningType::UnresolvableBookingLink),
        }
    }

    /// The link to emit, falling back to `search_url`.
    pub fn into_link(self, search_url: &str) -> String {
        match self {
            LinkOutcome::Resolved(link) => link,
            _ => search_url.to_string(),
        }
    }
}

/// First single-quoted substring of an inline action.
///
/// An empty quoted string counts as no match.
pub fn extract_booking_path(action: &str) -> Option<&str> {
    BOOKING_PATH_RE
        .captures(action)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|path| !path.is_empty())
}

/// Resolves the booking link of an offer from its inline action attribute.
pub fn resolve_booking_link(action: Option<&str>, base_url: &Url) -> LinkOutcome {
    let Some(action) = action else {
        return LinkOutcome::MissingAttribute;
    };
    let Some(path) = extract_booking_path(action) else {
        return LinkOutcome::Unmatched;
    };
    match base_url.join(path) {
        Ok(url) => LinkOutcome::Resolved(url.to_string()),
        Err(_) => LinkOutcome::Unresolvable,
    }
}
