//! Configuration constants.
//!
//! This module defines the constants used throughout the application, including
//! the target site, readiness polling, pacing, and the page layout selectors.

use std::time::Duration;

/// Base URL of the travel site that is searched.
///
/// Search URLs are built as `{base}/flights/{origin}-{destination}?...` and relative
/// booking paths found on the result page are resolved against it.
pub const DEFAULT_BASE_URL: &str = "https://www.alibaba.ir";

/// Environment variable that overrides the base URL (also read from `.env`).
pub const BASE_URL_ENV: &str = "FLIGHT_SCAN_BASE_URL";

/// Environment variable pointing at a Chrome/Chromium executable for the browser backend.
pub const CHROME_PATH_ENV: &str = "FLIGHT_SCAN_CHROME";

/// Label used as `price_text` for offers without a bookable price.
pub const SOLD_OUT_LABEL: &str = "تکمیل ظرفیت";

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Query parameters the site expects but which are not part of a search request
/// Children per search; always zero
pub const CHILD_COUNT: u32 = 0;
/// Infants per search; always zero
pub const INFANT_COUNT: u32 = 0;

// Readiness polling
/// Maximum time to wait for the result page to become ready, in seconds
pub const READINESS_TIMEOUT_SECS: u64 = 30;
/// Delay before the second readiness poll, in milliseconds
/// Subsequent polls double this delay up to `READINESS_POLL_MAX_DELAY_MS`
pub const READINESS_POLL_INITIAL_DELAY_MS: u64 = 250;
/// Growth factor between consecutive readiness polls
pub const READINESS_POLL_GROWTH: u64 = 2;
/// Maximum delay between readiness polls, in milliseconds
pub const READINESS_POLL_MAX_DELAY_MS: u64 = 2_000;
/// Maximum number of readiness polls before giving up (also bounded by the timeout)
pub const READINESS_MAX_POLLS: usize = 40;

// Extraction pacing
/// Delay between consecutive offer blocks, in milliseconds
/// Rate limit against the target site, not a correctness requirement
pub const BLOCK_PACING_MS: u64 = 200;

/// Per-request timeout for the HTTP session backend and browser navigation
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Page layout
/// Present once the result list container has rendered
pub const READINESS_SELECTOR: &str = "#app section";
/// One element per offer block
pub const OFFER_BLOCK_SELECTOR: &str = "#app section div:nth-of-type(4) > div";
// Field selectors are matched inside an offer block. `:scope` pins the first
// compound to a descendant of the block so the block itself and its ancestors
// never take part in the match.
/// Departure time label, relative to an offer block
pub const DEPARTURE_TIME_SELECTOR: &str = ":scope div > div > div:nth-of-type(1) > div > div:nth-of-type(2) > div:nth-of-type(2) > div:nth-of-type(1)";
/// "Select" button carrying the booking action, relative to an offer block
pub const SELECT_BUTTON_SELECTOR: &str =
    ":scope div:nth-of-type(2) > div:nth-of-type(1) > div > div:nth-of-type(2) > button";
/// Attribute of the select button holding the inline booking action
pub const BOOKING_ATTRIBUTE: &str = "onclick";
/// Price label, relative to an offer block
pub const PRICE_SELECTOR: &str = ":scope div > div:nth-of-type(2) > div:nth-of-type(1) > div > span > strong";

/// Pattern extracting the relative booking path from the inline action.
/// The first single-quoted substring is the path.
pub const BOOKING_PATH_PATTERN: &str = r"'(.*?)'";
