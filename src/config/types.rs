//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::config::constants::*;
use crate::error_handling::InitializationError;
use crate::query::SearchRequest;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How ranked listings are printed by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Numbered, human-readable lines
    Plain,
    /// Pretty-printed JSON array
    Json,
}

/// Which rendering session backend the CLI uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SessionBackend {
    /// Plain HTTP fetch of the result page (no script execution)
    Http,
    /// Headless Chromium (requires the `chromium` cargo feature)
    Chromium,
}

/// CSS selectors describing the structure of the result page.
///
/// Every selector except `readiness` and `offer_block` is evaluated relative to a
/// single offer block. Start those with `:scope` so that only descendants of the
/// block can satisfy the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Present once the result list has rendered
    pub readiness: String,
    /// Matches every offer block, in page order
    pub offer_block: String,
    /// Departure time label within a block
    pub departure_time: String,
    /// Button whose attribute carries the booking action
    pub select_button: String,
    /// Attribute of `select_button` holding the action
    pub booking_attribute: String,
    /// Price label within a block
    pub price: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            readiness: READINESS_SELECTOR.to_string(),
            offer_block: OFFER_BLOCK_SELECTOR.to_string(),
            departure_time: DEPARTURE_TIME_SELECTOR.to_string(),
            select_button: SELECT_BUTTON_SELECTOR.to_string(),
            booking_attribute: BOOKING_ATTRIBUTE.to_string(),
            price: PRICE_SELECTOR.to_string(),
        }
    }
}

impl PageLayout {
    fn selectors(&self) -> [(&'static str, &str); 5] {
        [
            ("readiness", &self.readiness),
            ("offer_block", &self.offer_block),
            ("departure_time", &self.departure_time),
            ("select_button", &self.select_button),
            ("price", &self.price),
        ]
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use flight_scan::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     headless: false,
///     readiness_timeout: Duration::from_secs(60),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Site that is searched; booking paths are resolved against it
    pub base_url: Url,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Deadline for the result page to become ready
    pub readiness_timeout: Duration,

    /// Delay before the second readiness poll (grows exponentially afterwards)
    pub poll_initial_delay: Duration,

    /// Upper bound on the delay between readiness polls
    pub poll_max_delay: Duration,

    /// Upper bound on the number of readiness polls
    pub max_readiness_polls: usize,

    /// Pause between consecutive offer blocks during extraction
    pub block_pacing: Duration,

    /// Per-request timeout for fetching/navigating
    pub request_timeout: Duration,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// `price_text` given to sold-out offers
    pub sold_out_label: String,

    /// Result page structure
    pub layout: PageLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"),
            headless: true,
            readiness_timeout: Duration::from_secs(READINESS_TIMEOUT_SECS),
            poll_initial_delay: Duration::from_millis(READINESS_POLL_INITIAL_DELAY_MS),
            poll_max_delay: Duration::from_millis(READINESS_POLL_MAX_DELAY_MS),
            max_readiness_polls: READINESS_MAX_POLLS,
            block_pacing: Duration::from_millis(BLOCK_PACING_MS),
            request_timeout: REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sold_out_label: SOLD_OUT_LABEL.to_string(),
            layout: PageLayout::default(),
        }
    }
}

impl Config {
    /// Checks that the configuration can drive a search.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidSelector` for a layout selector that does
    /// not parse, and `InitializationError::InvalidConfig` for a base URL that cannot
    /// carry a path or for a zero readiness budget.
    pub fn validate(&self) -> Result<(), InitializationError> {
        for (name, selector) in self.layout.selectors() {
            if let Err(e) = scraper::Selector::parse(selector) {
                return Err(InitializationError::InvalidSelector {
                    name,
                    selector: selector.to_string(),
                    reason: e.to_string(),
                });
            }
        }
        if self.layout.booking_attribute.trim().is_empty() {
            return Err(InitializationError::InvalidConfig(
                "booking attribute name must not be empty".to_string(),
            ));
        }
        if self.base_url.cannot_be_a_base() {
            return Err(InitializationError::InvalidConfig(format!(
                "base URL {} cannot carry a path",
                self.base_url
            )));
        }
        if self.readiness_timeout.is_zero() || self.max_readiness_polls == 0 {
            return Err(InitializationError::InvalidConfig(
                "readiness timeout and poll budget must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validates a 3-letter airport/city code and upper-cases it.
pub fn parse_airport_code(value: &str) -> Result<String, String> {
    let code = value.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(format!("expected a 3-letter code, got '{value}'"))
    }
}

/// Validates a date token; the site's own calendar format is passed through untouched.
pub fn parse_date_token(value: &str) -> Result<String, String> {
    let token = value.trim();
    if token.is_empty() {
        Err("date must not be empty".to_string())
    } else if token.chars().any(char::is_whitespace) {
        Err(format!("date must be a single token, got '{value}'"))
    } else {
        Ok(token.to_string())
    }
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options have sensible defaults and can be overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # One-way search
/// flight_scan MHD THR 1404-08-14
///
/// # Round trip for two adults, rendered by a visible Chromium window
/// flight_scan MHD THR 1404-08-14 --returning 1404-08-15 --adults 2 \
///     --backend chromium --headed
///
/// # Re-run extraction against a saved result page
/// flight_scan MHD THR 1404-08-14 --html-file results.html --output json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "flight_scan",
    about = "Searches a travel site for flight offers and ranks them by availability and price."
)]
pub struct Opt {
    /// Origin airport/city code (3 letters)
    #[arg(value_parser = parse_airport_code)]
    pub origin: String,

    /// Destination airport/city code (3 letters)
    #[arg(value_parser = parse_airport_code)]
    pub destination: String,

    /// Departure date, in the site's calendar (e.g. 1404-08-14)
    #[arg(value_parser = parse_date_token)]
    pub departing: String,

    /// Return date for round trips
    #[arg(long, value_parser = parse_date_token)]
    pub returning: Option<String>,

    /// Number of adult passengers
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub adults: u32,

    /// Base URL of the travel site
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Rendering backend: http|chromium
    #[arg(long, value_enum, default_value_t = SessionBackend::Http)]
    pub backend: SessionBackend,

    /// Show the browser window (chromium backend only)
    #[arg(long)]
    pub headed: bool,

    /// Extract from a saved result page instead of visiting the site
    #[arg(long, value_parser)]
    pub html_file: Option<PathBuf>,

    /// Seconds to wait for the result page to become ready
    #[arg(long, default_value_t = READINESS_TIMEOUT_SECS)]
    pub readiness_timeout_secs: u64,

    /// Delay before the second readiness poll, in milliseconds
    #[arg(long, default_value_t = READINESS_POLL_INITIAL_DELAY_MS)]
    pub poll_initial_delay_ms: u64,

    /// Maximum delay between readiness polls, in milliseconds
    #[arg(long, default_value_t = READINESS_POLL_MAX_DELAY_MS)]
    pub poll_max_delay_ms: u64,

    /// Maximum number of readiness polls
    #[arg(long, default_value_t = READINESS_MAX_POLLS)]
    pub max_readiness_polls: usize,

    /// Pause between offer blocks, in milliseconds
    #[arg(long, default_value_t = BLOCK_PACING_MS)]
    pub block_pacing_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT.as_secs())]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Label shown for sold-out offers
    #[arg(long, default_value = SOLD_OUT_LABEL)]
    pub sold_out_label: String,

    /// CSS selector matching one element per offer block
    #[arg(long, default_value = OFFER_BLOCK_SELECTOR)]
    pub block_selector: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Result output: plain|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Log extraction statistics at the end of the run
    #[arg(long)]
    pub show_stats: bool,
}

impl Opt {
    /// Splits the options into the search request and the library configuration.
    pub fn to_parts(&self) -> (SearchRequest, Config) {
        let mut request = SearchRequest::new(&self.origin, &self.destination, &self.departing)
            .with_adults(self.adults);
        if let Some(returning) = &self.returning {
            request = request.with_return(returning);
        }

        let config = Config {
            base_url: self.base_url.clone(),
            headless: !self.headed,
            readiness_timeout: Duration::from_secs(self.readiness_timeout_secs),
            poll_initial_delay: Duration::from_millis(self.poll_initial_delay_ms),
            poll_max_delay: Duration::from_millis(self.poll_max_delay_ms),
            max_readiness_polls: self.max_readiness_polls,
            block_pacing: Duration::from_millis(self.block_pacing_ms),
            request_timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
            sold_out_label: self.sold_out_label.clone(),
            layout: PageLayout {
                offer_block: self.block_selector.clone(),
                ..PageLayout::default()
            },
        };

        (request, config)
    }
}
