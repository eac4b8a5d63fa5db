//! Error type definitions.
//!
//! This module defines the error types that cross module boundaries, plus the
//! error, warning, and info categories counted during a search.

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A page layout selector does not parse.
    #[error("Invalid {name} selector '{selector}': {reason}")]
    InvalidSelector {
        /// Which layout field holds the selector
        name: &'static str,
        /// The selector as configured
        selector: String,
        /// Parser message
        reason: String,
    },

    /// Any other configuration value that cannot drive a search.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error reading a saved result page.
    #[error("Failed to read saved page: {0}")]
    PageFileError(#[from] std::io::Error),
}

/// Failures reported by a rendering session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The automation environment could not be started.
    #[error("Rendering session could not start: {0}")]
    AcquisitionFailed(String),

    /// The target page could not be loaded.
    #[error("Navigation to {url} failed: {reason}")]
    NavigationFailed {
        /// Page that was requested
        url: String,
        /// Failure reported by the backend
        reason: String,
    },

    /// A query was issued before any page was loaded.
    #[error("No page loaded in the rendering session")]
    NoPage,

    /// A block handle no longer points at an element of the current page.
    #[error("Offer block #{0} is no longer present on the page")]
    StaleBlock(usize),

    /// The underlying automation layer failed to answer a query.
    #[error("Rendering session query failed: {0}")]
    QueryFailed(String),

    /// Shutting the session down failed.
    #[error("Rendering session release failed: {0}")]
    ReleaseFailed(String),
}

/// Run-level failures of a flight search.
///
/// Field-level extraction problems never appear here; they are recovered inside the
/// extractor and only counted in [`ExtractionStats`](super::ExtractionStats).
#[derive(Error, Debug)]
pub enum SearchError {
    /// The rendering session could not be acquired.
    #[error("Session acquisition failed: {0}")]
    SessionAcquisition(#[source] SessionError),

    /// The result page never satisfied the readiness condition.
    #[error("Result page not ready within {timeout:?} (waiting for '{selector}')")]
    NavigationTimeout {
        /// Readiness selector that never matched
        selector: String,
        /// Budget that ran out
        timeout: Duration,
    },

    /// The result page could not be loaded at all.
    #[error("Navigation failed: {0}")]
    Navigation(#[source] SessionError),

    /// The session failed while the page was being read.
    #[error("Rendering session failed: {0}")]
    Session(#[from] SessionError),
}

impl SearchError {
    /// The statistics category of this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            SearchError::SessionAcquisition(_) => ErrorType::SessionAcquisitionFailure,
            SearchError::NavigationTimeout { .. } => ErrorType::NavigationTimeout,
            SearchError::Navigation(_) => ErrorType::NavigationFailure,
            SearchError::Session(_) => ErrorType::SessionFailure,
        }
    }
}

/// Run-level failures, counted once per failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// No rendering session could be started
    SessionAcquisitionFailure,
    /// The result page never became ready
    NavigationTimeout,
    /// The result page could not be loaded
    NavigationFailure,
    /// The session failed while the page was being read
    SessionFailure,
}

/// Field-level extraction problems that were recovered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// Block without a departure time; the block is dropped
    MissingDepartureTime,
    /// Select button or its booking attribute is missing
    MissingBookingAttribute,
    /// Booking action holds no quoted path
    UnmatchedBookingPattern,
    /// Booking path could not be joined onto the base URL
    UnresolvableBookingLink,
    /// No price label; listed as sold out
    MissingPrice,
    /// Price label without digits; listed as sold out
    PriceWithoutDigits,
}

/// Informational counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// Polls spent waiting for the result page
    ReadinessPolls,
    /// Offer blocks enumerated on the result page
    BlocksFound,
    /// Listings returned after ranking
    ListingsEmitted,
    /// Listings without a bookable price
    SoldOutListings,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::SessionAcquisitionFailure => "Session acquisition failure",
            ErrorType::NavigationTimeout => "Navigation timeout",
            ErrorType::NavigationFailure => "Navigation failure",
            ErrorType::SessionFailure => "Rendering session failure",
        }
    }
}

impl WarningType {
    /// Human-readable label used in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingDepartureTime => "Missing departure time (block dropped)",
            WarningType::MissingBookingAttribute => "Missing booking action",
            WarningType::UnmatchedBookingPattern => "Booking action without a path",
            WarningType::UnresolvableBookingLink => "Booking path could not be resolved",
            WarningType::MissingPrice => "Missing price (sold out)",
            WarningType::PriceWithoutDigits => "Price without digits (sold out)",
        }
    }
}

impl InfoType {
    /// Human-readable label used in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::ReadinessPolls => "Readiness polls",
            InfoType::BlocksFound => "Offer blocks found",
            InfoType::ListingsEmitted => "Listings emitted",
            InfoType::SoldOutListings => "Sold-out listings",
        }
    }
}
