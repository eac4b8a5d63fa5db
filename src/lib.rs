//! flight_scan library: flight offer search, extraction, and ranking
//!
//! This library searches a travel site for one-way or round-trip flight offers,
//! reads the offer blocks of the rendered result page, normalizes their prices,
//! and returns the listings ranked by availability, then price, then departure
//! time.
//!
//! Page access goes through a [`SessionProvider`]: plain HTTP, pre-recorded HTML,
//! or (with the `chromium` feature) a headless browser.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use flight_scan::{
//!     search_flights, Config, ExtractionStats, HttpSessionProvider, SearchRequest,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = flight_scan::initialization::init_client(&config)?;
//! let provider = HttpSessionProvider::new(client);
//! let request = SearchRequest::new("MHD", "THR", "1404-08-14");
//! let stats = ExtractionStats::new();
//!
//! let report = search_flights(&request, &provider, &config, &stats).await?;
//! for listing in &report.listings {
//!     println!("{} {}", listing.departure_time(), listing.price_text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
mod error_handling;
mod extract;
pub mod initialization;
mod models;
mod price;
mod query;
mod rank;
mod readiness;
pub mod session;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat, PageLayout, SessionBackend};
pub use error_handling::{
    ErrorType, ExtractionStats, InfoType, InitializationError, SearchError, SessionError,
    WarningType,
};
pub use extract::{extract_offers, ExtractionContext, ExtractionOutcome};
pub use models::{FlightListing, PriceValue, RawOffer};
pub use price::{extract_number, normalize_offer, normalize_price, NormalizedPrice};
pub use query::{build_search_url, SearchRequest};
pub use rank::{compare_listings, rank_listings};
pub use readiness::{wait_for_ready, ReadinessPolicy};
pub use run::{search_flights, search_flights_or_empty, SearchReport};
pub use session::{
    BlockHandle, HttpSessionProvider, RenderingSession, SessionProvider, StaticSessionProvider,
};
#[cfg(feature = "chromium")]
pub use session::ChromiumSessionProvider;

// Internal run module (contains the search pipeline)
mod run {
    use std::time::Instant;

    use log::{debug, info, warn};

    use crate::config::Config;
    use crate::error_handling::{ExtractionStats, InfoType, SearchError};
    use crate::extract::{extract_offers, ExtractionContext, ExtractionOutcome};
    use crate::models::FlightListing;
    use crate::price::normalize_offer;
    use crate::query::{build_search_url, SearchRequest};
    use crate::rank::rank_listings;
    use crate::readiness::{wait_for_ready, ReadinessPolicy};
    use crate::session::{RenderingSession, SessionProvider};

    /// Results of one flight search.
    #[derive(Debug, Clone)]
    pub struct SearchReport {
        /// Listings in rank order: available before sold out, then by price, then
        /// by departure time
        pub listings: Vec<FlightListing>,
        /// URL of the result page that was read
        pub search_url: String,
        /// Number of offer blocks on the result page
        pub blocks_found: usize,
        /// Blocks that produced no listing (no departure time)
        pub blocks_dropped: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs one flight search.
    ///
    /// Builds the search URL, acquires a session from `provider`, loads the
    /// result page, waits for it to become ready, extracts and normalizes the
    /// offers, and ranks them. The session is released on every path once it
    /// has been acquired; a failed release is logged and does not change the
    /// outcome.
    ///
    /// Field-level problems never fail the search. They are counted in `stats`
    /// together with the run-level error category of a failed search.
    ///
    /// # Errors
    ///
    /// - `SearchError::SessionAcquisition` if no session could be started
    /// - `SearchError::Navigation` if the result page could not be loaded
    /// - `SearchError::NavigationTimeout` if the page never became ready
    /// - `SearchError::Session` if the session failed while the page was read
    pub async fn search_flights<P: SessionProvider>(
        request: &SearchRequest,
        provider: &P,
        config: &Config,
        stats: &ExtractionStats,
    ) -> Result<SearchReport, SearchError> {
        let start_time = Instant::now();
        let search_url = build_search_url(&config.base_url, request);
        info!(
            "Searching flights {} → {} departing {}{}",
            request.origin(),
            request.destination(),
            request.depart_date(),
            request
                .return_date()
                .map(|d| format!(", returning {d}"))
                .unwrap_or_default()
        );
        debug!("Search URL: {}", search_url);

        let result = match provider.acquire(config.headless).await {
            Ok(mut session) => {
                let outcome = read_result_page(&mut session, &search_url, config, stats).await;
                if let Err(e) = session.release().await {
                    warn!("Failed to release rendering session: {}", e);
                }
                outcome
            }
            Err(e) => Err(SearchError::SessionAcquisition(e)),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                stats.increment_error(e.error_type());
                return Err(e);
            }
        };

        let blocks_dropped = outcome.blocks_dropped();
        let listings = rank_listings(
            outcome
                .offers
                .into_iter()
                .map(|raw| normalize_offer(raw, &config.sold_out_label, stats))
                .collect(),
        );
        stats.add_info(InfoType::ListingsEmitted, listings.len());

        Ok(SearchReport {
            listings,
            search_url,
            blocks_found: outcome.blocks_found,
            blocks_dropped,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Runs one flight search and returns its listings, or none if it failed.
    ///
    /// The failure is logged at warn level; an empty result is indistinguishable
    /// from a search that found no flights. Use [`search_flights`] to tell them
    /// apart.
    pub async fn search_flights_or_empty<P: SessionProvider>(
        request: &SearchRequest,
        provider: &P,
        config: &Config,
        stats: &ExtractionStats,
    ) -> Vec<FlightListing> {
        match search_flights(request, provider, config, stats).await {
            Ok(report) => report.listings,
            Err(e) => {
                warn!("Flight search failed, returning no flights: {}", e);
                Vec::new()
            }
        }
    }

    async fn read_result_page<S: RenderingSession>(
        session: &mut S,
        search_url: &str,
        config: &Config,
        stats: &ExtractionStats,
    ) -> Result<ExtractionOutcome, SearchError> {
        session
            .navigate(search_url)
            .await
            .map_err(SearchError::Navigation)?;

        let policy = ReadinessPolicy::from_config(config);
        wait_for_ready(session, &policy, stats).await?;

        let ctx = ExtractionContext {
            layout: &config.layout,
            base_url: &config.base_url,
            search_url,
            pacing: config.block_pacing,
            stats,
        };
        let outcome = extract_offers(session, &ctx).await?;
        info!(
            "Extracted {} offer(s) from {} block(s)",
            outcome.offers.len(),
            outcome.blocks_found
        );
        Ok(outcome)
    }
}
