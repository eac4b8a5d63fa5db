//! Rendering ranked listings for the terminal.

use crate::config::OutputFormat;
use crate::models::FlightListing;

/// Message printed in plain mode when a search yields nothing.
pub const NO_FLIGHTS_MESSAGE: &str = "No flights found";

/// Renders listings in rank order.
///
/// Plain output numbers the listings from 1; JSON output is a pretty-printed
/// array (`[]` when empty).
pub fn render_listings(
    listings: &[FlightListing],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(listings),
        OutputFormat::Plain if listings.is_empty() => Ok(NO_FLIGHTS_MESSAGE.to_string()),
        OutputFormat::Plain => Ok(listings
            .iter()
            .enumerate()
            .map(|(i, listing)| plain_line(i + 1, listing))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn plain_line(rank: usize, listing: &FlightListing) -> String {
    format!(
        "{}. 🕒 {} | 💰 {} | 🔗 {}",
        rank,
        listing.departure_time(),
        listing.price_text(),
        listing.booking_link().unwrap_or("-")
    )
}
