//! Listing ranking.

use std::cmp::Ordering;

use crate::models::FlightListing;

/// Orders two listings by availability, then price, then departure time.
///
/// Available offers come before sold-out ones, cheaper before dearer, and
/// lexicographically earlier departure labels first. Departure labels are compared
/// as text, which matches time order only for zero-padded `HH:MM` labels.
pub fn compare_listings(a: &FlightListing, b: &FlightListing) -> Ordering {
    a.is_full()
        .cmp(&b.is_full())
        .then_with(|| a.price_value().cmp(&b.price_value()))
        .then_with(|| a.departure_time().cmp(b.departure_time()))
}

/// Sorts listings for presentation.
///
/// The sort is stable: listings equal on every key keep their extraction order.
pub fn rank_listings(mut listings: Vec<FlightListing>) -> Vec<FlightListing> {
    listings.sort_by(compare_listings);
    listings
}
