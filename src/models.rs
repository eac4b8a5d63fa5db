//! Flight listing data structures.

use serde::{Serialize, Serializer};

/// Comparable price of an offer.
///
/// `SoldOut` is the maximal sentinel: it orders after every `Amount`, so sold-out
/// offers rank last regardless of any nominal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceValue {
    /// Price in the site's currency unit
    Amount(u64),
    /// No bookable price
    SoldOut,
}

impl PriceValue {
    /// The numeric amount, or `None` for sold-out offers.
    pub fn amount(&self) -> Option<u64> {
        match self {
            PriceValue::Amount(value) => Some(*value),
            PriceValue::SoldOut => None,
        }
    }

    /// `true` for the sold-out sentinel.
    pub fn is_sold_out(&self) -> bool {
        matches!(self, PriceValue::SoldOut)
    }
}

/// Serialized as the bare amount, or `null` when sold out.
impl Serialize for PriceValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PriceValue::Amount(value) => serializer.serialize_u64(*value),
            PriceValue::SoldOut => serializer.serialize_none(),
        }
    }
}

/// Raw fields read from one offer block, before price normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOffer {
    /// Never empty; blocks without a departure time produce no `RawOffer`
    pub departure_time: String,
    /// `None` when the price element could not be read
    pub price_text: Option<String>,
    /// Resolved booking URL, or the search URL as fallback
    pub booking_link: String,
}

/// One ranked flight offer.
///
/// `is_full` is derived from `price_value` at construction, so a listing is sold
/// out exactly when its price is the `SoldOut` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightListing {
    departure_time: String,
    price_text: String,
    price_value: PriceValue,
    is_full: bool,
    booking_link: Option<String>,
}

impl FlightListing {
    /// Builds a listing; `is_full` follows from `price_value`.
    pub fn new(
        departure_time: impl Into<String>,
        price_text: impl Into<String>,
        price_value: PriceValue,
        booking_link: Option<String>,
    ) -> Self {
        Self {
            departure_time: departure_time.into(),
            price_text: price_text.into(),
            price_value,
            is_full: price_value.is_sold_out(),
            booking_link,
        }
    }

    /// Time-of-day label as shown on the site (e.g. `08:30`).
    pub fn departure_time(&self) -> &str {
        &self.departure_time
    }

    /// Price as displayed, or the sold-out label.
    pub fn price_text(&self) -> &str {
        &self.price_text
    }

    /// Comparable price used for ranking.
    pub fn price_value(&self) -> PriceValue {
        self.price_value
    }

    /// `true` when no bookable price was found for the offer.
    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// Booking URL, or `None` when the listing carries no link.
    pub fn booking_link(&self) -> Option<&str> {
        self.booking_link.as_deref()
    }
}
