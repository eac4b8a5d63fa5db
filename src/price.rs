//! Price normalization.
//!
//! Turns the locale-formatted price label of an offer block (for example
//! `"1,500,000 تومان"` or `"۱٬۲۰۰٬۰۰۰"`) into a comparable [`PriceValue`]. Every
//! input maps to a defined output; nothing here fails.

use crate::error_handling::{ExtractionStats, InfoType, WarningType};
use crate::models::{FlightListing, PriceValue, RawOffer};

/// Price text and value after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPrice {
    /// Display text: the label as read, or the sold-out label
    pub text: String,
    /// Comparable value
    pub value: PriceValue,
}

impl NormalizedPrice {
    fn sold_out(label: &str) -> Self {
        Self {
            text: label.to_string(),
            value: PriceValue::SoldOut,
        }
    }
}

/// Decimal value of a digit character.
///
/// Accepts ASCII digits as well as Arabic-Indic (U+0660..U+0669) and Extended
/// Arabic-Indic (U+06F0..U+06F9) digits, which the target site uses interchangeably.
fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        '\u{0660}'..='\u{0669}' => Some(c as u64 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => Some(c as u64 - 0x06F0),
        _ => None,
    }
}

/// Extracts every digit from `text` and reads them as one non-negative integer.
///
/// Returns `None` when the text contains no digit. Values beyond `u64::MAX`
/// saturate rather than wrap.
pub fn extract_number(text: &str) -> Option<u64> {
    let mut digits = text.chars().filter_map(digit_value).peekable();
    digits.peek()?;
    Some(digits.fold(0u64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(digit)
    }))
}

/// Normalizes a raw price label.
///
/// A label with at least one digit keeps its text and gets the parsed amount.
/// A missing label, or one without any digit, becomes `sold_out_label` with the
/// [`PriceValue::SoldOut`] sentinel.
pub fn normalize_price(raw: Option<&str>, sold_out_label: &str) -> NormalizedPrice {
    match raw.and_then(|text| extract_number(text).map(|value| (text, value))) {
        Some((text, value)) => NormalizedPrice {
            text: text.to_string(),
            value: PriceValue::Amount(value),
        },
        None => NormalizedPrice::sold_out(sold_out_label),
    }
}

/// Builds the listing for a raw offer, recording sold-out outcomes in `stats`.
pub fn normalize_offer(
    raw: RawOffer,
    sold_out_label: &str,
    stats: &ExtractionStats,
) -> FlightListing {
    let price = normalize_price(raw.price_text.as_deref(), sold_out_label);
    if price.value.is_sold_out() {
        if raw.price_text.is_some() {
            stats.increment_warning(WarningType::PriceWithoutDigits);
        }
        stats.increment_info(InfoType::SoldOutListings);
    }

    FlightListing::new(
        raw.departure_time,
        price.text,
        price.value,
        Some(raw.booking_link),
    )
}
