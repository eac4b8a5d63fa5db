//! Search requests and target URL construction.

use serde::Serialize;
use url::Url;

use crate::config::{CHILD_COUNT, INFANT_COUNT};

/// A flight search as collected from the caller.
///
/// The caller guarantees syntactic plausibility (non-empty codes, date-like
/// tokens, at least one adult); no further validation happens here. The request
/// is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    origin: String,
    destination: String,
    depart_date: String,
    return_date: Option<String>,
    adult_count: u32,
}

impl SearchRequest {
    /// A one-way search for a single adult.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        depart_date: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            depart_date: depart_date.into(),
            return_date: None,
            adult_count: 1,
        }
    }

    /// Turns the search into a round trip.
    pub fn with_return(mut self, return_date: impl Into<String>) -> Self {
        self.return_date = Some(return_date.into());
        self
    }

    /// Sets the number of adult passengers.
    pub fn with_adults(mut self, adult_count: u32) -> Self {
        self.adult_count = adult_count;
        self
    }

    /// Origin airport or city code.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination airport or city code.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Outbound date token, passed through as given.
    pub fn depart_date(&self) -> &str {
        &self.depart_date
    }

    /// Return date for round trips.
    pub fn return_date(&self) -> Option<&str> {
        self.return_date.as_deref()
    }

    /// Number of adult passengers.
    pub fn adult_count(&self) -> u32 {
        self.adult_count
    }
}

/// Builds the canonical result-page URL for a search.
///
/// Produces `{base}/flights/{origin}-{destination}?adult=N&child=0&infant=0&departing=D`
/// with `&returning=R` appended for round trips. Any path or query already present on
/// `base_url` is replaced.
///
/// # Examples
///
/// ```
/// use flight_scan::{build_search_url, SearchRequest};
/// use url::Url;
///
/// let base = Url::parse("https://www.alibaba.ir").unwrap();
/// let request = SearchRequest::new("MHD", "THR", "1404-08-14");
/// assert_eq!(
///     build_search_url(&base, &request),
///     "https://www.alibaba.ir/flights/MHD-THR?adult=1&child=0&infant=0&departing=1404-08-14"
/// );
/// ```
pub fn build_search_url(base_url: &Url, request: &SearchRequest) -> String {
    let mut url = base_url.clone();
    url.set_path(&format!(
        "/flights/{}-{}",
        request.origin(),
        request.destination()
    ));
    url.set_query(None);
    url.set_fragment(None);

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("adult", &request.adult_count().to_string())
            .append_pair("child", &CHILD_COUNT.to_string())
            .append_pair("infant", &INFANT_COUNT.to_string())
            .append_pair("departing", request.depart_date());
        if let Some(return_date) = request.return_date() {
            query.append_pair("returning", return_date);
        }
    }

    url.to_string()
}
