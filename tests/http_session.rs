//! HTTP session backend against a local mock server.

mod helpers;

use std::sync::Arc;

use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flight_scan::initialization::init_client;
use flight_scan::{
    search_flights, Config, ExtractionStats, HttpSessionProvider, PriceValue, SearchError,
    SearchRequest,
};
use helpers::{fast_config, result_page};

fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: Url::parse(&server.uri()).expect("mock server URI"),
        ..fast_config()
    }
}

#[tokio::test]
async fn test_fetches_and_ranks_server_rendered_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flights/MHD-THR"))
        .and(query_param("adult", "2"))
        .and(query_param("departing", "1404-08-14"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_page(&[
            (Some("14:20"), Some("2,100,000"), Some("go('/checkout/late')")),
            (Some("06:10"), Some("1,900,000"), Some("go('/checkout/early')")),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let provider = HttpSessionProvider::new(init_client(&config).expect("client"));
    let request = SearchRequest::new("MHD", "THR", "1404-08-14").with_adults(2);
    let stats = ExtractionStats::new();

    let report = search_flights(&request, &provider, &config, &stats)
        .await
        .expect("search should succeed");

    assert_eq!(report.listings.len(), 2);
    assert_eq!(report.listings[0].departure_time(), "06:10");
    assert_eq!(
        report.listings[0].price_value(),
        PriceValue::Amount(1_900_000)
    );
    assert_eq!(
        report.listings[0].booking_link(),
        Some(format!("{}/checkout/early", server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_server_error_is_a_navigation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let provider = HttpSessionProvider::new(Arc::new(reqwest::Client::new()));
    let result = search_flights(
        &SearchRequest::new("MHD", "THR", "1404-08-14"),
        &provider,
        &config,
        &ExtractionStats::new(),
    )
    .await;

    assert!(matches!(result, Err(SearchError::Navigation(_))));
}

#[tokio::test]
async fn test_page_without_offers_is_empty_not_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flights/KIH-SYZ"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_page(&[])))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let provider = HttpSessionProvider::new(init_client(&config).expect("client"));
    let report = search_flights(
        &SearchRequest::new("KIH", "SYZ", "1404-09-01"),
        &provider,
        &config,
        &ExtractionStats::new(),
    )
    .await
    .expect("empty results are not an error");

    assert!(report.listings.is_empty());
    assert_eq!(report.blocks_found, 0);
}
