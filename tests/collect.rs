//! Integration tests for the markers fetcher and the collection pipeline
//! using wiremock HTTP mocks.

use bezrealitky_scout::config::{ScoutConfig, DEFAULT_LISTING_BASE_URL};
use bezrealitky_scout::{
    collect, BezrealitkyScraper, Boundary, OfferBuilder, OfferScraper, OfferType, Region,
    ScoutError, SearchParams,
};
use reqwest::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server_uri: &str) -> ScoutConfig {
    ScoutConfig {
        markers_url: Url::parse(&format!("{server_uri}/api/record/markers"))
            .expect("mock server URL should parse"),
        ..ScoutConfig::default()
    }
}

fn markers_body() -> serde_json::Value {
    serde_json::json!([
        {
            "uri": "612345-nabidka-prodej-bytu-praha",
            "timeOrder": { "date": "2021-05-01T12:00:00+02:00", "timezone_type": 1 },
            "advertEstateOffer": [{
                "id": "612345",
                "price": 3500000,
                "currency": "CZK",
                "surface": 75,
                "gps": { "lat": 50.08, "lng": 14.42 },
                "keyOfferType": "prodej",
                "keyEstateType": "byt",
                "keyDisposition": "3-kk"
            }]
        },
        {
            "uri": "612346-nabidka-prodej-domu-brno",
            "timeOrder": { "date": "2021-05-02T08:30:00+02:00" },
            "advertEstateOffer": [{
                "id": 612346,
                "price": 7900000,
                "currency": "CZK",
                "surface": 140,
                "surfaceLand": 620,
                "keyOfferType": "prodej",
                "keyEstateType": "dum",
                "keyDisposition": "5-1"
            }]
        }
    ])
}

#[tokio::test]
async fn fetch_markers_posts_search_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/record/markers"))
        .and(query_param("offerType", "prodej"))
        .and(query_param("boundary", Boundary::czechia().to_query_value()))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = BezrealitkyScraper::new(&test_config(&server.uri()))
        .expect("client construction should not fail");
    let body = scraper.fetch_markers().await.expect("should fetch markers");

    assert_eq!(body, "[]");
}

#[tokio::test]
async fn fetch_markers_sends_optional_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/record/markers"))
        .and(query_param("offerType", "pronajem"))
        .and(query_param("estateType", "byt"))
        .and(query_param("disposition", "2-kk"))
        .and(query_param("boundary", Boundary::slovakia().to_query_value()))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let params = SearchParams {
        offer_type: OfferType::Pronajem,
        boundary: Region::Slovakia.boundary(),
        estate_type: Some("byt".to_string()),
        disposition: Some("2-kk".to_string()),
    };
    let scraper = BezrealitkyScraper::with_params(&test_config(&server.uri()), params)
        .expect("client construction should not fail");

    scraper.fetch_markers().await.expect("should fetch markers");
}

#[tokio::test]
async fn fetch_markers_reports_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/record/markers"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let scraper = BezrealitkyScraper::new(&test_config(&server.uri()))
        .expect("client construction should not fail");
    let err = scraper.fetch_markers().await.unwrap_err();

    assert!(
        matches!(err, ScoutError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn collect_builds_offers_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/record/markers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(markers_body()))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let scraper = BezrealitkyScraper::new(&config).expect("client construction should not fail");
    let mut builder = OfferBuilder::new();

    let run = collect(&scraper, &config.listing_base_url, &mut builder)
        .await
        .expect("collection should succeed");

    assert_eq!(run.count, 2);
    assert_eq!(run.offers.len(), 2);
    assert_eq!(builder.constructed(), 2);

    let apartment = &run.offers[0];
    assert_eq!(apartment.id().unwrap(), "612345");
    assert_eq!(
        apartment.url(),
        format!("{DEFAULT_LISTING_BASE_URL}612345-nabidka-prodej-bytu-praha")
    );
    assert_eq!(apartment.surface_land(), None);
    assert_eq!(
        apartment.summary().expect("summary should format"),
        "2021-05-01T12:00:00; 3,500,000 CZK; prodej; byt; 3-kk; 75m2; \
         https://www.bezrealitky.cz/nemovitosti-byty-domy/612345-nabidka-prodej-bytu-praha"
    );

    let house = &run.offers[1];
    assert_eq!(house.id().unwrap(), "612346");
    assert_eq!(house.surface_land(), Some(620.0));
    assert_eq!(house.key_estate_type(), Some("dum"));
}

#[tokio::test]
async fn collect_fails_on_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/record/markers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Not JSON</html>"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let scraper = BezrealitkyScraper::new(&config).expect("client construction should not fail");
    let mut builder = OfferBuilder::new();

    let err = collect(&scraper, &config.listing_base_url, &mut builder)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScoutError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn collect_fails_on_empty_estate_offer() {
    let server = MockServer::start().await;

    let body = serde_json::json!([
        { "uri": "byt-1", "advertEstateOffer": [{ "id": 1 }] },
        { "uri": "byt-2", "advertEstateOffer": [] }
    ]);
    Mock::given(method("POST"))
        .and(path("/api/record/markers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let scraper = BezrealitkyScraper::new(&config).expect("client construction should not fail");
    let mut builder = OfferBuilder::new();

    let err = collect(&scraper, &config.listing_base_url, &mut builder)
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScoutError::MissingEstateOffer { index: 1, .. }),
        "expected MissingEstateOffer, got: {err:?}"
    );
    assert_eq!(builder.constructed(), 0);
}

#[tokio::test]
async fn builder_counts_across_runs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/record/markers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(markers_body()))
        .mount(&server)
        .await;

    let config = test_config(&server.uri());
    let scraper = BezrealitkyScraper::new(&config).expect("client construction should not fail");
    let mut builder = OfferBuilder::new();

    for _ in 0..3 {
        collect(&scraper, &config.listing_base_url, &mut builder)
            .await
            .expect("collection should succeed");
    }

    assert_eq!(builder.constructed(), 6);
}
