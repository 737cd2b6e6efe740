//! Catalog controller behavior: backend search, fallbacks, and the
//! stale-response guard.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reloc_api::ApiClient;
use reloc_app::{CatalogController, FallbackPolicy, LoadingTracker};
use reloc_core::SeedCatalog;

fn controller(base_url: &str, policy: FallbackPolicy) -> CatalogController {
    let api = Arc::new(
        ApiClient::with_base_url(base_url, 5, "justrelocation-test/0.1")
            .expect("client construction should not fail"),
    );
    CatalogController::new(
        api,
        SeedCatalog::builtin().expect("embedded catalog must be valid"),
        policy,
        LoadingTracker::default(),
    )
}

fn vendor_json(id: &str, tier: &str, rating: f64) -> serde_json::Value {
    json!({
        "id": id,
        "business_name": format!("{id} Ltd"),
        "service_category": "Housing",
        "description": "Flat near the hospital",
        "location": "Central London",
        "tier": tier,
        "rating": rating,
    })
}

#[tokio::test]
async fn search_commits_backend_results_in_canonical_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/search"))
        .and(query_param("category", "housing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                vendor_json("basic", "basic", 5.0),
                vendor_json("premium", "premium", 4.1),
                vendor_json("featured", "featured", 4.9),
            ]
        })))
        .mount(&server)
        .await;

    let catalog = controller(&server.uri(), FallbackPolicy::Surface);
    let results = catalog.search("", "housing").await;

    let ids: Vec<&str> = results.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["premium", "featured", "basic"]);
    assert_eq!(catalog.results().len(), 3, "results view committed");
}

#[tokio::test]
async fn failed_search_filters_the_last_loaded_list() {
    let server = MockServer::start().await;

    // The filtered search errors; the initial unfiltered load succeeds.
    Mock::given(method("GET"))
        .and(path("/services/search"))
        .and(query_param("category", "housing"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                vendor_json("flat", "basic", 4.2),
                {
                    "id": "bank",
                    "business_name": "Bank Ltd",
                    "service_category": "Banking",
                    "description": "Accounts",
                    "location": "Nationwide",
                    "tier": "featured",
                    "rating": 4.6,
                },
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hospitals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let catalog = controller(&server.uri(), FallbackPolicy::Surface);
    catalog.load().await.expect("load succeeds");

    let results = catalog.search("", "housing").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "flat");
}

#[tokio::test]
async fn seed_policy_substitutes_the_catalog_when_the_backend_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let catalog = controller(&server.uri(), FallbackPolicy::Seed);
    catalog.load().await.expect("seed policy absorbs the failure");

    assert!(!catalog.vendors().is_empty());
    assert_eq!(catalog.hospitals().len(), 5);
}

#[tokio::test]
async fn surface_policy_propagates_load_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let catalog = controller(&server.uri(), FallbackPolicy::Surface);
    let result = catalog.load().await;
    assert!(
        matches!(result, Err(reloc_api::ApiError::Server { status: 500, .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn a_slow_stale_response_never_clobbers_a_newer_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/search"))
        .and(query_param("category", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(300))
                .set_body_json(json!({ "results": [vendor_json("stale", "basic", 4.0)] })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services/search"))
        .and(query_param("category", "fast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "results": [vendor_json("current", "basic", 4.0)] })),
        )
        .mount(&server)
        .await;

    let catalog = Arc::new(controller(&server.uri(), FallbackPolicy::Surface));

    let slow = {
        let catalog = Arc::clone(&catalog);
        tokio::spawn(async move { catalog.search("", "slow").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = catalog.search("", "fast").await;
    let slow = slow.await.expect("search task");

    assert_eq!(fast[0].id, "current");
    assert_eq!(slow[0].id, "current", "stale result replaced by the newer view");
    assert_eq!(catalog.results()[0].id, "current");
}
