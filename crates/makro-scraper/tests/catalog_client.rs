//! Integration tests for `CatalogClient::fetch_product_document`.
//!
//! Each test stands up a local `wiremock` server in place of the storefront,
//! so no real network traffic is made.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use makro_scraper::{assemble_record, CatalogClient, CatalogParams, ScraperError};

const DETAIL_PATH: &str = "/evaluate.article.v1/betty-articles";

fn test_client() -> CatalogClient {
    CatalogClient::new(5, "makro-test/0.1", 0, 0).expect("failed to build test CatalogClient")
}

fn test_client_with_retries(max_retries: u32) -> CatalogClient {
    CatalogClient::new(5, "makro-test/0.1", max_retries, 0)
        .expect("failed to build test CatalogClient")
}

fn detail_response(product_id: &str) -> serde_json::Value {
    let document = json!({
        "brandName": "Hacendado",
        "variants": {"0032": {
            "description": "Leche entera 1L",
            "bundles": {"0021": {
                "customerDisplayId": "654321",
                "stores": {"00057": {"sellingPriceInfo": {
                    "finalPrice": 1.04,
                    "shelfPrice": 0.99,
                    "kgGross": 1.04
                }}}
            }}
        }}
    });
    let mut result = serde_json::Map::new();
    result.insert(product_id.to_owned(), document);
    json!({ "result": result })
}

async fn fetch(
    client: &CatalogClient,
    server: &MockServer,
    product_id: &str,
) -> Result<serde_json::Value, ScraperError> {
    client
        .fetch_product_document(&server.uri(), product_id, &CatalogParams::default())
        .await
}

#[tokio::test]
async fn returns_the_product_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .and(query_param("ids", "BTY-X654321"))
        .and(query_param("country", "ES"))
        .and(query_param("locale", "es-ES"))
        .and(query_param("storeIds", "00057"))
        .and(query_param("details", "true"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_response("BTY-X654321")))
        .expect(1)
        .mount(&server)
        .await;

    let document = fetch(&test_client(), &server, "BTY-X654321")
        .await
        .expect("expected Ok");

    assert_eq!(document["brandName"], "Hacendado");
    let extraction = assemble_record(&document, "BTY-X654321", &server.uri());
    assert_eq!(
        extraction.record.product_id_in_supermarket.as_deref(),
        Some("654321")
    );
    assert_eq!(extraction.record.unit_price, Some(1.04));
}

#[tokio::test]
async fn sends_cache_busting_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_response("BTY-X1")))
        .mount(&server)
        .await;

    fetch(&test_client(), &server, "BTY-X1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let stamp = requests[0]
        .url
        .query_pairs()
        .find(|(k, _)| k == "__t")
        .map(|(_, v)| v.into_owned())
        .expect("__t parameter");
    assert!(stamp.parse::<i64>().unwrap() > 1_600_000_000_000);
}

#[tokio::test]
async fn product_absent_from_result_is_missing_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch(&test_client_with_retries(2), &server, "BTY-X1")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::MissingProduct { ref product_id } if product_id == "BTY-X1"),
        "expected MissingProduct, got: {err:?}"
    );
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch(&test_client_with_retries(3), &server, "BTY-X1")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::NotFound { .. }),
        "expected NotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn html_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Access denied</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch(&test_client_with_retries(3), &server, "BTY-X1")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn forbidden_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch(&test_client_with_retries(2), &server, "BTY-X1")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 403, .. }),
        "expected UnexpectedStatus(403), got: {err:?}"
    );
}

#[tokio::test]
async fn rate_limit_reports_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&server)
        .await;

    let err = fetch(&test_client(), &server, "BTY-X1").await.unwrap_err();
    match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => assert_eq!(retry_after_secs, 30),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn retries_after_429_and_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_response("BTY-X1")))
        .mount(&server)
        .await;

    let document = fetch(&test_client_with_retries(1), &server, "BTY-X1")
        .await
        .expect("expected Ok after retry");
    assert_eq!(document["brandName"], "Hacendado");
}

#[tokio::test]
async fn retries_server_error_and_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_response("BTY-X1")))
        .mount(&server)
        .await;

    let result = fetch(&test_client_with_retries(1), &server, "BTY-X1").await;
    assert!(result.is_ok(), "expected Ok after retry, got: {result:?}");
}

#[tokio::test]
async fn returns_last_error_after_exhausting_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DETAIL_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let err = fetch(&test_client_with_retries(1), &server, "BTY-X1")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::RateLimited { .. }),
        "expected RateLimited after retry exhaustion, got: {err:?}"
    );
}

#[tokio::test]
async fn invalid_base_url_fails_before_any_request() {
    let client = test_client();
    let err = client
        .fetch_product_document("not a url", "BTY-X1", &CatalogParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::InvalidBaseUrl { .. }));
}
