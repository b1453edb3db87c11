//! End-to-end tests through the axum router and error envelope.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mercatus_integration_tests::{
    breadcrumb_json, get_json, page_json, product_json, qa_json, reviews_json, seller_json,
    test_app,
};
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_full_item(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/products/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(id, "C1", "S1")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/C1/breadcrumb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(breadcrumb_json("C1")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sellers/S1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(seller_json("S1")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reviews_json(id)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/qa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(qa_json(id)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn health_returns_plain_ok() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri(), 0);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body reads")
        .to_bytes();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn get_item_returns_basic_view() {
    let server = MockServer::start().await;
    mount_full_item(&server, "P1").await;
    let app = test_app(&server.uri(), 0);

    let (status, body) = get_json(app, "/items/P1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "P1");
    assert_eq!(body["title"], "Product P1");
    // Decimal amounts serialize as strings on the way out.
    assert_eq!(body["price"]["amount"], "150");
    assert_eq!(body["categoryBreadcrumb"][1]["id"], "C1");
    // Basic view carries no enrichment keys.
    assert!(body.get("seller").is_none());
    assert!(body.get("reviews").is_none());
}

#[tokio::test]
async fn get_enriched_item_includes_all_sections() {
    let server = MockServer::start().await;
    mount_full_item(&server, "P1").await;
    let app = test_app(&server.uri(), 0);

    let (status, body) = get_json(app, "/items/P1/enriched").await;
    assert_eq!(status, StatusCode::OK);
    // The basic view is a nested object, not flattened into the root.
    assert_eq!(body["basic"]["id"], "P1");
    assert_eq!(body["basic"]["price"]["amount"], "150");
    assert!(body.get("id").is_none());
    assert_eq!(body["seller"]["id"], "S1");
    assert_eq!(body["reviews"][0]["productId"], "P1");
    assert_eq!(body["qa"][0]["answers"][0]["questionId"], "Q1");
}

#[tokio::test]
async fn missing_item_maps_to_404_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/NOPE"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "not found"})),
        )
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), 0);

    let (status, body) = get_json(app, "/items/NOPE").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MS-01-101");
    assert_eq!(body["httpStatus"], 404);
    assert!(body["uri"].as_str().is_some_and(|u| u.contains("/products/NOPE")));
    assert!(body["responseBody"]
        .as_str()
        .is_some_and(|b| b.contains("not found")));
}

#[tokio::test]
async fn upstream_failure_maps_to_502_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/P1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3) // 1 initial + 2 retries
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), 2);

    let (status, body) = get_json(app, "/items/P1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "MS-01-102");
    assert_eq!(body["httpStatus"], 502);
}

#[tokio::test]
async fn invalid_listing_request_maps_to_400_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1) // invalid requests are terminal, never retried
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), 2);

    let (status, body) = get_json(app, "/items/enriched?page=9999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MS-01-100");
    assert_eq!(body["httpStatus"], 400);
}

#[tokio::test]
async fn enriched_listing_forwards_filters_and_preserves_metadata() {
    let server = MockServer::start().await;
    let products = vec![product_json("P1", "C1", "S1"), product_json("P2", "C1", "S1")];
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("categoryId", "C1"))
        .and(query_param("q", "guitar"))
        .and(query_param("page", "0"))
        .and(query_param("elements", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(0, 2, 5, products)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/(categories|sellers|reviews|qa)"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = test_app(&server.uri(), 0);

    let (status, body) =
        get_json(app, "/items/enriched?categoryId=C1&q=guitar&page=0&elements=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 0);
    assert_eq!(body["size"], 2);
    assert_eq!(body["totalItems"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["hasPrev"], false);
    assert_eq!(body["hasNext"], true);
    assert_eq!(body["items"][0]["basic"]["id"], "P1");
    assert_eq!(body["items"][1]["basic"]["id"], "P2");
    // Degraded sellers serialize without an id.
    assert!(body["items"][0]["seller"]["id"].is_null());
}
