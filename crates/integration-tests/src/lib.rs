//! Shared fixtures for the gateway integration tests.
//!
//! Tests run the real gateway code against `wiremock` stand-ins for the
//! five upstream services. One mock server plays all five roles: the
//! upstream path templates (`/products`, `/categories`, `/sellers`,
//! `/reviews`, `/qa`) never collide, which mirrors how the facade tests of
//! a single fake upstream would be wired in a local environment.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mercatus_search::config::{Domains, HttpConfig, RetryConfig, SearchConfig};
use mercatus_search::service::ItemService;
use mercatus_search::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Gateway configuration with every upstream pointed at `base_url`.
#[must_use]
pub fn test_config(base_url: &str, max_attempts: u32) -> SearchConfig {
    SearchConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        domains: Domains {
            products_base_url: base_url.to_string(),
            categories_base_url: base_url.to_string(),
            sellers_base_url: base_url.to_string(),
            reviews_base_url: base_url.to_string(),
            qa_base_url: base_url.to_string(),
        },
        retry: RetryConfig { max_attempts },
        http: HttpConfig {
            timeout: Duration::from_secs(5),
        },
        sentry_dsn: None,
    }
}

/// Application state over a single mock upstream.
#[must_use]
pub fn test_state(base_url: &str, max_attempts: u32) -> AppState {
    AppState::new(test_config(base_url, max_attempts)).expect("http client builds")
}

/// Item service over a single mock upstream.
#[must_use]
pub fn item_service(base_url: &str, max_attempts: u32) -> ItemService {
    test_state(base_url, max_attempts).items().clone()
}

/// Gateway router over a single mock upstream.
#[must_use]
pub fn test_app(base_url: &str, max_attempts: u32) -> Router {
    mercatus_search::app(test_state(base_url, max_attempts))
}

/// Issue one GET against the router and decode the JSON response.
///
/// # Panics
///
/// Panics if the request cannot be issued or the body is not JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, value)
}

/// A product owned by seller `sellerId` in category `categoryId`.
#[must_use]
pub fn product_json(id: &str, category_id: &str, seller_id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "price": 150,
        "currency": "USD",
        "thumbnail": format!("https://img.test/{id}.jpg"),
        "pictures": [format!("https://img.test/{id}-1.jpg")],
        "sellerId": seller_id,
        "categoryId": category_id,
        "attributes": [{"name": "Color", "value": "Black"}],
        "condition": "new",
        "description": "A product used by the integration tests",
        "stock": 7,
        "hasPromotion": false
    })
}

/// A two-level breadcrumb ending at `category_id`.
#[must_use]
pub fn breadcrumb_json(category_id: &str) -> Value {
    json!([
        {"id": "ROOT", "name": "Home"},
        {"id": category_id, "name": format!("Category {category_id}")}
    ])
}

/// A seller with full metrics.
#[must_use]
pub fn seller_json(seller_id: &str) -> Value {
    json!({
        "id": seller_id,
        "nickname": format!("shop-{seller_id}"),
        "reputation": 0.93,
        "metrics": {"cancellations": 0.01, "delays": 0.05}
    })
}

/// One review for `product_id`.
#[must_use]
pub fn reviews_json(product_id: &str) -> Value {
    json!([
        {
            "id": "R1",
            "productId": product_id,
            "rating": 5,
            "title": "Great",
            "text": "Exactly as described",
            "createdAt": "2024-11-05T10:00:00Z",
            "author": "buyer-1"
        }
    ])
}

/// One answered question for `product_id`.
#[must_use]
pub fn qa_json(product_id: &str) -> Value {
    json!([
        {
            "id": "Q1",
            "productId": product_id,
            "author": "buyer-2",
            "text": "Does it ship internationally?",
            "createdAt": "2024-11-06T09:00:00Z",
            "answers": [
                {
                    "id": "A1",
                    "questionId": "Q1",
                    "author": "seller",
                    "text": "Yes",
                    "createdAt": "2024-11-06T10:30:00Z"
                }
            ]
        }
    ])
}

/// A page envelope around `items` with distinctive metadata.
#[must_use]
pub fn page_json(page: u32, size: u32, total_items: u64, items: Vec<Value>) -> Value {
    let total_pages = if size == 0 {
        0
    } else {
        total_items.div_ceil(u64::from(size))
    };
    json!({
        "page": page,
        "size": size,
        "totalItems": total_items,
        "totalPages": total_pages,
        "hasPrev": page > 0,
        "hasNext": u64::from(page + 1) * u64::from(size) < total_items,
        "items": items
    })
}
