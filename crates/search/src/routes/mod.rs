//! HTTP route handlers for the search gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Items
//! GET  /items/{id}             - Basic item view (product + breadcrumb)
//! GET  /items/{id}/enriched    - Enriched item view (+ seller, reviews, Q&A)
//! GET  /items/enriched         - Page of enriched items
//!                                (?categoryId&sellerId&q&page&elements)
//! ```

pub mod items;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the item routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items/enriched", get(items::enriched_page))
        .route("/items/{id}", get(items::basic))
        .route("/items/{id}/enriched", get(items::enriched))
}
