//! Mercatus Search Gateway library.
//!
//! This crate provides the aggregation gateway as a library, allowing it to
//! be tested end to end and reused.
//!
//! # Architecture
//!
//! - Axum web framework exposing three read-only item views
//! - Five thin reqwest clients over the catalog upstream services
//! - Concurrent fan-out with per-field degradation in the composition layer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;
pub mod upstream;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the gateway application router over the given state.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check upstreams.
async fn health() -> &'static str {
    "ok"
}
