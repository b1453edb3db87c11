//! Item route handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use mercatus_core::Page;
use serde::Deserialize;

use crate::error::Result;
use crate::service::items::{ItemBasic, ItemEnriched};
use crate::state::AppState;
use crate::upstream::products::ProductQuery;

/// Query parameters of the enriched page listing.
///
/// All parameters are optional; filters are forwarded to the products
/// upstream as-is (it is authoritative for their interpretation).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPageQuery {
    pub category_id: Option<String>,
    pub seller_id: Option<String>,
    pub q: Option<String>,
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size.
    pub elements: Option<u32>,
}

impl From<EnrichedPageQuery> for ProductQuery {
    fn from(query: EnrichedPageQuery) -> Self {
        Self {
            category_id: query.category_id,
            seller_id: query.seller_id,
            q: query.q,
            page: query.page,
            elements: query.elements,
        }
    }
}

/// Basic item view: product joined with its category breadcrumb.
pub async fn basic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemBasic>> {
    Ok(Json(state.items().basic(&id).await?))
}

/// Enriched item view: basic data plus seller, reviews, and Q&A.
pub async fn enriched(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemEnriched>> {
    Ok(Json(state.items().enriched(&id).await?))
}

/// Page of enriched items with filters and pagination forwarded verbatim.
pub async fn enriched_page(
    State(state): State<AppState>,
    Query(query): Query<EnrichedPageQuery>,
) -> Result<Json<Page<ItemEnriched>>> {
    Ok(Json(state.items().enriched_page(&query.into()).await?))
}
