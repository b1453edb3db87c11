//! Categories upstream client.

use serde::{Deserialize, Serialize};

use super::retry::with_retry;
use super::{UpstreamError, UpstreamService, get_json};

/// One node of a category breadcrumb, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbNode {
    pub id: String,
    pub name: String,
}

/// Client for the categories upstream.
#[derive(Clone)]
pub struct CategoriesClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
}

impl CategoriesClient {
    /// Create a new categories client.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, max_attempts: u32) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_attempts,
        }
    }

    /// Fetch the root-first breadcrumb for a category.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] classified per the shared taxonomy.
    pub async fn breadcrumb(&self, category_id: &str) -> Result<Vec<BreadcrumbNode>, UpstreamError> {
        let uri = format!(
            "{}/categories/{}/breadcrumb",
            self.base_url,
            urlencoding::encode(category_id.trim())
        );
        with_retry(self.max_attempts, UpstreamError::is_retryable, || {
            get_json(&self.http, UpstreamService::Categories, &uri)
        })
        .await
    }
}
