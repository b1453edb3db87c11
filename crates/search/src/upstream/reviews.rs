//! Reviews upstream client.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::retry::with_retry;
use super::{UpstreamError, UpstreamService, get_json};

/// A single product review.
///
/// `created_at` is an opaque timestamp string; the reviews upstream is
/// authoritative for its format and the descending-by-creation ordering of
/// the returned sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub rating: u8,
    pub title: String,
    pub text: String,
    pub created_at: String,
    pub author: String,
}

/// Client for the reviews upstream.
#[derive(Clone)]
pub struct ReviewsClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
}

impl ReviewsClient {
    /// Create a new reviews client.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, max_attempts: u32) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_attempts,
        }
    }

    /// List the reviews of a product, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] classified per the shared taxonomy.
    pub async fn list(&self, product_id: &str) -> Result<Vec<Review>, UpstreamError> {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("productId", product_id.trim())
            .finish();
        let uri = format!("{}/reviews?{query}", self.base_url);
        with_retry(self.max_attempts, UpstreamError::is_retryable, || {
            get_json(&self.http, UpstreamService::Reviews, &uri)
        })
        .await
    }
}
