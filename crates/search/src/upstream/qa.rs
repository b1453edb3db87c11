//! Q&A upstream client.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::retry::with_retry;
use super::{UpstreamError, UpstreamService, get_json};

/// A buyer question with its ordered answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub product_id: String,
    pub author: String,
    pub text: String,
    pub created_at: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// An answer to a buyer question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub author: String,
    pub text: String,
    pub created_at: String,
}

/// Client for the Q&A upstream.
#[derive(Clone)]
pub struct QaClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
}

impl QaClient {
    /// Create a new Q&A client.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, max_attempts: u32) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_attempts,
        }
    }

    /// List the questions asked on a product, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] classified per the shared taxonomy.
    pub async fn list_by_product(&self, product_id: &str) -> Result<Vec<Question>, UpstreamError> {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("productId", product_id.trim())
            .finish();
        let uri = format!("{}/qa?{query}", self.base_url);
        with_retry(self.max_attempts, UpstreamError::is_retryable, || {
            get_json(&self.http, UpstreamService::Qa, &uri)
        })
        .await
    }
}
