//! Sellers upstream client.

use serde::{Deserialize, Serialize};

use super::retry::with_retry;
use super::{UpstreamError, UpstreamService, get_json};

/// Public information about a seller.
///
/// `Seller::default()` — every field unset — is the degraded value used when
/// the sellers upstream is unavailable. It is distinguishable from a real
/// seller by having no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: Option<String>,
    pub nickname: Option<String>,
    #[serde(default)]
    pub reputation: f64,
    pub metrics: Option<SellerMetrics>,
}

/// Operational metrics of a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerMetrics {
    /// Cancellation rate over the observed period.
    pub cancellations: f64,
    /// Late-shipment rate over the observed period.
    pub delays: f64,
}

/// Client for the sellers upstream.
#[derive(Clone)]
pub struct SellersClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
}

impl SellersClient {
    /// Create a new sellers client.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, max_attempts: u32) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_attempts,
        }
    }

    /// Fetch a seller by id.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] classified per the shared taxonomy.
    pub async fn get_by_id(&self, seller_id: &str) -> Result<Seller, UpstreamError> {
        let uri = format!(
            "{}/sellers/{}",
            self.base_url,
            urlencoding::encode(seller_id.trim())
        );
        with_retry(self.max_attempts, UpstreamError::is_retryable, || {
            get_json(&self.http, UpstreamService::Sellers, &uri)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seller_has_no_id() {
        let seller = Seller::default();
        assert!(seller.id.is_none());
        assert!(seller.nickname.is_none());
        assert!(seller.metrics.is_none());
        assert!((seller.reputation - 0.0).abs() < f64::EPSILON);
    }
}
