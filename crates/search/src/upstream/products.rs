//! Products upstream client.
//!
//! The products service is the primary upstream: its failures are the only
//! ones the gateway ever propagates to callers.

use mercatus_core::Page;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::retry::with_retry;
use super::{UpstreamError, UpstreamService, get_json};

/// A product as served by the products upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub currency: String,
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub pictures: Vec<String>,
    pub seller_id: String,
    pub category_id: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub stock: Option<u32>,
    pub has_promotion: Option<bool>,
}

/// Descriptive name/value attribute of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Filters and pagination for the product listing, forwarded verbatim to
/// the upstream (which is authoritative for their interpretation).
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub seller_id: Option<String>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub elements: Option<u32>,
}

/// Client for the products upstream.
#[derive(Clone)]
pub struct ProductsClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
}

impl ProductsClient {
    /// Create a new products client.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, max_attempts: u32) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_attempts,
        }
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] classified per the shared taxonomy;
    /// upstream failures are retried up to the configured bound first.
    pub async fn get_by_id(&self, product_id: &str) -> Result<Product, UpstreamError> {
        let uri = format!(
            "{}/products/{}",
            self.base_url,
            urlencoding::encode(product_id)
        );
        with_retry(self.max_attempts, UpstreamError::is_retryable, || {
            get_json(&self.http, UpstreamService::Products, &uri)
        })
        .await
    }

    /// Fetch one page of products matching `query`.
    ///
    /// Blank filters are dropped before forwarding; pagination parameters
    /// go through untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] classified per the shared taxonomy.
    pub async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, UpstreamError> {
        let uri = self.list_uri(query);
        with_retry(self.max_attempts, UpstreamError::is_retryable, || {
            get_json(&self.http, UpstreamService::Products, &uri)
        })
        .await
    }

    fn list_uri(&self, query: &ProductQuery) -> String {
        let mut params = form_urlencoded::Serializer::new(String::new());
        for (name, value) in [
            ("categoryId", query.category_id.as_deref()),
            ("sellerId", query.seller_id.as_deref()),
            ("q", query.q.as_deref()),
        ] {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                params.append_pair(name, value);
            }
        }
        if let Some(page) = query.page {
            params.append_pair("page", &page.to_string());
        }
        if let Some(elements) = query.elements {
            params.append_pair("elements", &elements.to_string());
        }

        let query_string = params.finish();
        if query_string.is_empty() {
            format!("{}/products", self.base_url)
        } else {
            format!("{}/products?{query_string}", self.base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ProductsClient {
        ProductsClient::new(reqwest::Client::new(), base, 0)
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let c = client("http://products.local/");
        assert_eq!(
            c.list_uri(&ProductQuery::default()),
            "http://products.local/products"
        );
    }

    #[test]
    fn test_list_uri_includes_present_filters_only() {
        let c = client("http://products.local");
        let query = ProductQuery {
            category_id: Some("C1".to_string()),
            seller_id: None,
            q: Some("phone case".to_string()),
            page: Some(0),
            elements: Some(5),
        };
        assert_eq!(
            c.list_uri(&query),
            "http://products.local/products?categoryId=C1&q=phone+case&page=0&elements=5"
        );
    }

    #[test]
    fn test_list_uri_drops_blank_filters() {
        let c = client("http://products.local");
        let query = ProductQuery {
            category_id: Some("  ".to_string()),
            seller_id: Some(String::new()),
            q: None,
            page: None,
            elements: None,
        };
        assert_eq!(c.list_uri(&query), "http://products.local/products");
    }
}
