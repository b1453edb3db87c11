//! HTTP clients for the five read-only catalog upstream services.
//!
//! # Architecture
//!
//! Each upstream (products, categories, sellers, reviews, Q&A) gets one thin
//! client issuing a single GET per attempt against a configured base URL.
//! Every response is classified into a typed result or an [`UpstreamError`]:
//!
//! - 2xx with a decodable body → the operation's typed result
//! - 404 → [`ErrorKind::NotFound`]
//! - 400 / 422 → [`ErrorKind::InvalidRequest`]
//! - anything else (5xx, malformed 2xx body, transport failure) →
//!   [`ErrorKind::Upstream`]
//!
//! Only `Upstream` failures are retried, inside the client, via
//! [`retry::with_retry`]. Callers never observe individual attempts.
//!
//! Non-2xx headers and raw bodies are retained on the error for diagnostics
//! and are never parsed as structured data.

pub mod categories;
pub mod products;
pub mod qa;
pub mod retry;
pub mod reviews;
pub mod sellers;

pub use categories::CategoriesClient;
pub use products::ProductsClient;
pub use qa::QaClient;
pub use reviews::ReviewsClient;
pub use sellers::SellersClient;

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;

/// The five catalog services this gateway consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamService {
    Products,
    Categories,
    Sellers,
    Reviews,
    Qa,
}

impl UpstreamService {
    /// Stable lowercase name used in logs and error codes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Sellers => "sellers",
            Self::Reviews => "reviews",
            Self::Qa => "qa",
        }
    }
}

impl fmt::Display for UpstreamService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of a failed upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested resource does not exist (HTTP 404). Terminal.
    NotFound,
    /// The upstream rejected the request (HTTP 400 or 422). Terminal.
    InvalidRequest,
    /// The upstream failed (5xx, undecodable 2xx body, or transport error).
    ///
    /// `status` is `None` for transport-level failures that never produced
    /// an HTTP response.
    Upstream { status: Option<u16> },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::InvalidRequest => f.write_str("invalid request"),
            Self::Upstream {
                status: Some(status),
            } => write!(f, "upstream failure (status {status})"),
            Self::Upstream { status: None } => f.write_str("upstream failure (transport error)"),
        }
    }
}

/// A failed call to one of the upstream services.
///
/// Carries the originating URI plus the raw response headers and body, so
/// callers can surface upstream diagnostics without reinterpreting them.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{service} call to {uri} failed: {kind}")]
pub struct UpstreamError {
    pub service: UpstreamService,
    pub kind: ErrorKind,
    pub uri: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl UpstreamError {
    /// Whether the retry policy may re-issue the request.
    ///
    /// `NotFound` and `InvalidRequest` are terminal and must never be
    /// retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Upstream { .. })
    }

    fn transport(service: UpstreamService, uri: &str, source: &reqwest::Error) -> Self {
        tracing::error!(service = service.name(), uri, error = %source, "upstream transport failure");
        Self {
            service,
            kind: ErrorKind::Upstream { status: None },
            uri: uri.to_owned(),
            headers: HashMap::new(),
            body: String::new(),
        }
    }
}

/// Issue one GET attempt and classify the outcome.
///
/// The body is read as text first so that undecodable payloads are preserved
/// verbatim on the resulting error.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    service: UpstreamService,
    uri: &str,
) -> Result<T, UpstreamError> {
    let response = match http
        .get(uri)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => return Err(UpstreamError::transport(service, uri, &err)),
    };

    let status = response.status();
    let headers = flatten_headers(response.headers());
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => return Err(UpstreamError::transport(service, uri, &err)),
    };

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|err| {
            tracing::error!(
                service = service.name(),
                uri,
                error = %err,
                "failed to decode upstream body"
            );
            UpstreamError {
                service,
                kind: ErrorKind::Upstream {
                    status: Some(status.as_u16()),
                },
                uri: uri.to_owned(),
                headers,
                body,
            }
        });
    }

    let kind = match status.as_u16() {
        404 => ErrorKind::NotFound,
        400 | 422 => ErrorKind::InvalidRequest,
        code => ErrorKind::Upstream { status: Some(code) },
    };

    Err(UpstreamError {
        service,
        kind,
        uri: uri.to_owned(),
        headers,
        body,
    })
}

fn flatten_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                value.to_str().unwrap_or_default().to_owned(),
            )
        })
        .collect()
}
