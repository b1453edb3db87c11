//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::service::ItemService;
use crate::upstream::{
    CategoriesClient, ProductsClient, QaClient, ReviewsClient, SellersClient,
};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the item composition service. The five upstream
/// clients share one `reqwest::Client` (and thus one connection pool and
/// per-request timeout).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SearchConfig,
    items: ItemService,
}

impl AppState {
    /// Create a new application state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared HTTP client fails to build.
    pub fn new(config: SearchConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http.timeout)
            .build()?;

        let max_attempts = config.retry.max_attempts;
        let items = ItemService::new(
            ProductsClient::new(http.clone(), &config.domains.products_base_url, max_attempts),
            CategoriesClient::new(
                http.clone(),
                &config.domains.categories_base_url,
                max_attempts,
            ),
            SellersClient::new(http.clone(), &config.domains.sellers_base_url, max_attempts),
            ReviewsClient::new(http.clone(), &config.domains.reviews_base_url, max_attempts),
            QaClient::new(http, &config.domains.qa_base_url, max_attempts),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { config, items }),
        })
    }

    /// Get a reference to the gateway configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    /// Get a reference to the item composition service.
    #[must_use]
    pub fn items(&self) -> &ItemService {
        &self.inner.items
    }
}
