//! Item view composition across the five upstream services.
//!
//! # Failure policy
//!
//! The products upstream is primary: a failed product lookup (or page
//! listing) aborts the request and its error propagates unchanged. The four
//! secondary upstreams (categories, sellers, reviews, Q&A) are fetched
//! concurrently and each degrades independently to an empty or default
//! value, so a degraded item is always preferred over a failed request.
//!
//! Per-field degradation is explicit: every secondary fetch goes through an
//! `*_or_*` combinator that maps any [`UpstreamError`] to the field's typed
//! default, rather than suppressing errors at a distance.

use futures::StreamExt;
use futures::stream;
use mercatus_core::{Page, Price};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::upstream::categories::BreadcrumbNode;
use crate::upstream::products::{Attribute, Product, ProductQuery};
use crate::upstream::qa::Question;
use crate::upstream::reviews::Review;
use crate::upstream::sellers::Seller;
use crate::upstream::{
    CategoriesClient, ProductsClient, QaClient, ReviewsClient, SellersClient, UpstreamError,
};

/// Hard cap on simultaneous item enrichments within one page request.
///
/// Each enrichment fans out to four upstreams, so this bounds the total
/// in-flight calls per page at four times this value.
pub const ENRICH_CONCURRENCY: usize = 8;

/// Essential product view: the product joined with its category breadcrumb.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBasic {
    pub id: String,
    pub title: String,
    pub price: Price,
    pub thumbnail: Option<String>,
    pub pictures: Vec<String>,
    pub condition: Option<String>,
    pub stock: Option<u32>,
    pub has_promotion: Option<bool>,
    pub attributes: Vec<Attribute>,
    /// Root-first category path; empty when the breadcrumb was degraded.
    pub category_breadcrumb: Vec<BreadcrumbNode>,
}

impl ItemBasic {
    fn from_product(product: Product, breadcrumb: Vec<BreadcrumbNode>) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: Price::new(product.price, product.currency),
            thumbnail: product.thumbnail,
            pictures: product.pictures,
            condition: product.condition,
            stock: product.stock,
            has_promotion: product.has_promotion,
            attributes: product.attributes,
            category_breadcrumb: breadcrumb,
        }
    }
}

/// Enriched product view: basic data plus seller, reviews, and Q&A.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEnriched {
    /// Nested `basic` object on the wire; the enriched view composes the
    /// basic one rather than extending it.
    pub basic: ItemBasic,
    pub seller: Seller,
    pub reviews: Vec<Review>,
    pub qa: Vec<Question>,
}

/// Orchestrates the per-request fan-out across the five upstream clients.
///
/// Holds no mutable state; each call is a fresh acyclic graph of upstream
/// requests over immutable values.
#[derive(Clone)]
pub struct ItemService {
    products: ProductsClient,
    categories: CategoriesClient,
    sellers: SellersClient,
    reviews: ReviewsClient,
    qa: QaClient,
}

impl ItemService {
    /// Create a new item service over the five upstream clients.
    #[must_use]
    pub const fn new(
        products: ProductsClient,
        categories: CategoriesClient,
        sellers: SellersClient,
        reviews: ReviewsClient,
        qa: QaClient,
    ) -> Self {
        Self {
            products,
            categories,
            sellers,
            reviews,
            qa,
        }
    }

    /// Basic item view: product plus category breadcrumb.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the primary product lookup unchanged. A
    /// breadcrumb failure is tolerated and yields an empty breadcrumb.
    pub async fn basic(&self, product_id: &str) -> Result<ItemBasic, UpstreamError> {
        let product = self.products.get_by_id(product_id).await?;
        let breadcrumb = self.breadcrumb_or_empty(&product.category_id).await;
        Ok(ItemBasic::from_product(product, breadcrumb))
    }

    /// Enriched item view: product plus breadcrumb, seller, reviews, Q&A.
    ///
    /// The four secondary calls run concurrently and are join-gathered; the
    /// composition waits on the slowest of the four, not on their sum.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the primary product lookup unchanged. No
    /// secondary call is issued in that case.
    pub async fn enriched(&self, product_id: &str) -> Result<ItemEnriched, UpstreamError> {
        let product = self.products.get_by_id(product_id).await?;
        Ok(self.enrich(product).await)
    }

    /// One page of enriched items.
    ///
    /// The filters and pagination are forwarded verbatim to the products
    /// upstream. Every product of the returned page is enriched with at most
    /// [`ENRICH_CONCURRENCY`] enrichments in flight; the output items keep
    /// the input order and count, and the page metadata is copied through
    /// untouched. An empty page short-circuits without issuing any
    /// secondary call.
    ///
    /// # Errors
    ///
    /// Propagates any failure of the product listing unchanged.
    pub async fn enriched_page(
        &self,
        query: &ProductQuery,
    ) -> Result<Page<ItemEnriched>, UpstreamError> {
        let mut page = self.products.list(query).await?;
        let products = std::mem::take(&mut page.items);

        // `buffered` keeps source order regardless of completion order, so
        // the output sequence lines up index-for-index with the input.
        let enriched: Vec<ItemEnriched> = stream::iter(products)
            .map(|product| self.enrich(product))
            .buffered(ENRICH_CONCURRENCY)
            .collect()
            .await;

        tracing::info!(
            page = page.page,
            items = enriched.len(),
            "enriched product page"
        );
        Ok(page.with_items(enriched))
    }

    /// Four-way secondary fan-out for one already-resolved product.
    ///
    /// Infallible by design: each leg degrades on its own and a failure in
    /// one leg never affects the others.
    async fn enrich(&self, product: Product) -> ItemEnriched {
        let (breadcrumb, seller, reviews, qa) = tokio::join!(
            self.breadcrumb_or_empty(&product.category_id),
            self.seller_or_default(&product.seller_id),
            self.reviews_or_empty(&product.id),
            self.qa_or_empty(&product.id),
        );

        ItemEnriched {
            basic: ItemBasic::from_product(product, breadcrumb),
            seller,
            reviews,
            qa,
        }
    }

    async fn breadcrumb_or_empty(&self, category_id: &str) -> Vec<BreadcrumbNode> {
        self.categories
            .breadcrumb(category_id)
            .await
            .unwrap_or_else(|err| {
                warn!(category_id, error = %err, "degrading breadcrumb to empty");
                Vec::new()
            })
    }

    async fn seller_or_default(&self, seller_id: &str) -> Seller {
        self.sellers.get_by_id(seller_id).await.unwrap_or_else(|err| {
            warn!(seller_id, error = %err, "degrading seller to default");
            Seller::default()
        })
    }

    async fn reviews_or_empty(&self, product_id: &str) -> Vec<Review> {
        self.reviews.list(product_id).await.unwrap_or_else(|err| {
            warn!(product_id, error = %err, "degrading reviews to empty");
            Vec::new()
        })
    }

    async fn qa_or_empty(&self, product_id: &str) -> Vec<Question> {
        self.qa.list_by_product(product_id).await.unwrap_or_else(|err| {
            warn!(product_id, error = %err, "degrading questions to empty");
            Vec::new()
        })
    }
}
