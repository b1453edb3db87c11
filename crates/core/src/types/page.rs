//! Generic page envelope mirrored from the catalog upstream.

use serde::{Deserialize, Serialize};

/// One page of results together with its pagination metadata.
///
/// The metadata fields always come verbatim from the service that produced
/// the page; consumers that transform the items must carry the metadata
/// through unchanged (see [`Page::with_items`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Zero-based page index.
    pub page: u32,
    /// Page size (elements per page).
    pub size: u32,
    /// Total number of elements across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether a previous page exists.
    pub has_prev: bool,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Elements of this page, in upstream order.
    ///
    /// The explicit default path keeps the derive from requiring
    /// `T: Default` to deserialize a page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Replace the item sequence while keeping every metadata field intact.
    ///
    /// The pagination metadata describes the source page, so it is never
    /// recomputed from the replacement items.
    #[must_use]
    pub fn with_items<U>(self, items: Vec<U>) -> Page<U> {
        Page {
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_prev: self.has_prev,
            has_next: self.has_next,
            items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Page<u32> {
        Page {
            page: 2,
            size: 5,
            total_items: 123,
            total_pages: 25,
            has_prev: true,
            has_next: true,
            items: vec![1, 2, 3, 4, 5],
        }
    }

    #[test]
    fn test_with_items_preserves_metadata() {
        let page = sample().with_items(vec!["a", "b"]);
        assert_eq!(page.page, 2);
        assert_eq!(page.size, 5);
        assert_eq!(page.total_items, 123);
        assert_eq!(page.total_pages, 25);
        assert!(page.has_prev);
        assert!(page.has_next);
        assert_eq!(page.items, vec!["a", "b"]);
    }

    #[test]
    fn test_serde_round_trip_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["totalItems"], 123);
        assert_eq!(json["hasPrev"], true);
        assert_eq!(json["hasNext"], true);

        let back: Page<u32> = serde_json::from_value(json).unwrap();
        assert_eq!(back.items.len(), 5);
    }

    #[test]
    fn test_page_of_non_default_items_deserializes() {
        #[derive(Deserialize)]
        struct Opaque {
            id: String,
        }

        let page: Page<Opaque> = serde_json::from_str(
            r#"{"page":0,"size":1,"totalItems":1,"totalPages":1,"hasPrev":false,"hasNext":false,"items":[{"id":"X"}]}"#,
        )
        .unwrap();
        assert_eq!(page.items.first().map(|i| i.id.as_str()), Some("X"));
    }

    #[test]
    fn test_items_default_to_empty() {
        let page: Page<u32> = serde_json::from_str(
            r#"{"page":0,"size":0,"totalItems":0,"totalPages":0,"hasPrev":false,"hasNext":false}"#,
        )
        .unwrap();
        assert!(page.items.is_empty());
    }
}
