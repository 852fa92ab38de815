//! Page-based pagination.
//!
//! List endpoints accept `?page=&limit=` and answer with a `pagination` object:
//!
//! ```json
//! {
//!   "currentPage": 2,
//!   "totalPages": 5,
//!   "totalItems": 48,
//!   "itemsPerPage": 10,
//!   "hasNextPage": true,
//!   "hasPreviousPage": true
//! }
//! ```
//!
//! Each endpoint picks its own default page size via [`PageParams::limit_or`].

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_optional_i64;

/// Upper bound for any page size.
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PageParams {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the requested page size, or `default` when absent, clamped to [1, 100].
    #[must_use]
    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self, limit: i64) -> i64 {
        (self.page() - 1).saturating_mul(limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            current_page: page,
            total_pages,
            total_items: total,
            items_per_page: limit,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit_or(10), 10);
        assert_eq!(params.offset(10), 0);
    }

    #[test]
    fn test_limit_clamped() {
        let params = PageParams {
            page: None,
            limit: Some(500),
        };
        assert_eq!(params.limit_or(10), 100);

        let params = PageParams {
            page: None,
            limit: Some(0),
        };
        assert_eq!(params.limit_or(10), 1);
    }

    #[test]
    fn test_negative_page_becomes_first() {
        let params = PageParams {
            page: Some(-3),
            limit: Some(20),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(20), 0);
    }

    #[test]
    fn test_offset_from_page() {
        let params = PageParams {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(params.offset(params.limit_or(10)), 40);
    }

    #[test]
    fn test_meta_rounds_pages_up() {
        let meta = PageMeta::new(1, 10, 21);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(!meta.has_previous_page);
    }

    #[test]
    fn test_meta_last_page() {
        let meta = PageMeta::new(3, 10, 21);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_meta_empty() {
        let meta = PageMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let json = serde_json::to_value(PageMeta::new(2, 5, 12)).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["itemsPerPage"], 5);
        assert_eq!(json["hasPreviousPage"], true);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        let params = PageParams {
            page: Some(i64::MAX),
            limit: Some(10),
        };
        assert_eq!(params.offset(params.limit_or(10)), i64::MAX);
    }
}
