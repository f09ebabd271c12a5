//! Pagination for list endpoints.
//!
//! Offset-based (`limit` + `offset`) or page-based (`limit` + `page`). When
//! `page` is present it wins over `offset`. `limit` is clamped to [1, 100]
//! and defaults to 20.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::serde::deserialize_optional_i64;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 20)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number, 1-indexed
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page.max(1) - 1) * self.limit(),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }

    /// Builds the response metadata for a result set of `total` items.
    pub fn meta(&self, total: i64) -> PaginationMeta {
        let limit = self.limit();
        let offset = self.offset();
        PaginationMeta {
            total,
            limit,
            offset: self.page.is_none().then_some(offset),
            page: self.page(),
            has_more: offset + limit < total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn test_defaults() {
        let p = PaginationParams::default();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn test_limit_boundary_cases() {
        for (input, expected) in [
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
        ] {
            assert_eq!(params(input, None, None).limit(), expected);
        }
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let p = params(Some(10), Some(5), Some(3));
        assert_eq!(p.offset(), 20);
        assert_eq!(params(Some(10), None, Some(0)).offset(), 0);
    }

    #[test]
    fn test_negative_offset_clamped() {
        assert_eq!(params(Some(10), Some(-5), None).offset(), 0);
    }

    #[test]
    fn test_meta() {
        let meta = params(Some(10), Some(0), None).meta(25);
        assert_eq!(meta.offset, Some(0));
        assert_eq!(meta.page, None);
        assert!(meta.has_more);

        let meta = params(Some(10), None, Some(3)).meta(25);
        assert_eq!(meta.offset, None);
        assert_eq!(meta.page, Some(3));
        assert!(!meta.has_more);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let p: PaginationParams = serde_json::from_str(r#"{"limit":"","offset":""}"#).unwrap();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);

        let p: PaginationParams = serde_json::from_str(r#"{"limit":"30","page":"2"}"#).unwrap();
        assert_eq!(p.offset(), 30);
    }
}
