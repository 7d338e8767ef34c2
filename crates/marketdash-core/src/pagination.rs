//! Page-based pagination for list endpoints.
//!
//! Query parameters:
//! - `page`: 1-indexed page number (default 1, values below 1 are treated as 1)
//! - `limit`: items per page (default 10, clamped to 1..=100)
//!
//! The row offset is `(page - 1) * limit`. A page past the end is simply an
//! empty page, never an error.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Query strings such as `?page=` arrive as empty strings, which are treated
/// as absent.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number, starting at 1
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>, example = 1)]
    pub page: Option<i64>,
    /// Items per page (1-100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>, example = 10)]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        page_offset(self.page(), self.limit())
    }
}

/// Row offset of a 1-indexed page. Pages below 1 are treated as the first page.
pub fn page_offset(page: i64, limit: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(limit.max(0))
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        Self {
            page: params.page(),
            limit,
            total,
            has_more: params.offset().saturating_add(limit) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_second_page_offset() {
        let params = PaginationParams::new(2, 10);
        assert_eq!(params.offset(), 10);
    }

    #[test]
    fn test_page_below_one_is_first_page() {
        assert_eq!(PaginationParams::new(0, 10).offset(), 0);
        assert_eq!(PaginationParams::new(-3, 10).page(), 1);
    }

    #[test]
    fn test_limit_boundary_cases() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
            (None, 10),
        ];

        for (input, expected) in test_cases {
            let params = PaginationParams {
                page: Some(1),
                limit: input,
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_page_offset_saturates() {
        assert_eq!(page_offset(i64::MAX, 100), i64::MAX);
    }

    #[test]
    fn test_deserialize_with_values() {
        let json = r#"{"page":"3","limit":"25"}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 3);
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let json = r#"{"page":"","limit":""}"#;
        let params: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let json = r#"{"page":"two"}"#;
        assert!(serde_json::from_str::<PaginationParams>(json).is_err());
    }

    #[test]
    fn test_meta_has_more() {
        let meta = PaginationMeta::new(&PaginationParams::new(1, 10), 25);
        assert!(meta.has_more);
        assert_eq!(meta.total, 25);

        let meta = PaginationMeta::new(&PaginationParams::new(3, 10), 25);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_meta_at_last_representable_page() {
        let params = PaginationParams::new(i64::MAX, 10);
        let meta = PaginationMeta::new(&params, 25);
        assert_eq!(meta.page, i64::MAX);
        assert!(!meta.has_more);

        assert!(!PaginationMeta::new(&params, 0).has_more);
    }

    #[test]
    fn test_meta_serialize() {
        let meta = PaginationMeta::new(&PaginationParams::new(2, 20), 100);
        let serialized = serde_json::to_string(&meta).unwrap();
        assert!(serialized.contains(r#""page":2"#));
        assert!(serialized.contains(r#""limit":20"#));
        assert!(serialized.contains(r#""total":100"#));
        assert!(serialized.contains(r#""has_more":true"#));
    }
}
