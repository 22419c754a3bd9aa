// src/models/mod.rs

pub mod actor;
pub mod award;
pub mod comment;
pub mod country;
pub mod genre;
pub mod movie;
pub mod platform;
pub mod user;

use serde::Deserialize;

/// Common `page` / `limit` query parameters for listing endpoints.
/// `page` >= 1 (default 1), `limit` >= 1 (default 10).
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// Whether the caller passed an explicitly non-positive page or limit.
    pub fn is_valid(&self) -> bool {
        self.page.map(|p| p > 0).unwrap_or(true) && self.limit.map(|l| l > 0).unwrap_or(true)
    }
}

/// `totalPages = ceil(totalCount / limit)`.
pub fn total_pages(total_count: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total_count + limit - 1) / limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_page_one_limit_ten() {
        let q = ListQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let q = ListQuery {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(q.offset(), 50);
    }

    #[test]
    fn non_positive_values_are_clamped() {
        let q = ListQuery {
            page: Some(0),
            limit: Some(-5),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 1);
        assert!(!q.is_valid());
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
    }
}
