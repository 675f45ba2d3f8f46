//! Pagination metadata for list endpoints.

use serde::{Deserialize, Serialize};

use super::query::ListParams;

/// Pagination metadata returned alongside every listing.
///
/// Derived, never stored: recomputed on each call from the request's
/// [`ListParams`] and the total observed by the count query. `total` is the
/// number of rows matching the filter predicate ignoring pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    /// 1-based page number of this listing.
    pub page: i64,
    /// Page size the listing was bounded by.
    pub limit: i64,
    /// Row offset the listing started at.
    pub offset: i64,
    /// Total matching rows across all pages.
    pub total: i64,
}

impl ListMeta {
    /// Compute metadata from validated parameters and an observed total.
    pub fn new(params: &ListParams, total: i64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            offset: params.offset,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: i64, limit: i64) -> ListParams {
        ListParams {
            page,
            limit,
            offset: (page - 1) * limit,
            ..ListParams::default()
        }
    }

    #[test]
    fn test_total_is_independent_of_page() {
        let first = ListMeta::new(&params(1, 5), 7);
        assert_eq!(first.total, 7);
        assert_eq!(first.offset, 0);

        let second = ListMeta::new(&params(2, 5), 7);
        assert_eq!(second.total, 7);
        assert_eq!(second.offset, 5);
        assert_eq!(second.limit, 5);
    }

    #[test]
    fn test_echoes_request_pagination() {
        let meta = ListMeta::new(&params(3, 20), 0);
        assert_eq!(meta.page, 3);
        assert_eq!(meta.limit, 20);
        assert_eq!(meta.offset, 40);
        assert_eq!(meta.total, 0);
    }
}
