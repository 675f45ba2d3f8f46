//! List query construction.
//!
//! [`UserListQuery`] compiles validated [`ListParams`] into the count and
//! fetch statements for the user listing. Both statements are rendered from
//! one stored predicate, so the total and the page rows are always computed
//! against the same logical filter. Only allow-listed column tokens and the
//! `ASC`/`DESC` keywords are interpolated into the text; every value is a
//! bind argument.

use userdir_core::types::ListParams;

/// Columns projected by the fetch query, in `User` field order.
const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, role, phone, created_at, updated_at";

/// Search predicate matching case-insensitively across names and email.
/// A single positional placeholder carries the pattern for all three
/// comparisons.
const SEARCH_PREDICATE: &str =
    " WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1";

/// Deterministic compilation of [`ListParams`] into SQL artifacts.
#[derive(Debug, Clone)]
pub struct UserListQuery {
    predicate: &'static str,
    pattern: Option<String>,
    order_by: String,
    limit: i64,
    offset: i64,
}

impl UserListQuery {
    /// Compile the query artifacts for the given parameters.
    pub fn new(params: &ListParams) -> Self {
        let (predicate, pattern) = if params.search.is_empty() {
            ("", None)
        } else {
            (SEARCH_PREDICATE, Some(format!("%{}%", params.search)))
        };

        // params.sort is never empty after parsing; the fallback keeps the
        // ordering total even for hand-built parameters.
        let order_by = if params.sort.is_empty() {
            "id ASC".to_string()
        } else {
            params
                .sort
                .iter()
                .map(|sort| format!("{} {}", sort.column, sort.direction.as_sql()))
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            predicate,
            pattern,
            order_by,
            limit: params.limit,
            offset: params.offset,
        }
    }

    /// The bound search pattern, when a filter is active.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// The count statement: base table plus the shared predicate.
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM users{}", self.predicate)
    }

    /// The fetch statement: projection, the shared predicate, ordering, and
    /// pagination placeholders numbered after the predicate's bindings.
    pub fn fetch_sql(&self) -> String {
        let taken = if self.pattern.is_some() { 1 } else { 0 };
        format!(
            "SELECT {USER_COLUMNS} FROM users{} ORDER BY {} LIMIT ${} OFFSET ${}",
            self.predicate,
            self.order_by,
            taken + 1,
            taken + 2
        )
    }

    /// The bound LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// The bound OFFSET value.
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userdir_core::types::{SortDirection, SortField};

    fn params() -> ListParams {
        ListParams::default()
    }

    #[test]
    fn test_match_all_has_no_predicate() {
        let query = UserListQuery::new(&params());
        assert_eq!(query.count_sql(), "SELECT COUNT(*) FROM users");
        assert_eq!(
            query.fetch_sql(),
            format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC LIMIT $1 OFFSET $2")
        );
        assert_eq!(query.pattern(), None);
    }

    #[test]
    fn test_search_predicate_shared_by_count_and_fetch() {
        let query = UserListQuery::new(&ListParams {
            search: "ryan".to_string(),
            ..params()
        });

        let count = query.count_sql();
        let fetch = query.fetch_sql();
        assert!(count.ends_with(SEARCH_PREDICATE));
        assert!(fetch.contains(SEARCH_PREDICATE));
        // one placeholder reused across the three comparisons
        assert_eq!(count.matches("$1").count(), 3);
        assert_eq!(query.pattern(), Some("%ryan%"));
    }

    #[test]
    fn test_pagination_placeholders_shift_after_pattern() {
        let unfiltered = UserListQuery::new(&params());
        assert!(unfiltered.fetch_sql().ends_with("LIMIT $1 OFFSET $2"));

        let filtered = UserListQuery::new(&ListParams {
            search: "smith".to_string(),
            ..params()
        });
        assert!(filtered.fetch_sql().ends_with("LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_order_by_renders_validated_sort() {
        let query = UserListQuery::new(&ListParams {
            sort: vec![
                SortField::desc("last_name"),
                SortField {
                    column: "id",
                    direction: SortDirection::Asc,
                },
            ],
            ..params()
        });
        assert!(query
            .fetch_sql()
            .contains("ORDER BY last_name DESC, id ASC"));
    }

    #[test]
    fn test_count_never_orders_or_paginates() {
        let query = UserListQuery::new(&ListParams {
            search: "smith".to_string(),
            ..params()
        });
        let count = query.count_sql();
        assert!(!count.contains("ORDER BY"));
        assert!(!count.contains("LIMIT"));
    }

    #[test]
    fn test_construction_is_deterministic() {
        let input = ListParams {
            search: "a".to_string(),
            ..params()
        };
        let first = UserListQuery::new(&input);
        let second = UserListQuery::new(&input);
        assert_eq!(first.count_sql(), second.count_sql());
        assert_eq!(first.fetch_sql(), second.fetch_sql());
    }
}
