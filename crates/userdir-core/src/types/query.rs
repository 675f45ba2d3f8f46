//! List-query parameter parsing and validation.
//!
//! [`RawListParams`] is the untyped view of the query string as received
//! from the HTTP layer. [`RawListParams::parse`] turns it into a validated
//! [`ListParams`] or a [`ListQueryError`]; nothing that fails here ever
//! reaches the query builder or the store.

use serde::Deserialize;
use thiserror::Error;

use super::sorting::{FieldAllowList, SortDirection, SortField};

/// Page size applied when the request does not specify one.
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page size a request may ask for.
pub const MAX_LIMIT: i64 = 100;

/// Column token for the default sort applied when `sort` is absent.
const DEFAULT_SORT_COLUMN: &str = "id";

/// Error produced while turning raw query parameters into [`ListParams`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListQueryError {
    /// A parameter value failed to parse as an integer.
    #[error("invalid {name} parameter: '{value}' is not an integer")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected raw value.
        value: String,
    },
    /// The sort specification was malformed or named a forbidden field.
    #[error("invalid sort specification: {reason}")]
    InvalidSort {
        /// What was wrong with the specification.
        reason: String,
    },
    /// A parsed value violated a cross-field invariant.
    #[error("invalid value for {field}")]
    Validation {
        /// Name of the first violated field.
        field: &'static str,
    },
}

impl From<ListQueryError> for crate::error::AppError {
    fn from(err: ListQueryError) -> Self {
        crate::error::AppError::validation(err.to_string())
    }
}

/// Raw list-query parameters as they arrive on the query string.
///
/// Every field is an optional string so that malformed values surface as
/// structured [`ListQueryError`]s naming the field, rather than as opaque
/// deserialization rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListParams {
    /// Free-text search filter.
    pub search: Option<String>,
    /// Requested page size.
    pub limit: Option<String>,
    /// Requested row offset. Ignored when `page` is present.
    pub offset: Option<String>,
    /// Requested page number (1-based). Takes precedence over `offset`.
    pub page: Option<String>,
    /// Sort specification of the form `field:direction`.
    pub sort: Option<String>,
}

/// Validated, typed representation of list-query intent.
///
/// Constructed once per request via [`RawListParams::parse`], immutable
/// afterwards. Invariants: `limit` in `[1, MAX_LIMIT]`, `offset >= 0`,
/// `page >= 1`, `sort` non-empty with every column drawn from the
/// endpoint's allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Free-text filter; empty means match-all.
    pub search: String,
    /// Page size.
    pub limit: i64,
    /// Row offset. Derived from `page` when one was supplied.
    pub offset: i64,
    /// 1-based page number.
    pub page: i64,
    /// Validated sort fields in priority order.
    pub sort: Vec<SortField>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            limit: DEFAULT_LIMIT,
            offset: 0,
            page: 1,
            sort: vec![SortField::asc(DEFAULT_SORT_COLUMN)],
        }
    }
}

impl RawListParams {
    /// Parse and validate the raw parameters against an endpoint allow-list.
    ///
    /// `limit` is resolved before `page` so the `page -> offset` derivation
    /// always sees the final page size. When `page` is present it is
    /// authoritative and a simultaneously supplied `offset` is ignored.
    pub fn parse(&self, allowed: &FieldAllowList) -> Result<ListParams, ListQueryError> {
        let search = self.search.clone().unwrap_or_default();

        let limit = match &self.limit {
            Some(raw) => parse_int("limit", raw)?,
            None => DEFAULT_LIMIT,
        };

        let (page, offset) = match &self.page {
            Some(raw) => {
                let page = parse_int("page", raw)?;
                (page, page.saturating_sub(1).saturating_mul(limit))
            }
            None => match &self.offset {
                Some(raw) => (1, parse_int("offset", raw)?),
                None => (1, 0),
            },
        };

        let sort = match &self.sort {
            Some(raw) => vec![parse_sort(raw, allowed)?],
            None => vec![SortField::asc(DEFAULT_SORT_COLUMN)],
        };

        let params = ListParams {
            search,
            limit,
            offset,
            page,
            sort,
        };
        params.validate()?;
        Ok(params)
    }
}

impl ListParams {
    /// Check the cross-field invariants, naming the first violated field.
    ///
    /// Evaluation order is fixed: `limit`, `offset`, `page`.
    fn validate(&self) -> Result<(), ListQueryError> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(ListQueryError::Validation { field: "limit" });
        }
        if self.offset < 0 {
            return Err(ListQueryError::Validation { field: "offset" });
        }
        if self.page < 1 {
            return Err(ListQueryError::Validation { field: "page" });
        }
        Ok(())
    }
}

fn parse_int(name: &'static str, raw: &str) -> Result<i64, ListQueryError> {
    raw.parse::<i64>().map_err(|_| ListQueryError::InvalidParameter {
        name,
        value: raw.to_string(),
    })
}

fn parse_sort(raw: &str, allowed: &FieldAllowList) -> Result<SortField, ListQueryError> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 2 {
        return Err(ListQueryError::InvalidSort {
            reason: format!("expected field:direction, got '{raw}'"),
        });
    }

    let column = allowed
        .column(parts[0])
        .ok_or_else(|| ListQueryError::InvalidSort {
            reason: format!("unknown sort field '{}'", parts[0]),
        })?;

    let direction = match parts[1] {
        "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        other => {
            return Err(ListQueryError::InvalidSort {
                reason: format!("unknown sort direction '{other}'"),
            });
        }
    };

    Ok(SortField { column, direction })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: FieldAllowList = FieldAllowList::new(&[
        ("id", "id"),
        ("first_name", "first_name"),
        ("last_name", "last_name"),
        ("email", "email"),
    ]);

    fn raw(pairs: &[(&str, &str)]) -> RawListParams {
        let mut params = RawListParams::default();
        for (name, value) in pairs {
            let value = Some(value.to_string());
            match *name {
                "search" => params.search = value,
                "limit" => params.limit = value,
                "offset" => params.offset = value,
                "page" => params.page = value,
                "sort" => params.sort = value,
                other => panic!("unknown parameter {other}"),
            }
        }
        params
    }

    #[test]
    fn test_defaults() {
        let params = raw(&[]).parse(&FIELDS).unwrap();
        assert_eq!(params.search, "");
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert_eq!(params.offset, 0);
        assert_eq!(params.page, 1);
        assert_eq!(params.sort, vec![SortField::asc("id")]);
    }

    #[test]
    fn test_search_passed_through_verbatim() {
        let params = raw(&[("search", "Ryan ")]).parse(&FIELDS).unwrap();
        assert_eq!(params.search, "Ryan ");
    }

    #[test]
    fn test_page_wins_over_offset() {
        let params = raw(&[("page", "3"), ("limit", "20"), ("offset", "999")])
            .parse(&FIELDS)
            .unwrap();
        assert_eq!(params.offset, 40);
        assert_eq!(params.page, 3);
    }

    #[test]
    fn test_page_derivation_uses_resolved_limit() {
        // limit resolves before page regardless of parameter order
        let params = raw(&[("page", "2")]).parse(&FIELDS).unwrap();
        assert_eq!(params.offset, DEFAULT_LIMIT);

        let params = raw(&[("page", "2"), ("limit", "50")]).parse(&FIELDS).unwrap();
        assert_eq!(params.offset, 50);
    }

    #[test]
    fn test_offset_read_when_page_absent() {
        let params = raw(&[("offset", "30")]).parse(&FIELDS).unwrap();
        assert_eq!(params.offset, 30);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_invalid_limit_names_field() {
        let err = raw(&[("limit", "abc")]).parse(&FIELDS).unwrap_err();
        assert_eq!(
            err,
            ListQueryError::InvalidParameter {
                name: "limit",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_page_and_offset_name_field() {
        let err = raw(&[("page", "x")]).parse(&FIELDS).unwrap_err();
        assert!(matches!(
            err,
            ListQueryError::InvalidParameter { name: "page", .. }
        ));

        let err = raw(&[("offset", "1.5")]).parse(&FIELDS).unwrap_err();
        assert!(matches!(
            err,
            ListQueryError::InvalidParameter { name: "offset", .. }
        ));
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(
            raw(&[("limit", "0")]).parse(&FIELDS).unwrap_err(),
            ListQueryError::Validation { field: "limit" }
        );
        assert_eq!(
            raw(&[("limit", "101")]).parse(&FIELDS).unwrap_err(),
            ListQueryError::Validation { field: "limit" }
        );
        assert!(raw(&[("limit", "1")]).parse(&FIELDS).is_ok());
        assert!(raw(&[("limit", "100")]).parse(&FIELDS).is_ok());
    }

    #[test]
    fn test_negative_offset_rejected() {
        assert_eq!(
            raw(&[("offset", "-1")]).parse(&FIELDS).unwrap_err(),
            ListQueryError::Validation { field: "offset" }
        );
    }

    #[test]
    fn test_zero_page_rejected() {
        // page=0 derives a negative offset, which trips the offset bound first
        assert_eq!(
            raw(&[("page", "0")]).parse(&FIELDS).unwrap_err(),
            ListQueryError::Validation { field: "offset" }
        );
    }

    #[test]
    fn test_sort_parses_field_and_direction() {
        let params = raw(&[("sort", "email:desc")]).parse(&FIELDS).unwrap();
        assert_eq!(params.sort, vec![SortField::desc("email")]);
    }

    #[test]
    fn test_sort_unknown_field_rejected() {
        let err = raw(&[("sort", "age:asc")]).parse(&FIELDS).unwrap_err();
        assert!(matches!(err, ListQueryError::InvalidSort { .. }));
    }

    #[test]
    fn test_sort_malformed_rejected() {
        for bad in ["id", "id:asc:extra", "id:up", ":asc", "id:"] {
            let err = raw(&[("sort", bad)]).parse(&FIELDS).unwrap_err();
            assert!(matches!(err, ListQueryError::InvalidSort { .. }), "{bad}");
        }
    }

    #[test]
    fn test_parse_is_idempotent_over_rendered_meta() {
        // Rendering page/limit back into a query and re-parsing must
        // reconstruct an equivalent filter.
        let first = raw(&[("page", "4"), ("limit", "25"), ("search", "smith")])
            .parse(&FIELDS)
            .unwrap();

        let second = raw(&[
            ("page", &first.page.to_string()),
            ("limit", &first.limit.to_string()),
            ("search", &first.search),
        ])
        .parse(&FIELDS)
        .unwrap();

        assert_eq!(first, second);
    }
}
