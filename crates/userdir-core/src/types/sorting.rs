//! Sorting vocabulary for list endpoints.

use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A validated sort specification.
///
/// `column` is always a token taken from a [`FieldAllowList`], never raw
/// request input, so it is safe to interpolate into generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortField {
    /// Column token resolved through the endpoint's allow-list.
    pub column: &'static str,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortField {
    /// Create an ascending sort on the given column token.
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    /// Create a descending sort on the given column token.
    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }
}

/// Closed mapping from public field names to safe column tokens.
///
/// Each listing endpoint supplies its own allow-list. The same instance is
/// consulted when sort parameters are validated and when the query text is
/// generated, so the two can never disagree about which identifiers are
/// permitted to appear in SQL.
#[derive(Debug, Clone, Copy)]
pub struct FieldAllowList {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldAllowList {
    /// Build an allow-list from `(public name, column token)` pairs.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve a public field name to its column token.
    pub fn column(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
    }

    /// Check whether a public field name is permitted.
    pub fn contains(&self, field: &str) -> bool {
        self.column(field).is_some()
    }

    /// Public field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: FieldAllowList = FieldAllowList::new(&[("id", "id"), ("email", "email")]);

    #[test]
    fn test_direction_sql() {
        assert_eq!(SortDirection::Asc.as_sql(), "ASC");
        assert_eq!(SortDirection::Desc.as_sql(), "DESC");
    }

    #[test]
    fn test_allow_list_lookup() {
        assert_eq!(FIELDS.column("id"), Some("id"));
        assert_eq!(FIELDS.column("age"), None);
        assert!(FIELDS.contains("email"));
        assert!(!FIELDS.contains("password_hash"));
    }
}
