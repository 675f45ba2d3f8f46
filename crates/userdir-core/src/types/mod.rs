//! Core type definitions used across the userdir workspace.

pub mod pagination;
pub mod query;
pub mod response;
pub mod sorting;

pub use pagination::ListMeta;
pub use query::{ListParams, ListQueryError, RawListParams};
pub use sorting::{FieldAllowList, SortDirection, SortField};
