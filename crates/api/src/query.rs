//! Pagination helpers for list endpoints.

/// Default page size for the admin quote list.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Upper bound on the admin quote list page size.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Resolve an optional `limit` into `1..=max`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Resolve an optional `offset`, never negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
