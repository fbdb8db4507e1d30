//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for admin listings.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page any listing endpoint returns in one response.
pub const MAX_PAGE_SIZE: i64 = 200;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Clamp a requested page size into `1..=max`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
