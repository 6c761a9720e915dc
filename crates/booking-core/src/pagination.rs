//! Offset pagination for list queries.

use serde::{Deserialize, Serialize};

/// Row window handed to the store: skip `skip` rows, then take up to `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of rows to return.
    pub limit: i64,
    /// Number of rows to skip.
    pub skip: i64,
}

impl Pagination {
    /// Default limit when the request omits one.
    pub const DEFAULT_LIMIT: i64 = 10;
    /// Default page when the request omits one.
    pub const DEFAULT_PAGE: i64 = 1;

    /// Computes the row window for a `limit`/`page` pair.
    ///
    /// A missing or zero value on either side falls back to the first page of
    /// ten rows. Otherwise `skip = limit * (page - 1)`, clamped at zero, and the
    /// returned limit is `skip + limit`, so later pages return wider windows.
    #[must_use]
    pub fn details(limit: Option<i64>, page: Option<i64>) -> Self {
        match (limit.filter(|l| *l != 0), page.filter(|p| *p != 0)) {
            (Some(limit), Some(page)) => {
                let skip = limit.saturating_mul(page.saturating_sub(1)).max(0);
                Self {
                    limit: skip.saturating_add(limit),
                    skip,
                }
            }
            _ => Self::default(),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            skip: 0,
        }
    }
}
