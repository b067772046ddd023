//! Pagination over the sorted, filtered collection

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Size of the filtered collection, before pagination
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    /// `ceil(total / limit)`; zero when nothing matched
    pub total_pages: usize,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(total: usize, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as usize)
        };
        Self {
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Whether a later page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        (self.page as usize) < self.total_pages
    }

    /// Whether an earlier non-empty page exists
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }
}

/// Index range of a page within a collection of `len` items
///
/// The half-open range `[(page - 1) * limit, page * limit)` clipped to `len`.
/// Pages past the end yield an empty range.
#[must_use]
pub fn page_bounds(len: usize, page: u32, limit: u32) -> Range<usize> {
    let limit = limit as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit).min(len);
    let end = (page as usize).saturating_mul(limit).min(len);
    start..end.max(start)
}

/// Slice out one page
#[must_use]
pub fn paginate<T>(items: &[T], page: u32, limit: u32) -> &[T] {
    &items[page_bounds(items.len(), page, limit)]
}
