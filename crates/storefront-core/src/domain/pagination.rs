//! Page/limit cursor over a server-side collection.

use serde::{Deserialize, Serialize};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Query parameters for a single page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// The (page, limit, total) triple describing the loaded slice.
///
/// `page` is owned by the client; `total` (and `limit`, when echoed) come from the server.
/// `limit` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    page: u32,
    limit: u32,
    total: u64,
}

impl Cursor {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// `ceil(total / limit)`; zero for an empty collection.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    pub fn has_next(&self) -> bool {
        self.contains(self.page.saturating_add(1))
    }

    pub fn has_previous(&self) -> bool {
        self.contains(self.page.saturating_sub(1))
    }

    pub fn request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }

    /// 1-based position of the `index`th row of the current page within the whole collection.
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit) + index as u64 + 1
    }

    /// Move to `page`. Callers validate with [`Cursor::contains`] first.
    pub(crate) fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Change the page size and go back to the first page.
    pub(crate) fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 1;
    }

    /// Adopt the totals reported with a fetched page.
    pub(crate) fn apply_server_totals(&mut self, total: u64, limit: Option<u32>) {
        self.total = total;
        if let Some(limit) = limit.filter(|l| *l > 0) {
            self.limit = limit;
        }
    }

    pub(crate) fn decrement_total(&mut self) {
        self.total = self.total.saturating_sub(1);
    }

    /// Step back to the last page when the current one no longer exists.
    /// Returns whether the page moved.
    pub(crate) fn clamp_page(&mut self) -> bool {
        let last = self.total_pages().max(1);
        if self.page > last {
            self.page = last;
            return true;
        }
        false
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}
