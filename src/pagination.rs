//! Page arithmetic for the task table.

use serde::Serialize;

/// Position within the paginated task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u64,
}

impl PageInfo {
    /// `total` is the number of tasks across all pages.
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page,
            total_pages: total_pages(total, page_size),
        }
    }

    /// Label like `Page 1 of 37`.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// Ceiling of `total / page_size`, never below one page.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    let page_size = u64::from(page_size.max(1));
    total.div_ceil(page_size).max(1)
}

/// A page shorter than the page size is the last one.
pub fn has_next_page(last_page_len: usize, page_size: u32) -> bool {
    last_page_len >= page_size as usize
}
