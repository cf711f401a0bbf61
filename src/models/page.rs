//! A window over an ordered sequence

use serde::Serialize;

/// One page of an ordered sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page (never more than `page_size`)
    pub items: Vec<T>,
    /// 1-based page number, always within `1..=total_pages`
    pub page_number: usize,
    /// Total number of pages, at least 1
    pub total_pages: usize,
    /// Requested page size
    pub page_size: usize,
    /// Length of the whole sequence
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Check if this page holds no items (only possible for an empty sequence)
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
