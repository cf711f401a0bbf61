//! Paginator
//!
//! Stateless: every call recomputes the page count from the slice it is
//! given and clamps the requested page into range, so navigating one page too
//! far (or paging a sequence a filter just shortened) still shows something.

use crate::error::{StatementError, StatementResult};
use crate::models::Page;

/// Number of pages for `total_items`, never less than 1
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size).max(1)
}

/// Slice `records` into the page `page_number` of size `page_size`
///
/// Fails with `InvalidPageSize` when `page_size <= 0`. `page_number` below 1
/// becomes 1 and above the last page becomes the last page.
pub fn paginate<T: Clone>(
    records: &[T],
    page_size: i64,
    page_number: i64,
) -> StatementResult<Page<T>> {
    if page_size <= 0 {
        return Err(StatementError::InvalidPageSize(page_size));
    }
    let page_size = usize::try_from(page_size).unwrap_or(usize::MAX);
    let total_items = records.len();
    let total_pages = total_pages(total_items, page_size);

    let page_number = usize::try_from(page_number.max(1))
        .unwrap_or(usize::MAX)
        .min(total_pages);

    let start = (page_number - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Ok(Page {
        items: records[start..end].to_vec(),
        page_number,
        total_pages,
        page_size,
        total_items,
    })
}
