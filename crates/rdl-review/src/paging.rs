//! 1-based pagination over an already-sorted slice.

use rdl_core::responses::Page;

/// Number of pages needed for `total` rows, `per_page` rows each.
#[must_use]
pub const fn total_pages(total: usize, per_page: u32) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page as usize)
}

/// Cut page `page` out of `items`.
///
/// Returns `None` for a page outside `1..=total_pages`, so the caller keeps
/// its current page. An empty listing still has an (empty) page 1.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: u32, per_page: u32) -> Option<Page<T>> {
    if per_page == 0 || page == 0 {
        return None;
    }
    let pages = total_pages(items.len(), per_page).max(1);
    if page as usize > pages {
        return None;
    }

    let start = (page as usize - 1) * per_page as usize;
    let end = (start + per_page as usize).min(items.len());
    let slice = items.get(start..end).unwrap_or_default();

    Some(Page {
        items: slice.to_vec(),
        page,
        per_page,
        total_pages: u32::try_from(total_pages(items.len(), per_page)).unwrap_or(u32::MAX),
        total_items: u32::try_from(items.len()).unwrap_or(u32::MAX),
    })
}
