//! Page slicing for filtered results.

use serde::Serialize;

/// One rendered page of results.
///
/// `current_page` is the requested page clamped into the valid range;
/// `total_pages` is zero when there are no results, which still renders as a
/// single empty page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> PageView<T> {
    /// `true` when the filter matched nothing.
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }

    /// Number of pages a pager should display (at least one).
    pub fn display_pages(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// 1-based positions of the first and last item on this page.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.current_page as usize - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }

    /// Map the items while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageView<U> {
        PageView {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            page_size: self.page_size,
        }
    }
}

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    u32::try_from(len.div_ceil(page_size)).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `[1, max(1, total_pages)]`.
pub fn clamp_page(requested: u32, total_pages: u32) -> u32 {
    requested.clamp(1, total_pages.max(1))
}

/// Slice `items` into page `requested_page` of size `page_size`.
///
/// The requested page is clamped for display only; callers keep their own
/// requested value. A zero `page_size` is treated as one item per page.
pub fn paginate<T: Clone>(items: &[T], requested_page: u32, page_size: usize) -> PageView<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = clamp_page(requested_page, total_pages);
    let start = (current_page as usize - 1).saturating_mul(page_size);
    let page_items = if start >= items.len() {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(items.len());
        items[start..end].to_vec()
    };
    PageView {
        items: page_items,
        current_page,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_list_renders_single_empty_page() {
        let view = paginate::<u8>(&[], 1, 9);
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.display_pages(), 1);
        assert_eq!(view.current_page, 1);
        assert!(view.items.is_empty());
        assert!(view.is_empty());
        assert_eq!(view.item_range(), None);
    }

    #[test]
    fn pages_are_sliced_in_order_with_a_short_last_page() {
        let items: Vec<u32> = (1..=20).collect();
        let first = paginate(&items, 1, 9);
        assert_eq!(first.items, (1..=9).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);

        let second = paginate(&items, 2, 9);
        assert_eq!(second.items, (10..=18).collect::<Vec<_>>());
        assert_eq!(second.item_range(), Some((10, 18)));

        let last = paginate(&items, 3, 9);
        assert_eq!(last.items, vec![19, 20]);
    }

    #[test]
    fn out_of_range_requests_are_clamped_for_display() {
        let items: Vec<u32> = (1..=15).collect();
        let beyond = paginate(&items, 7, 9);
        assert_eq!(beyond.current_page, 2);
        assert_eq!(beyond.items, (10..=15).collect::<Vec<_>>());

        let zero = paginate(&items, 0, 9);
        assert_eq!(zero.current_page, 1);
        assert_eq!(zero.items.len(), 9);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let view = paginate(&[1, 2, 3], 2, 0);
        assert_eq!(view.items, vec![2]);
        assert_eq!(view.total_pages, 3);
    }

    proptest! {
        #[test]
        fn page_never_exceeds_page_size(
            len in 0usize..200,
            page in 0u32..50,
            page_size in 1usize..30,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let view = paginate(&items, page, page_size);
            prop_assert!(view.items.len() <= page_size);
            prop_assert!(view.current_page >= 1);
            prop_assert!(view.current_page <= view.display_pages());
            if view.total_pages == 0 {
                prop_assert!(view.items.is_empty());
            } else {
                prop_assert!(!view.items.is_empty());
            }
        }
    }
}
