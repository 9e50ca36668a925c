use std::collections::BTreeSet;

/// One slot of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

/// `max(1, ceil(total / per_page))`.
pub fn last_page(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 1;
    }
    let pages = total.div_ceil(per_page as u64);
    pages.clamp(1, u32::MAX as u64) as u32
}

/// Page numbers to render: `1, 2`, a window of two around `page`, and
/// `last - 1, last`; ascending, deduplicated, with an ellipsis wherever two
/// kept numbers are not adjacent.
pub fn compute_page_numbers(page: u32, last_page: u32) -> Vec<PageItem> {
    let last = i64::from(last_page.max(1));
    let current = i64::from(page).clamp(1, last);

    let mut kept = BTreeSet::new();
    let candidates = [1, 2, last - 1, last]
        .into_iter()
        .chain((current - 2)..=(current + 2));
    for p in candidates {
        if (1..=last).contains(&p) {
            kept.insert(p as u32);
        }
    }

    let mut items = Vec::with_capacity(kept.len() * 2);
    let mut prev: Option<u32> = None;
    for p in kept {
        if let Some(prev) = prev {
            if p - prev > 1 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(p));
        prev = Some(p);
    }
    items
}

/// Which navigation buttons are disabled for the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavDisabled {
    pub first: bool,
    pub prev: bool,
    pub next: bool,
    pub last: bool,
}

impl NavDisabled {
    pub fn at(page: u32, last_page: u32) -> Self {
        let at_start = page <= 1;
        let at_end = page >= last_page.max(1);
        Self {
            first: at_start,
            prev: at_start,
            next: at_end,
            last: at_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pages(items: &[PageItem]) -> Vec<u32> {
        items
            .iter()
            .filter_map(|i| match i {
                PageItem::Page(p) => Some(*p),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_last_page_math() {
        assert_eq!(last_page(0, 25), 1);
        assert_eq!(last_page(17, 25), 1);
        assert_eq!(last_page(25, 25), 1);
        assert_eq!(last_page(26, 25), 2);
        assert_eq!(last_page(1000, 100), 10);
        assert_eq!(last_page(1001, 100), 11);
    }

    #[test]
    fn test_middle_window() {
        use PageItem::*;
        assert_eq!(
            compute_page_numbers(10, 20),
            vec![
                Page(1),
                Page(2),
                Ellipsis,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Ellipsis,
                Page(19),
                Page(20)
            ]
        );
    }

    #[test]
    fn test_small_ranges_have_no_ellipsis() {
        use PageItem::*;
        assert_eq!(compute_page_numbers(1, 1), vec![Page(1)]);
        assert_eq!(
            compute_page_numbers(1, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        // 1,2 + 3..=5 + 6,7 are all adjacent
        assert_eq!(pages(&compute_page_numbers(4, 7)), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_edges() {
        use PageItem::*;
        assert_eq!(
            compute_page_numbers(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(9), Page(10)]
        );
        assert_eq!(
            compute_page_numbers(10, 10),
            vec![Page(1), Page(2), Ellipsis, Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_empty_result_navigation() {
        let last = last_page(0, 50);
        assert_eq!(last, 1);
        let nav = NavDisabled::at(1, last);
        assert!(nav.first && nav.prev && nav.next && nav.last);
    }

    #[test]
    fn test_single_page_boundary() {
        let last = last_page(17, 25);
        assert_eq!(last, 1);
        assert_eq!(
            NavDisabled::at(1, last),
            NavDisabled {
                first: true,
                prev: true,
                next: true,
                last: true
            }
        );
    }

    #[test]
    fn test_middle_navigation_enabled() {
        let nav = NavDisabled::at(3, 5);
        assert!(!nav.first && !nav.prev && !nav.next && !nav.last);
    }

    proptest! {
        #[test]
        fn prop_last_page_is_ceil(total in 0u64..1_000_000, idx in 0usize..3) {
            let per_page = [25u32, 50, 100][idx];
            let expected = std::cmp::max(1, (total + per_page as u64 - 1) / per_page as u64);
            prop_assert_eq!(last_page(total, per_page) as u64, expected);
        }

        #[test]
        fn prop_page_numbers_invariants(last in 1u32..500, page_seed in 0u32..500) {
            let page = page_seed % last + 1;
            let items = compute_page_numbers(page, last);
            let nums = pages(&items);

            prop_assert!(nums.contains(&1));
            prop_assert!(nums.contains(&last));
            prop_assert!(nums.contains(&page));
            prop_assert!(nums.iter().all(|p| *p >= 1 && *p <= last));
            prop_assert!(nums.windows(2).all(|w| w[0] < w[1]));

            // ellipsis exactly where neighbours are not adjacent
            for (i, item) in items.iter().enumerate() {
                if let PageItem::Ellipsis = item {
                    prop_assert!(i > 0 && i + 1 < items.len());
                    match (items[i - 1], items[i + 1]) {
                        (PageItem::Page(a), PageItem::Page(b)) => prop_assert!(b - a > 1),
                        _ => prop_assert!(false, "ellipsis must sit between pages"),
                    }
                }
                if let (PageItem::Page(a), Some(PageItem::Page(b))) = (item, items.get(i + 1)) {
                    prop_assert_eq!(b - a, 1);
                }
            }

            prop_assert_eq!(items, compute_page_numbers(page, last));
        }
    }
}
