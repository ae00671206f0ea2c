use serde::Serialize;

use crate::listing::PageInfo;

/// Computes the page-number window rendered under a table: first/last edges,
/// a span around the current page, and `None` gaps where pages are elided.
fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(total_pages + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

/// Page of items shaped for template rendering.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, info: &PageInfo) -> Self {
        let pages = page_window(info.total_pages, info.page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: info.page,
            total_pages: info.total_pages,
            total: info.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_no_pages() {
        let paginated = Paginated::<i32>::new(vec![], &PageInfo::new(1, 10, 0));
        assert!(paginated.pages.is_empty());
        assert_eq!(paginated.page, 1);
    }

    #[test]
    fn short_lists_render_every_page() {
        let paginated = Paginated::<i32>::new(vec![], &PageInfo::new(1, 10, 30));
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn long_lists_elide_middle_pages() {
        let paginated = Paginated::<i32>::new(vec![], &PageInfo::new(10, 10, 200));
        let pages = paginated.pages;
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(20)));
        assert!(pages.contains(&None));
        assert!(pages.contains(&Some(10)));
    }
}
