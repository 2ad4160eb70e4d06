//! Fixed-size paging over an already filtered sequence.
//!
//! Pages are 1-based. An empty sequence still has one (empty) page so the
//! cursor always points somewhere valid.

use serde::Serialize;

/// Pages shown in full before the selector starts collapsing with ellipses.
const MAX_VISIBLE_PAGES: usize = 5;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// The selector is only worth drawing when there is more than one page.
    pub fn needs_selector(&self) -> bool {
        self.total_pages > 1
    }
}

/// Slice out `page` (clamped into range) of `items`.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let current = clamp_page(page, total);

    let start = ((current - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        current_page: current,
        total_pages: total,
        total_items: items.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "page")]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Buttons for the page selector.
///
/// Up to five pages are listed in full. Beyond that the first and last page
/// are always present, the current page is shown with its neighbours, and
/// gaps are collapsed into a single ellipsis on either side.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageMarker> {
    let total = total.max(1);
    let current = clamp_page(current, total);

    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let mut markers = vec![PageMarker::Page(1)];

    if current > 3 {
        markers.push(PageMarker::Ellipsis);
    }

    let window_start = 2.max(current.saturating_sub(1));
    let window_end = (total - 1).min(current + 1);
    markers.extend((window_start..=window_end).map(PageMarker::Page));

    if current + 2 < total {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total));
    markers
}

/// Current page of one paginated view.
///
/// The cursor never trusts a requested page number: every move is clamped
/// against the total page count the caller last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    current: usize,
}

impl PageCursor {
    pub fn new() -> Self {
        Self { current: 1 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn go_to(&mut self, page: usize, total_pages: usize) -> usize {
        self.current = clamp_page(page, total_pages);
        self.current
    }

    pub fn first(&mut self) -> usize {
        self.current = 1;
        self.current
    }

    pub fn previous(&mut self, total_pages: usize) -> usize {
        let target = self.current.saturating_sub(1);
        self.go_to(target, total_pages)
    }

    pub fn next(&mut self, total_pages: usize) -> usize {
        let target = self.current + 1;
        self.go_to(target, total_pages)
    }

    pub fn last(&mut self, total_pages: usize) -> usize {
        self.go_to(total_pages, total_pages)
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Pull the cursor back in range after the underlying sequence shrank.
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.current = clamp_page(self.current, total_pages);
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::PageMarker::{Ellipsis, Page as P};

    #[test]
    fn total_pages_rounds_up_and_never_hits_zero() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        for len in 0..40usize {
            let items: Vec<usize> = (0..len).collect();
            for page_size in 1..12usize {
                let total = total_pages(len, page_size);
                if len > 0 {
                    assert_eq!(total, (len + page_size - 1) / page_size);
                }

                let rebuilt: Vec<usize> = (1..=total)
                    .flat_map(|page| paginate(&items, page_size, page).items)
                    .collect();
                assert_eq!(rebuilt, items, "len={len} page_size={page_size}");
            }
        }
    }

    #[test]
    fn empty_input_is_a_single_empty_page() {
        let page = paginate::<u8>(&[], 10, 1);
        assert!(page.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.needs_selector());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let items: Vec<u32> = (0..25).collect();

        let page = paginate(&items, 10, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items, (0..10).collect::<Vec<_>>());

        let page = paginate(&items, 10, 99);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items, (20..25).collect::<Vec<_>>());
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn short_selectors_list_every_page() {
        assert_eq!(page_numbers(1, 1), vec![P(1)]);
        assert_eq!(page_numbers(1, 3), vec![P(1), P(2), P(3)]);
        assert_eq!(page_numbers(4, 5), vec![P(1), P(2), P(3), P(4), P(5)]);
    }

    #[test]
    fn long_selectors_collapse_around_the_current_page() {
        assert_eq!(
            page_numbers(5, 10),
            vec![P(1), Ellipsis, P(4), P(5), P(6), Ellipsis, P(10)]
        );
        assert_eq!(page_numbers(1, 10), vec![P(1), P(2), Ellipsis, P(10)]);
        assert_eq!(page_numbers(2, 10), vec![P(1), P(2), P(3), Ellipsis, P(10)]);
        assert_eq!(page_numbers(3, 10), vec![P(1), P(2), P(3), P(4), Ellipsis, P(10)]);
        assert_eq!(page_numbers(8, 10), vec![P(1), Ellipsis, P(7), P(8), P(9), P(10)]);
        assert_eq!(page_numbers(10, 10), vec![P(1), Ellipsis, P(9), P(10)]);
        assert_eq!(page_numbers(3, 6), vec![P(1), P(2), P(3), P(4), Ellipsis, P(6)]);
    }

    #[test]
    fn selectors_never_repeat_or_misorder_pages() {
        for total in 1..30usize {
            for current in 1..=total {
                let markers = page_numbers(current, total);
                let pages: Vec<usize> = markers
                    .iter()
                    .filter_map(|marker| match marker {
                        P(n) => Some(*n),
                        Ellipsis => None,
                    })
                    .collect();

                assert!(pages.windows(2).all(|w| w[0] < w[1]), "{total}/{current}: {markers:?}");
                assert_eq!(pages.first(), Some(&1));
                assert_eq!(pages.last(), Some(&total));
                assert!(pages.contains(&current));
                assert!(
                    !markers.windows(2).any(|w| w[0] == Ellipsis && w[1] == Ellipsis),
                    "{total}/{current}: {markers:?}"
                );
            }
        }
    }

    #[test]
    fn cursor_moves_stay_in_bounds() {
        let mut cursor = PageCursor::new();
        assert_eq!(cursor.previous(4), 1);
        assert_eq!(cursor.next(4), 2);
        assert_eq!(cursor.last(4), 4);
        assert_eq!(cursor.next(4), 4);
        assert_eq!(cursor.go_to(0, 4), 1);
        assert_eq!(cursor.go_to(17, 4), 4);

        cursor.clamp_to(2);
        assert_eq!(cursor.current(), 2);

        cursor.reset();
        assert_eq!(cursor.current(), 1);
        assert_eq!(cursor.last(0), 1);
    }
}
