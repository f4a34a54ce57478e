//! The pagination engine.
//!
//! [`PageState`] is the immutable value a screen stores; [`Paginator`] wraps
//! it with the navigation operations and the clamp that runs whenever the
//! number of items changes.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryError, Result};

/// Default number of items per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Zero-based page index and page size.
///
/// ```
/// use deskview_query::PageState;
///
/// let state = PageState::new(4, 10).unwrap();
/// assert_eq!(state.total_pages(35), 4);
///
/// // After the collection shrinks, the page is pulled back into range.
/// assert_eq!(state.clamped(12).page(), 1);
/// assert_eq!(state.clamped(0).page(), 0);
/// ```
///
/// A zero page size is rejected on construction and on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageState")]
pub struct PageState {
    page: usize,
    items_per_page: usize,
}

#[derive(Deserialize)]
struct RawPageState {
    page: usize,
    items_per_page: usize,
}

impl TryFrom<RawPageState> for PageState {
    type Error = QueryError;

    fn try_from(raw: RawPageState) -> Result<Self> {
        PageState::new(raw.page, raw.items_per_page)
    }
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            page: 0,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PageState {
    pub fn new(page: usize, items_per_page: usize) -> Result<Self> {
        if items_per_page == 0 {
            return Err(QueryError::InvalidPageSize);
        }
        Ok(PageState {
            page,
            items_per_page,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// The same page size on another page.
    pub fn with_page(self, page: usize) -> Self {
        PageState { page, ..self }
    }

    /// A new page size. The page resets to the first one.
    pub fn with_items_per_page(self, items_per_page: usize) -> Result<Self> {
        PageState::new(0, items_per_page)
    }

    /// `ceil(total_items / items_per_page)`; zero for an empty collection.
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.items_per_page.max(1))
    }

    /// Pulls the page back into `0..max(total_pages, 1)`.
    pub fn clamped(self, total_items: usize) -> Self {
        let total_pages = self.total_pages(total_items);
        let page = if total_pages == 0 {
            0
        } else {
            self.page.min(total_pages - 1)
        };
        self.with_page(page)
    }

    /// Index range of the visible items, `page * n .. min((page + 1) * n, len)`.
    ///
    /// Empty when the page lies past the end.
    pub fn range(&self, total_items: usize) -> Range<usize> {
        let start = self
            .page
            .saturating_mul(self.items_per_page)
            .min(total_items);
        let end = start.saturating_add(self.items_per_page).min(total_items);
        start..end
    }
}

/// One page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub items_per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// 1-based position of the first visible item, 0 when the page is empty.
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.page * self.items_per_page + 1
        }
    }

    /// 1-based position of the last visible item, 0 when the page is empty.
    pub fn last_item(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.page * self.items_per_page + self.items.len()
        }
    }
}

/// Slices `items` according to `state`, without clamping.
pub fn paginate<T>(items: &[T], state: PageState) -> Page<'_, T> {
    Page {
        items: &items[state.range(items.len())],
        page: state.page,
        items_per_page: state.items_per_page,
        total_pages: state.total_pages(items.len()),
        total_items: items.len(),
    }
}

/// Stateful page controller.
///
/// Remembers the size of the collection it last saw so that navigation
/// stays in range; call [`Paginator::sync`] (or [`Paginator::paginate`])
/// whenever the collection changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paginator {
    state: PageState,
    total_items: Option<usize>,
}

impl Paginator {
    pub fn new(state: PageState) -> Self {
        Paginator {
            state,
            total_items: None,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn items_per_page(&self) -> usize {
        self.state.items_per_page
    }

    /// Total pages of the last synced collection, if any.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_items.map(|n| self.state.total_pages(n))
    }

    /// Jumps to a page, clamped against the last synced collection.
    pub fn set_page(&mut self, page: usize) {
        self.state = self.state.with_page(page);
        self.clamp();
    }

    /// Changes the page size and returns to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        self.state = self.state.with_items_per_page(items_per_page)?;
        Ok(())
    }

    pub fn next(&mut self) {
        self.set_page(self.state.page.saturating_add(1));
    }

    pub fn prev(&mut self) {
        self.set_page(self.state.page.saturating_sub(1));
    }

    pub fn first(&mut self) {
        self.set_page(0);
    }

    /// Goes to the last page of the synced collection.
    pub fn last(&mut self) {
        self.set_page(usize::MAX);
    }

    pub fn reset(&mut self, state: PageState) {
        self.state = state;
        self.clamp();
    }

    /// Records the collection size and clamps the page.
    pub fn sync(&mut self, total_items: usize) {
        self.total_items = Some(total_items);
        self.clamp();
    }

    /// Syncs against `items` and returns the visible page.
    pub fn paginate<'a, T>(&mut self, items: &'a [T]) -> Page<'a, T> {
        self.sync(items.len());
        paginate(items, self.state)
    }

    fn clamp(&mut self) {
        let Some(total_items) = self.total_items else {
            return;
        };
        let clamped = self.state.clamped(total_items);
        if clamped != self.state {
            debug!(
                from = self.state.page,
                to = clamped.page,
                total_items,
                "clamped page"
            );
            self.state = clamped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_rejected() {
        assert_eq!(PageState::new(0, 0), Err(QueryError::InvalidPageSize));
        assert!(PageState::default().with_items_per_page(0).is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let state = PageState::new(0, 10).unwrap();
        assert_eq!(state.total_pages(0), 0);
        assert_eq!(state.total_pages(1), 1);
        assert_eq!(state.total_pages(10), 1);
        assert_eq!(state.total_pages(11), 2);
    }

    #[test]
    fn range_of_last_partial_page() {
        let state = PageState::new(2, 5).unwrap();
        assert_eq!(state.range(12), 10..12);
        assert_eq!(state.range(7), 7..7);
    }

    #[test]
    fn clamp_rules() {
        let state = PageState::new(5, 10).unwrap();
        assert_eq!(state.clamped(25).page(), 2);
        assert_eq!(state.clamped(0).page(), 0);
        assert_eq!(state.clamped(100).page(), 5);
    }

    #[test]
    fn deserialize_validates_page_size() {
        let state: PageState = serde_json::from_str(r#"{"page":3,"items_per_page":25}"#).unwrap();
        assert_eq!((state.page(), state.items_per_page()), (3, 25));

        let err = serde_json::from_str::<PageState>(r#"{"page":3,"items_per_page":0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn page_flags_and_item_positions() {
        let items: Vec<u32> = (1..=12).collect();
        let page = paginate(&items, PageState::new(1, 5).unwrap());

        assert_eq!(page.items, &[6, 7, 8, 9, 10]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(page.has_next());
        assert_eq!((page.first_item(), page.last_item()), (6, 10));

        let none: Vec<u32> = Vec::new();
        let empty = paginate(&none, PageState::default());
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next());
        assert!(!empty.has_prev());
        assert_eq!((empty.first_item(), empty.last_item()), (0, 0));
    }

    #[test]
    fn paginator_navigation() {
        let items: Vec<u32> = (0..23).collect();
        let mut paginator = Paginator::new(PageState::new(0, 10).unwrap());
        paginator.sync(items.len());

        paginator.next();
        assert_eq!(paginator.page(), 1);
        paginator.last();
        assert_eq!(paginator.page(), 2);
        paginator.next();
        assert_eq!(paginator.page(), 2);
        paginator.prev();
        assert_eq!(paginator.page(), 1);
        paginator.first();
        assert_eq!(paginator.page(), 0);
        paginator.prev();
        assert_eq!(paginator.page(), 0);
        assert_eq!(paginator.total_pages(), Some(3));
    }

    #[test]
    fn paginator_clamps_when_collection_shrinks() {
        let mut paginator = Paginator::new(PageState::new(0, 10).unwrap());
        paginator.sync(50);
        paginator.set_page(4);

        let items: Vec<u32> = (0..15).collect();
        let page = paginator.paginate(&items);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 5);

        paginator.sync(0);
        assert_eq!(paginator.page(), 0);
    }

    #[test]
    fn changing_page_size_resets_page() {
        let mut paginator = Paginator::new(PageState::new(3, 10).unwrap());
        paginator.set_items_per_page(25).unwrap();
        assert_eq!(paginator.page(), 0);
        assert_eq!(paginator.items_per_page(), 25);
        assert!(paginator.set_items_per_page(0).is_err());
        assert_eq!(paginator.items_per_page(), 25);
    }

    #[test]
    fn unsynced_paginator_does_not_clamp() {
        let mut paginator = Paginator::default();
        paginator.set_page(7);
        assert_eq!(paginator.page(), 7);
        assert_eq!(paginator.total_pages(), None);
    }
}
