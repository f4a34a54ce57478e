//! ListView result type and builder.
//!
//! ListView is the standard shape of a list screen's output:
//! - Introduction text (optional header)
//! - The visible page of items
//! - Page position and match counts
//! - Facet option groups for the filter panel
//! - Ending text and status messages

use deskview_query::{FacetGroup, Page, ScreenView};
use serde::Serialize;

use super::{Message, MessageLevel};

/// Where the visible items sit in the matched collection.
///
/// `page` is 1-based here; the engine counts pages from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub first_item: usize,
    pub last_item: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn of<T>(page: &Page<'_, T>) -> Self {
        PageInfo {
            page: page.page + 1,
            per_page: page.items_per_page,
            total_pages: page.total_pages,
            first_item: page.first_item(),
            last_item: page.last_item(),
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        }
    }
}

/// Result type for list screens.
#[derive(Debug, Clone, Serialize)]
pub struct ListViewResult<T> {
    /// Items on the visible page (post-filtering, post-ordering).
    pub items: Vec<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,

    /// Number of matching records across all pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,

    /// Number of records before filtering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_records: Option<usize>,

    /// Applied filters summary (for "filtered by: ...").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_summary: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<FacetGroup>,
}

impl<T> ListViewResult<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            intro: None,
            ending: None,
            messages: Vec::new(),
            page: None,
            total_count: None,
            total_records: None,
            filter_summary: None,
            facets: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// "Showing 11-20 of 42" style footer, when page info is present.
    pub fn showing(&self) -> Option<String> {
        let page = self.page?;
        let total = self.total_count.unwrap_or(self.items.len());
        if total == 0 {
            return Some("No matching records".to_string());
        }
        Some(format!(
            "Showing {}-{} of {} (page {} of {})",
            page.first_item, page.last_item, total, page.page, page.total_pages
        ))
    }
}

impl<T> Default for ListViewResult<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Builder for constructing `ListViewResult` instances.
///
/// Use [`list_view()`] to start building:
///
/// ```rust
/// use deskview::views::list_view;
///
/// let result = list_view(vec!["WO-1", "WO-2"])
///     .intro("Work orders")
///     .total_count(12)
///     .build();
/// assert_eq!(result.len(), 2);
/// ```
#[derive(Debug)]
pub struct ListViewBuilder<T> {
    result: ListViewResult<T>,
}

impl<T> ListViewBuilder<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            result: ListViewResult::new(items.into_iter().collect()),
        }
    }

    pub fn intro(mut self, text: impl Into<String>) -> Self {
        self.result.intro = Some(text.into());
        self
    }

    pub fn ending(mut self, text: impl Into<String>) -> Self {
        self.result.ending = Some(text.into());
        self
    }

    pub fn message(mut self, level: MessageLevel, text: impl Into<String>) -> Self {
        self.result.messages.push(Message::new(level, text));
        self
    }

    pub fn info(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Info, text)
    }

    pub fn success(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Success, text)
    }

    pub fn warning(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Warning, text)
    }

    pub fn error(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Error, text)
    }

    pub fn page(mut self, page: PageInfo) -> Self {
        self.result.page = Some(page);
        self
    }

    pub fn total_count(mut self, count: usize) -> Self {
        self.result.total_count = Some(count);
        self
    }

    pub fn total_records(mut self, count: usize) -> Self {
        self.result.total_records = Some(count);
        self
    }

    /// Set the filter summary text, e.g. `status in [open], amount 500..1000`.
    pub fn filter_summary(mut self, summary: impl Into<String>) -> Self {
        self.result.filter_summary = Some(summary.into());
        self
    }

    pub fn facets(mut self, facets: Vec<FacetGroup>) -> Self {
        self.result.facets = facets;
        self
    }

    pub fn build(self) -> ListViewResult<T> {
        self.result
    }
}

/// Start building a list view from items.
pub fn list_view<T>(items: impl IntoIterator<Item = T>) -> ListViewBuilder<T> {
    ListViewBuilder::new(items)
}

impl<'a, T> ListViewBuilder<&'a T> {
    /// Builder pre-filled from an evaluated screen: the visible page, its
    /// position, the counts and the effective filter summary.
    ///
    /// Facets are left out; add them with [`ListViewBuilder::facets`].
    pub fn from_screen(view: &ScreenView<'a, T>) -> Self {
        let page = view.page();
        let mut builder = ListViewBuilder::new(page.items.iter().copied())
            .page(PageInfo::of(&page))
            .total_count(view.total_matched())
            .total_records(view.total_records);
        if let Some(summary) = view.query.summary() {
            builder = builder.filter_summary(summary);
        }
        builder
    }
}
