//! The declarative query state.
//!
//! A [`QueryState`] is an immutable value: every builder method consumes
//! the state and returns the updated one, so a screen replaces its query
//! wholesale on each user action rather than patching it in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ordering::{Dir, OrderBy};
use crate::range::{DateRange, NumericRange};

/// Free-text search, categorical selections, date ranges, numeric ranges
/// and sort keys.
///
/// An absent or empty entry for a dimension means "no constraint on that
/// dimension", never "exclude everything".
///
/// # Example
///
/// ```
/// use deskview_query::{NumericRange, QueryState};
///
/// let query = QueryState::new()
///     .with_search("boiler")
///     .select("status", "open")
///     .select("status", "closed")
///     .numeric_range("amount", NumericRange::between(500.0, 1000.0))
///     .order_desc("amount");
///
/// assert_eq!(query.selected("status"), ["open", "closed"]);
/// assert!(!query.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    #[serde(skip_serializing_if = "String::is_empty")]
    search: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    filters: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    date_ranges: BTreeMap<String, DateRange>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    numeric_ranges: BTreeMap<String, NumericRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    order: Vec<OrderBy>,
}

impl QueryState {
    /// Creates an empty query, which matches every record.
    pub fn new() -> Self {
        QueryState::default()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Replaces the free-text search.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Removes the free-text search.
    pub fn clear_search(self) -> Self {
        self.with_search(String::new())
    }

    // ========================================================================
    // Categorical selections
    // ========================================================================

    /// Adds a value to a dimension's selection.
    ///
    /// Idempotent: selecting a value that is already selected leaves the
    /// state unchanged.
    pub fn select(mut self, dimension: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let selected = self.filters.entry(dimension.to_string()).or_default();
        if !selected.contains(&value) {
            selected.push(value);
        }
        self
    }

    /// Removes a value from a dimension's selection.
    pub fn deselect(mut self, dimension: &str, value: &str) -> Self {
        if let Some(selected) = self.filters.get_mut(dimension) {
            selected.retain(|v| v != value);
            if selected.is_empty() {
                self.filters.remove(dimension);
            }
        }
        self
    }

    /// Selects the value if it is not selected, deselects it otherwise.
    pub fn toggle(self, dimension: &str, value: &str) -> Self {
        if self.is_selected(dimension, value) {
            self.deselect(dimension, value)
        } else {
            self.select(dimension, value)
        }
    }

    /// Replaces a dimension's selection. Duplicates are dropped and an
    /// empty list removes the constraint.
    pub fn set_values<I, S>(mut self, dimension: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !selected.contains(&value) {
                selected.push(value);
            }
        }
        if selected.is_empty() {
            self.filters.remove(dimension);
        } else {
            self.filters.insert(dimension.to_string(), selected);
        }
        self
    }

    // ========================================================================
    // Ranges
    // ========================================================================

    /// Sets a date range; a range without `from` removes the constraint.
    pub fn date_range(mut self, dimension: &str, range: DateRange) -> Self {
        if range.is_active() {
            self.date_ranges.insert(dimension.to_string(), range);
        } else {
            self.date_ranges.remove(dimension);
        }
        self
    }

    /// Sets a numeric range; a range with no bounds removes the constraint.
    pub fn numeric_range(mut self, dimension: &str, range: NumericRange) -> Self {
        if range.is_active() {
            self.numeric_ranges.insert(dimension.to_string(), range);
        } else {
            self.numeric_ranges.remove(dimension);
        }
        self
    }

    // ========================================================================
    // Clearing
    // ========================================================================

    /// Removes every constraint on one dimension, leaving the others intact.
    pub fn clear(mut self, dimension: &str) -> Self {
        self.filters.remove(dimension);
        self.date_ranges.remove(dimension);
        self.numeric_ranges.remove(dimension);
        self
    }

    /// Removes every dimension constraint. Search text and sort keys are kept.
    pub fn clear_filters(mut self) -> Self {
        self.filters.clear();
        self.date_ranges.clear();
        self.numeric_ranges.clear();
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Appends a sort key. A key on a field already sorted is replaced.
    pub fn order_by(mut self, field: &str, dir: Dir) -> Self {
        self.order.retain(|o| o.field != field);
        self.order.push(OrderBy::new(field, dir));
        self
    }

    /// Appends an ascending sort key.
    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, Dir::Asc)
    }

    /// Appends a descending sort key.
    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, Dir::Desc)
    }

    /// Removes all sort keys.
    pub fn clear_order(mut self) -> Self {
        self.order.clear();
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The raw search text.
    pub fn search_text(&self) -> &str {
        &self.search
    }

    /// The lowercased search text, or `None` when it is empty.
    ///
    /// Whitespace is part of the needle.
    pub fn search_needle(&self) -> Option<String> {
        if self.search.is_empty() {
            None
        } else {
            Some(self.search.to_lowercase())
        }
    }

    /// All categorical selections.
    pub fn filters(&self) -> &BTreeMap<String, Vec<String>> {
        &self.filters
    }

    /// Selected values of one dimension (empty when unconstrained).
    pub fn selected(&self, dimension: &str) -> &[String] {
        self.filters
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if `value` is selected on `dimension`.
    pub fn is_selected(&self, dimension: &str, value: &str) -> bool {
        self.selected(dimension).iter().any(|v| v == value)
    }

    /// All date ranges.
    pub fn date_ranges(&self) -> &BTreeMap<String, DateRange> {
        &self.date_ranges
    }

    /// All numeric ranges.
    pub fn numeric_ranges(&self) -> &BTreeMap<String, NumericRange> {
        &self.numeric_ranges
    }

    /// The sort keys, primary first.
    pub fn orderings(&self) -> &[OrderBy] {
        &self.order
    }

    /// Returns `true` if the query constrains nothing.
    ///
    /// Sort keys do not count as constraints.
    pub fn is_empty(&self) -> bool {
        self.search_needle().is_none()
            && self.filters.values().all(Vec::is_empty)
            && self.date_ranges.values().all(|r| !r.is_active())
            && self.numeric_ranges.values().all(|r| !r.is_active())
    }

    /// A copy of this query with every constraint on `dimension` removed.
    ///
    /// Used to compute dependent option counts.
    pub fn without_dimension(&self, dimension: &str) -> QueryState {
        self.clone().clear(dimension)
    }

    /// Human-readable description of the active constraints, e.g.
    /// `search "wo", status in [open, closed], amount 500..1000`.
    ///
    /// Returns `None` for an unconstrained query.
    pub fn summary(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if let Some(needle) = self.search_needle() {
            parts.push(format!("search \"{}\"", needle));
        }
        for (dimension, values) in &self.filters {
            if !values.is_empty() {
                parts.push(format!("{} in [{}]", dimension, values.join(", ")));
            }
        }
        for (dimension, range) in &self.date_ranges {
            if range.is_active() {
                parts.push(format!("{} {}", dimension, range));
            }
        }
        for (dimension, range) in &self.numeric_ranges {
            if range.is_active() {
                parts.push(format!("{} {}", dimension, range));
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
