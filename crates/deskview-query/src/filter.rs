//! The filter engine.
//!
//! Pure functions from `(records, accessors, query)` to the matching
//! records. Matching combines four predicate stages with AND:
//!
//! ```text
//! match = search (any term contains the needle, case-insensitive)
//!       ∧ every categorical dimension (value ∩ selection ≠ ∅)
//!       ∧ every date range (from <= date <= to)
//!       ∧ every numeric range (min <= n <= max, NaN never)
//! ```
//!
//! Within a categorical dimension the selected values are OR-ed. An empty
//! selection, a blank search or a range without bounds constrains nothing.

use tracing::debug;

use crate::accessor::Accessors;
use crate::ordering::compare_by_orderings;
use crate::query::QueryState;
use crate::value::FieldValue;

/// One predicate category of the filter engine.
///
/// The stages are independent, so the order in which they run never changes
/// the result; [`filter_staged`] exists to make that observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Search,
    Categories,
    Dates,
    Numbers,
}

impl Stage {
    /// Stages in the order the engine evaluates them.
    pub const ALL: [Stage; 4] = [Stage::Search, Stage::Categories, Stage::Dates, Stage::Numbers];

    fn check<T>(
        self,
        record: &T,
        accessors: &Accessors<T>,
        query: &QueryState,
        needle: Option<&str>,
    ) -> bool {
        match self {
            Stage::Search => needle.map_or(true, |n| matches_search(record, accessors, n)),
            Stage::Categories => matches_categories(record, accessors, query),
            Stage::Dates => matches_dates(record, accessors, query),
            Stage::Numbers => matches_numbers(record, accessors, query),
        }
    }
}

/// Tests whether one record satisfies every constraint of the query.
pub fn matches<T>(record: &T, accessors: &Accessors<T>, query: &QueryState) -> bool {
    let needle = query.search_needle();
    Stage::ALL
        .iter()
        .all(|stage| stage.check(record, accessors, query, needle.as_deref()))
}

/// Indices of the matching records, sorted by the query's sort keys.
///
/// Without sort keys the input order is kept; the sort is stable.
pub fn filter_indices<T>(records: &[T], accessors: &Accessors<T>, query: &QueryState) -> Vec<usize> {
    let mut indices = filter_staged(records, accessors, query, &Stage::ALL);

    if !query.orderings().is_empty() {
        indices.sort_by(|&a, &b| {
            compare_by_orderings(&records[a], &records[b], query.orderings(), accessors)
        });
    }

    debug!(
        total = records.len(),
        matched = indices.len(),
        "filtered records"
    );
    indices
}

/// Runs the predicate stages one after another in the given order,
/// narrowing the candidate set at each step. Sort keys are ignored.
pub fn filter_staged<T>(
    records: &[T],
    accessors: &Accessors<T>,
    query: &QueryState,
    stages: &[Stage],
) -> Vec<usize> {
    let needle = query.search_needle();
    let mut indices: Vec<usize> = (0..records.len()).collect();
    for stage in stages {
        indices.retain(|&i| stage.check(&records[i], accessors, query, needle.as_deref()));
    }
    indices
}

/// The matching records, sorted by the query's sort keys.
///
/// # Example
///
/// ```
/// use deskview_query::{filter, Accessors, FieldValue, QueryState};
///
/// struct Ticket {
///     subject: &'static str,
///     status: &'static str,
/// }
///
/// fn field<'a>(t: &'a Ticket, dimension: &str) -> FieldValue<'a> {
///     match dimension {
///         "status" => FieldValue::text(t.status),
///         _ => FieldValue::None,
///     }
/// }
///
/// fn search(t: &Ticket) -> Vec<std::borrow::Cow<'_, str>> {
///     vec![t.subject.into()]
/// }
///
/// let tickets = vec![
///     Ticket { subject: "Printer jam", status: "open" },
///     Ticket { subject: "VPN down", status: "closed" },
///     Ticket { subject: "Printer toner", status: "closed" },
/// ];
///
/// let query = QueryState::new().with_search("printer").select("status", "closed");
/// let results = filter(&tickets, &Accessors::new(field, search), &query);
///
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].subject, "Printer toner");
/// ```
pub fn filter<'a, T>(records: &'a [T], accessors: &Accessors<T>, query: &QueryState) -> Vec<&'a T> {
    filter_indices(records, accessors, query)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Like [`filter`], but clones the matching records.
pub fn filter_cloned<T: Clone>(records: &[T], accessors: &Accessors<T>, query: &QueryState) -> Vec<T> {
    filter(records, accessors, query).into_iter().cloned().collect()
}

/// Number of matching records.
pub fn count<T>(records: &[T], accessors: &Accessors<T>, query: &QueryState) -> usize {
    records
        .iter()
        .filter(|record| matches(*record, accessors, query))
        .count()
}

// ============================================================================
// Predicates
// ============================================================================

/// `needle` must already be lowercased.
pub fn matches_search<T>(record: &T, accessors: &Accessors<T>, needle: &str) -> bool {
    accessors
        .search_terms(record)
        .iter()
        .any(|term| term.to_lowercase().contains(needle))
}

pub fn matches_categories<T>(record: &T, accessors: &Accessors<T>, query: &QueryState) -> bool {
    query.filters().iter().all(|(dimension, selected)| {
        if selected.is_empty() {
            return true;
        }
        let value = accessors.value(record, dimension);
        value
            .texts()
            .iter()
            .any(|v| selected.iter().any(|s| s == v))
    })
}

pub fn matches_dates<T>(record: &T, accessors: &Accessors<T>, query: &QueryState) -> bool {
    query.date_ranges().iter().all(|(dimension, range)| {
        if !range.is_active() {
            return true;
        }
        match accessors.value(record, dimension) {
            FieldValue::Date(date) => range.contains(date),
            _ => false,
        }
    })
}

pub fn matches_numbers<T>(record: &T, accessors: &Accessors<T>, query: &QueryState) -> bool {
    query.numeric_ranges().iter().all(|(dimension, range)| {
        if !range.is_active() {
            return true;
        }
        match accessors.value(record, dimension) {
            FieldValue::Number(n) => range.contains(n),
            _ => false,
        }
    })
}
