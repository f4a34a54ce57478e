//! The option aggregator.
//!
//! Builds the option lists and per-option record counts that filter widgets
//! render. Only categorical values are aggregated: dates and numbers are
//! continuous and use range widgets instead.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::accessor::Accessors;
use crate::filter;
use crate::query::QueryState;
use crate::schema::DimensionSpec;

/// One entry of a filter widget's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    /// Number of records carrying this value.
    pub count: usize,
}

/// Distinct values and counts per dimension.
///
/// Values are kept in ascending order. An `OptionSet` is always recomputed
/// wholesale from a record collection, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    counts: BTreeMap<String, BTreeMap<String, usize>>,
    total: usize,
}

impl OptionSet {
    /// Distinct values of a dimension, ascending.
    pub fn values(&self, dimension: &str) -> Vec<&str> {
        self.counts
            .get(dimension)
            .map(|c| c.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Number of records carrying `value` on `dimension`.
    pub fn count(&self, dimension: &str, value: &str) -> usize {
        self.counts
            .get(dimension)
            .and_then(|c| c.get(value))
            .copied()
            .unwrap_or(0)
    }

    pub fn counts(&self, dimension: &str) -> Option<&BTreeMap<String, usize>> {
        self.counts.get(dimension)
    }

    /// Options of a dimension, labelled with the values themselves.
    pub fn options(&self, dimension: &str) -> Vec<FacetOption> {
        self.counts
            .get(dimension)
            .map(|counts| {
                counts
                    .iter()
                    .map(|(value, &count)| FacetOption {
                        value: value.clone(),
                        label: value.clone(),
                        count,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Options of a dimension, labelled through its declaration.
    pub fn options_for(&self, spec: &DimensionSpec) -> Vec<FacetOption> {
        self.options(&spec.name)
            .into_iter()
            .map(|mut option| {
                option.label = spec.label_for(&option.value).to_string();
                option
            })
            .collect()
    }

    /// Options whose value contains `needle`, case-insensitively.
    pub fn search(&self, dimension: &str, needle: &str) -> Vec<FacetOption> {
        let needle = needle.to_lowercase();
        self.options(dimension)
            .into_iter()
            .filter(|o| o.value.to_lowercase().contains(&needle))
            .collect()
    }

    /// Number of records the set was computed from.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` if no dimension has any value.
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(BTreeMap::is_empty)
    }

    /// Dimension names present in the set, ascending.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

/// Collects distinct values and their counts for each named dimension.
///
/// List values are flattened; blank values and records without a value are
/// skipped. A value repeated inside one record's list counts once for that
/// record. Every requested dimension is present in the result, possibly
/// with no values.
///
/// ```
/// use deskview_query::{aggregate, Accessors, FieldValue};
///
/// fn field<'a>(status: &'a &'static str, _: &str) -> FieldValue<'a> {
///     FieldValue::text(status)
/// }
///
/// let records = vec!["open", "closed", "open", " "];
/// let set = aggregate(&records, &Accessors::fields_only(field), &["status"]);
///
/// assert_eq!(set.values("status"), vec!["closed", "open"]);
/// assert_eq!(set.count("status", "open"), 2);
/// ```
pub fn aggregate<T, S: AsRef<str>>(
    records: &[T],
    accessors: &Accessors<T>,
    dimensions: &[S],
) -> OptionSet {
    aggregate_over(records.iter(), accessors, dimensions)
}

/// Counts for one dimension over the records matched by every constraint
/// of `query` except those on `dimension` itself.
///
/// This is what a dependent dropdown shows: picking a value in one
/// dimension never hides the alternatives in that same dimension.
pub fn aggregate_dependent<T>(
    records: &[T],
    accessors: &Accessors<T>,
    query: &QueryState,
    dimension: &str,
) -> OptionSet {
    let relaxed = query.without_dimension(dimension);
    let matching = filter::filter_staged(records, accessors, &relaxed, &filter::Stage::ALL);
    aggregate_over(matching.iter().map(|&i| &records[i]), accessors, &[dimension])
}

fn aggregate_over<'r, T: 'r, S: AsRef<str>>(
    records: impl Iterator<Item = &'r T>,
    accessors: &Accessors<T>,
    dimensions: &[S],
) -> OptionSet {
    let mut counts: BTreeMap<String, BTreeMap<String, usize>> = dimensions
        .iter()
        .map(|d| (d.as_ref().to_string(), BTreeMap::new()))
        .collect();
    let mut total = 0;

    for record in records {
        total += 1;
        for dimension in dimensions {
            let dimension = dimension.as_ref();
            let value = accessors.value(record, dimension);
            let distinct: BTreeSet<&str> = value
                .texts()
                .into_iter()
                .filter(|v| !v.trim().is_empty())
                .collect();
            if distinct.is_empty() {
                continue;
            }
            if let Some(per_value) = counts.get_mut(dimension) {
                for v in distinct {
                    *per_value.entry(v.to_string()).or_insert(0) += 1;
                }
            }
        }
    }

    OptionSet { counts, total }
}
