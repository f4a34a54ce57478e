//! Dimension declarations and the query-to-filter-UI binding.
//!
//! A [`Schema`] lists the dimensions a screen exposes. It is the single
//! place where a query is checked against what the screen actually
//! declared, and it owns the selection rules (single vs. multi select) the
//! filter widgets follow.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::options::{FacetOption, OptionSet};
use crate::query::QueryState;
use crate::traits::Filterable;

/// The kind of constraint a dimension accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    /// Discrete values selected from an option list.
    Category,
    /// Calendar dates constrained by a [`DateRange`](crate::DateRange).
    Date,
    /// Numbers constrained by a [`NumericRange`](crate::NumericRange).
    Number,
}

impl DimensionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DimensionKind::Category => "category",
            DimensionKind::Date => "date",
            DimensionKind::Number => "number",
        }
    }
}

impl fmt::Display for DimensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many values a categorical dimension may hold at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// One value at a time; selecting replaces.
    Single,
    /// Any number of values, OR-ed together.
    #[default]
    Multi,
}

/// A dimension as declared on a record type by `#[derive(Filterable)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub name: &'static str,
    pub kind: DimensionKind,
}

/// Full declaration of one filter dimension.
///
/// ```
/// use deskview_query::{DimensionSpec, Selection};
///
/// let status = DimensionSpec::category("status")
///     .label("Status")
///     .value_label("in_progress", "In progress")
///     .single();
///
/// assert_eq!(status.selection, Selection::Single);
/// assert_eq!(status.display_label(), "Status");
/// assert_eq!(status.label_for("in_progress"), "In progress");
/// assert_eq!(status.label_for("open"), "open");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub kind: DimensionKind,
    #[serde(default)]
    pub selection: Selection,
    /// Whether the option list of this dimension supports its own text search.
    #[serde(default)]
    pub searchable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub value_labels: BTreeMap<String, String>,
}

impl DimensionSpec {
    pub fn new(name: impl Into<String>, kind: DimensionKind) -> Self {
        DimensionSpec {
            name: name.into(),
            kind,
            selection: Selection::Multi,
            searchable: false,
            label: None,
            value_labels: BTreeMap::new(),
        }
    }

    pub fn category(name: impl Into<String>) -> Self {
        DimensionSpec::new(name, DimensionKind::Category)
    }

    pub fn date(name: impl Into<String>) -> Self {
        DimensionSpec::new(name, DimensionKind::Date)
    }

    pub fn number(name: impl Into<String>) -> Self {
        DimensionSpec::new(name, DimensionKind::Number)
    }

    /// Makes the dimension single-select.
    pub fn single(mut self) -> Self {
        self.selection = Selection::Single;
        self
    }

    /// Enables text search over the option list.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value_label(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.value_labels.insert(value.into(), label.into());
        self
    }

    /// The heading shown for this dimension; falls back to the name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// The label shown for one option value; falls back to the value.
    pub fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.value_labels
            .get(value)
            .map(String::as_str)
            .unwrap_or(value)
    }
}

impl From<&Dimension> for DimensionSpec {
    fn from(dimension: &Dimension) -> Self {
        DimensionSpec::new(dimension.name, dimension.kind)
    }
}

/// The set of dimensions a screen exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    dimensions: Vec<DimensionSpec>,
}

impl Schema {
    /// Creates a schema, rejecting duplicate dimension names.
    pub fn new(dimensions: Vec<DimensionSpec>) -> Result<Self> {
        for (i, dimension) in dimensions.iter().enumerate() {
            if dimensions[..i].iter().any(|d| d.name == dimension.name) {
                return Err(QueryError::DuplicateDimension(dimension.name.clone()));
            }
        }
        Ok(Schema { dimensions })
    }

    /// Schema with the default declaration of every dimension of `T`.
    pub fn for_record<T: Filterable>() -> Result<Self> {
        Schema::new(T::dimensions().iter().map(DimensionSpec::from).collect())
    }

    /// Replaces the declaration of an existing dimension, e.g. to add
    /// labels or make it single-select.
    pub fn with(mut self, spec: DimensionSpec) -> Result<Self> {
        match self.dimensions.iter_mut().find(|d| d.name == spec.name) {
            Some(existing) => {
                *existing = spec;
                Ok(self)
            }
            None => Err(QueryError::UnknownDimension(spec.name)),
        }
    }

    /// Looks up a dimension by name.
    pub fn get(&self, name: &str) -> Option<&DimensionSpec> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn dimensions(&self) -> &[DimensionSpec] {
        &self.dimensions
    }

    /// Names of the categorical dimensions, in declaration order.
    pub fn category_names(&self) -> Vec<&str> {
        self.dimensions
            .iter()
            .filter(|d| d.kind == DimensionKind::Category)
            .map(|d| d.name.as_str())
            .collect()
    }

    fn expect(&self, name: &str, kind: DimensionKind) -> Result<&DimensionSpec> {
        let spec = self
            .get(name)
            .ok_or_else(|| QueryError::UnknownDimension(name.to_string()))?;
        if spec.kind != kind {
            return Err(QueryError::KindMismatch {
                name: name.to_string(),
                expected: kind,
                actual: spec.kind,
            });
        }
        Ok(spec)
    }

    /// Checks that every dimension the query touches is declared with the
    /// matching kind, and that single-select dimensions hold one value.
    pub fn validate(&self, query: &QueryState) -> Result<()> {
        for (name, values) in query.filters() {
            let spec = self.expect(name, DimensionKind::Category)?;
            if spec.selection == Selection::Single && values.len() > 1 {
                return Err(QueryError::TooManyValues {
                    name: name.clone(),
                    count: values.len(),
                });
            }
        }
        for name in query.date_ranges().keys() {
            self.expect(name, DimensionKind::Date)?;
        }
        for name in query.numeric_ranges().keys() {
            self.expect(name, DimensionKind::Number)?;
        }
        for order in query.orderings() {
            if self.get(&order.field).is_none() {
                return Err(QueryError::UnknownDimension(order.field.clone()));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Binding operations
    // ========================================================================

    /// Selects a value. Single-select dimensions replace their selection.
    pub fn select(&self, query: QueryState, dimension: &str, value: &str) -> Result<QueryState> {
        let spec = self.expect(dimension, DimensionKind::Category)?;
        Ok(match spec.selection {
            Selection::Single => query.set_values(dimension, [value]),
            Selection::Multi => query.select(dimension, value),
        })
    }

    pub fn deselect(&self, query: QueryState, dimension: &str, value: &str) -> Result<QueryState> {
        self.expect(dimension, DimensionKind::Category)?;
        Ok(query.deselect(dimension, value))
    }

    pub fn toggle(&self, query: QueryState, dimension: &str, value: &str) -> Result<QueryState> {
        if query.is_selected(dimension, value) {
            self.deselect(query, dimension, value)
        } else {
            self.select(query, dimension, value)
        }
    }

    /// Replaces a dimension's selection.
    pub fn set_values<I, S>(&self, query: QueryState, dimension: &str, values: I) -> Result<QueryState>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expect(dimension, DimensionKind::Category)?;
        let query = query.set_values(dimension, values);
        self.validate(&query)?;
        Ok(query)
    }

    /// Removes every constraint on one dimension.
    pub fn clear(&self, query: QueryState, dimension: &str) -> Result<QueryState> {
        if self.get(dimension).is_none() {
            return Err(QueryError::UnknownDimension(dimension.to_string()));
        }
        Ok(query.clear(dimension))
    }

    /// Options of a searchable dimension whose value or label contains
    /// `needle`, case-insensitively.
    pub fn search_options(
        &self,
        options: &OptionSet,
        dimension: &str,
        needle: &str,
    ) -> Result<Vec<FacetOption>> {
        let spec = self.expect(dimension, DimensionKind::Category)?;
        if !spec.searchable {
            return Err(QueryError::NotSearchable(dimension.to_string()));
        }
        let needle = needle.to_lowercase();
        Ok(options
            .options_for(spec)
            .into_iter()
            .filter(|o| {
                needle.is_empty()
                    || o.value.to_lowercase().contains(&needle)
                    || o.label.to_lowercase().contains(&needle)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{DateRange, NumericRange};
    use chrono::NaiveDate;

    fn schema() -> Schema {
        Schema::new(vec![
            DimensionSpec::category("status").single(),
            DimensionSpec::category("client").searchable(),
            DimensionSpec::date("due"),
            DimensionSpec::number("amount"),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_dimensions_rejected() {
        let err = Schema::new(vec![
            DimensionSpec::category("status"),
            DimensionSpec::date("status"),
        ])
        .unwrap_err();
        assert_eq!(err, QueryError::DuplicateDimension("status".to_string()));
    }

    #[test]
    fn validate_accepts_declared_dimensions() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let query = QueryState::new()
            .select("status", "open")
            .select("client", "a")
            .select("client", "b")
            .date_range("due", DateRange::day(day))
            .numeric_range("amount", NumericRange::at_least(1.0))
            .order_desc("amount");
        assert_eq!(schema().validate(&query), Ok(()));
    }

    #[test]
    fn validate_rejects_unknown_dimension() {
        let query = QueryState::new().select("region", "north");
        assert_eq!(
            schema().validate(&query),
            Err(QueryError::UnknownDimension("region".to_string()))
        );

        let query = QueryState::new().order_asc("region");
        assert!(schema().validate(&query).is_err());
    }

    #[test]
    fn validate_rejects_kind_mismatch() {
        let query = QueryState::new().numeric_range("due", NumericRange::at_most(3.0));
        assert_eq!(
            schema().validate(&query),
            Err(QueryError::KindMismatch {
                name: "due".to_string(),
                expected: DimensionKind::Number,
                actual: DimensionKind::Date,
            })
        );
    }

    #[test]
    fn validate_rejects_multiple_values_on_single_select() {
        let query = QueryState::new()
            .select("status", "open")
            .select("status", "closed");
        assert_eq!(
            schema().validate(&query),
            Err(QueryError::TooManyValues {
                name: "status".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn single_select_replaces() {
        let schema = schema();
        let query = schema.select(QueryState::new(), "status", "open").unwrap();
        let query = schema.select(query, "status", "closed").unwrap();
        assert_eq!(query.selected("status"), ["closed"]);
    }

    #[test]
    fn multi_select_accumulates() {
        let schema = schema();
        let query = schema.select(QueryState::new(), "client", "a").unwrap();
        let query = schema.select(query, "client", "b").unwrap();
        let query = schema.select(query, "client", "a").unwrap();
        assert_eq!(query.selected("client"), ["a", "b"]);
    }

    #[test]
    fn toggle_and_clear() {
        let schema = schema();
        let query = schema.toggle(QueryState::new(), "client", "a").unwrap();
        let query = schema.select(query, "status", "open").unwrap();
        let query = schema.toggle(query, "client", "a").unwrap();
        assert!(query.selected("client").is_empty());

        let query = schema.clear(query, "status").unwrap();
        assert!(query.filters().is_empty());
        assert!(schema.clear(query, "region").is_err());
    }

    #[test]
    fn binding_rejects_wrong_kind() {
        assert!(schema().select(QueryState::new(), "amount", "5").is_err());
    }

    #[test]
    fn set_values_respects_single_select() {
        let err = schema()
            .set_values(QueryState::new(), "status", ["open", "closed"])
            .unwrap_err();
        assert!(matches!(err, QueryError::TooManyValues { .. }));
    }

    #[test]
    fn with_replaces_declaration() {
        let schema = schema()
            .with(DimensionSpec::category("client").label("Client"))
            .unwrap();
        assert_eq!(schema.get("client").unwrap().display_label(), "Client");
        assert!(schema.with(DimensionSpec::category("region")).is_err());
    }

    #[test]
    fn category_names_in_order() {
        assert_eq!(schema().category_names(), vec!["status", "client"]);
    }

    #[test]
    fn spec_serde_defaults() {
        let spec: DimensionSpec =
            serde_json::from_str(r#"{"name":"status","kind":"category"}"#).unwrap();
        assert_eq!(spec, DimensionSpec::category("status"));
    }
}
