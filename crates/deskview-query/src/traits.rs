//! Traits for derive macro support.
//!
//! [`Filterable`] is implemented by `#[derive(Filterable)]` from
//! `deskview-macros`; [`FacetText`] and [`FacetDate`] let the derive turn
//! domain field types into [`FieldValue`]s.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

use crate::schema::Dimension;
use crate::value::FieldValue;

/// Types whose records can be searched, filtered and counted.
///
/// Usually derived, but can be implemented by hand:
///
/// ```
/// use std::borrow::Cow;
/// use deskview_query::{Dimension, DimensionKind, FieldValue, Filterable};
///
/// struct Ticket {
///     subject: String,
///     status: String,
/// }
///
/// impl Filterable for Ticket {
///     fn facet_value(&self, dimension: &str) -> FieldValue<'_> {
///         match dimension {
///             "status" => FieldValue::text(&self.status),
///             _ => FieldValue::None,
///         }
///     }
///
///     fn search_terms(&self) -> Vec<Cow<'_, str>> {
///         vec![Cow::Borrowed(self.subject.as_str())]
///     }
///
///     fn dimensions() -> &'static [Dimension] {
///         &[Dimension {
///             name: "status",
///             kind: DimensionKind::Category,
///         }]
///     }
/// }
/// ```
pub trait Filterable {
    /// Returns the value of a dimension for this record, or
    /// [`FieldValue::None`] if the record has no such dimension.
    fn facet_value(&self, dimension: &str) -> FieldValue<'_>;

    /// Strings the free-text search looks into.
    fn search_terms(&self) -> Vec<Cow<'_, str>> {
        Vec::new()
    }

    /// Dimensions this record type exposes.
    fn dimensions() -> &'static [Dimension]
    where
        Self: Sized,
    {
        &[]
    }

    /// Field accessor suitable for [`Accessors::new`](crate::Accessors::new).
    fn accessor<'a>(item: &'a Self, dimension: &str) -> FieldValue<'a>
    where
        Self: Sized,
    {
        item.facet_value(dimension)
    }

    /// Search accessor suitable for [`Accessors::new`](crate::Accessors::new).
    fn search_accessor(item: &Self) -> Vec<Cow<'_, str>>
    where
        Self: Sized,
    {
        item.search_terms()
    }
}

/// Conversion of a field into the text used for categorical matching and
/// search.
///
/// Implement it for status enums so they can be marked as category fields:
///
/// ```
/// use std::borrow::Cow;
/// use deskview_query::FacetText;
///
/// enum Priority {
///     Low,
///     High,
/// }
///
/// impl FacetText for Priority {
///     fn facet_text(&self) -> Cow<'_, str> {
///         Cow::Borrowed(match self {
///             Priority::Low => "low",
///             Priority::High => "high",
///         })
///     }
/// }
/// ```
pub trait FacetText {
    /// The text for this value.
    fn facet_text(&self) -> Cow<'_, str>;
}

impl FacetText for str {
    fn facet_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl FacetText for String {
    fn facet_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: FacetText + ?Sized> FacetText for &T {
    fn facet_text(&self) -> Cow<'_, str> {
        (**self).facet_text()
    }
}

/// Conversion of a field into the calendar date used by date-range filters.
pub trait FacetDate {
    /// The calendar date for this value.
    fn facet_date(&self) -> NaiveDate;
}

impl FacetDate for NaiveDate {
    fn facet_date(&self) -> NaiveDate {
        *self
    }
}

impl FacetDate for NaiveDateTime {
    fn facet_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> FacetDate for DateTime<Tz> {
    fn facet_date(&self) -> NaiveDate {
        self.date_naive()
    }
}
