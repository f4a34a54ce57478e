//! Ordering types for sorting filtered results.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for field-based ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::accessor::Accessors;
use crate::value::FieldValue;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sort key: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The dimension to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }

    /// Ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Asc)
    }

    /// Descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy::new(field, Dir::Desc)
    }

    /// Compares two values according to this ordering.
    ///
    /// Missing values sort last in either direction. Returns `None` if the
    /// values cannot be compared (type mismatch or NaN).
    pub fn compare(&self, a: &FieldValue<'_>, b: &FieldValue<'_>) -> Option<Ordering> {
        match (a.is_none(), b.is_none()) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Greater),
            (false, true) => Some(Ordering::Less),
            (false, false) => compare_values(a, b).map(|o| self.dir.apply(o)),
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.dir)
    }
}

/// Compares two values of the same kind.
///
/// Returns `None` if the kinds differ or comparison is not possible (NaN).
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Option<Ordering> {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
        (FieldValue::List(a), FieldValue::List(b)) => Some(a.cmp(b)),
        (FieldValue::Number(a), FieldValue::Number(b)) => a.compare(*b),
        (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),

        (FieldValue::None, FieldValue::None) => Some(Ordering::Equal),
        (FieldValue::None, _) => Some(Ordering::Greater),
        (_, FieldValue::None) => Some(Ordering::Less),

        _ => None,
    }
}

/// Compares two records using a list of sort keys.
///
/// The first key is the primary sort key, the second breaks ties, and so
/// on. Incomparable values are treated as equal.
pub fn compare_by_orderings<T>(
    a: &T,
    b: &T,
    orderings: &[OrderBy],
    accessors: &Accessors<T>,
) -> Ordering {
    for order_by in orderings {
        let val_a = accessors.value(a, &order_by.field);
        let val_b = accessors.value(b, &order_by.field);

        if let Some(ordering) = order_by.compare(&val_a, &val_b) {
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
    }
    Ordering::Equal
}
