//! Field accessors: how the engine reads records without knowing their shape.

use std::borrow::Cow;
use std::fmt;

use crate::traits::Filterable;
use crate::value::FieldValue;

/// Reads the value of a named dimension from a record.
pub type FieldFn<T> = for<'a> fn(&'a T, &str) -> FieldValue<'a>;

/// Returns the strings the free-text search looks into.
pub type SearchFn<T> = for<'a> fn(&'a T) -> Vec<Cow<'a, str>>;

/// The pair of pure functions through which the engine reads records.
///
/// Accessors are plain function pointers: they carry no state, are `Copy`,
/// and stay the same for the life of a screen.
///
/// ```
/// use std::borrow::Cow;
/// use deskview_query::{Accessors, FieldValue};
///
/// struct Payment {
///     reference: String,
///     method: String,
/// }
///
/// fn field<'a>(p: &'a Payment, dimension: &str) -> FieldValue<'a> {
///     match dimension {
///         "method" => FieldValue::text(&p.method),
///         _ => FieldValue::None,
///     }
/// }
///
/// fn search(p: &Payment) -> Vec<Cow<'_, str>> {
///     vec![Cow::Borrowed(p.reference.as_str())]
/// }
///
/// let accessors = Accessors::new(field, search);
/// let payment = Payment { reference: "PAY-1".into(), method: "card".into() };
/// assert_eq!(accessors.value(&payment, "method"), FieldValue::text("card"));
/// ```
pub struct Accessors<T> {
    field: FieldFn<T>,
    search: SearchFn<T>,
}

impl<T> Accessors<T> {
    /// Creates accessors from a field function and a search function.
    pub fn new(field: FieldFn<T>, search: SearchFn<T>) -> Self {
        Accessors { field, search }
    }

    /// Creates accessors for a record type that has no searchable text.
    pub fn fields_only(field: FieldFn<T>) -> Self {
        Accessors {
            field,
            search: no_search_terms::<T>,
        }
    }

    /// Reads one dimension of a record.
    pub fn value<'a>(&self, record: &'a T, dimension: &str) -> FieldValue<'a> {
        (self.field)(record, dimension)
    }

    /// Reads the searchable strings of a record.
    pub fn search_terms<'a>(&self, record: &'a T) -> Vec<Cow<'a, str>> {
        (self.search)(record)
    }
}

impl<T: Filterable> Accessors<T> {
    /// Accessors backed by the record type's [`Filterable`] implementation.
    pub fn of() -> Self {
        Accessors::new(T::accessor, T::search_accessor)
    }
}

impl<T> Clone for Accessors<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Accessors<T> {}

impl<T> fmt::Debug for Accessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessors").finish_non_exhaustive()
    }
}

fn no_search_terms<T>(_record: &T) -> Vec<Cow<'_, str>> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    struct Bid {
        vendor: String,
        amount: u32,
    }

    fn field<'a>(bid: &'a Bid, dimension: &str) -> FieldValue<'a> {
        match dimension {
            "vendor" => FieldValue::text(&bid.vendor),
            "amount" => FieldValue::Number(Number::from(bid.amount)),
            _ => FieldValue::None,
        }
    }

    fn search(bid: &Bid) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(bid.vendor.as_str())]
    }

    #[test]
    fn reads_through_function_pointers() {
        let bid = Bid {
            vendor: "Acme".to_string(),
            amount: 900,
        };
        let accessors = Accessors::new(field, search);

        assert_eq!(accessors.value(&bid, "vendor"), FieldValue::text("Acme"));
        assert_eq!(
            accessors.value(&bid, "amount"),
            FieldValue::Number(Number::U64(900))
        );
        assert_eq!(accessors.value(&bid, "missing"), FieldValue::None);
        assert_eq!(accessors.search_terms(&bid), vec!["Acme"]);
    }

    #[test]
    fn fields_only_has_no_search_terms() {
        let bid = Bid {
            vendor: "Acme".to_string(),
            amount: 1,
        };
        let accessors = Accessors::fields_only(field);
        assert!(accessors.search_terms(&bid).is_empty());
    }

    #[test]
    fn accessors_are_copy() {
        let accessors = Accessors::new(field, search);
        let copy = accessors;
        let bid = Bid {
            vendor: "Acme".to_string(),
            amount: 1,
        };
        assert_eq!(copy.value(&bid, "vendor"), accessors.value(&bid, "vendor"));
    }
}
