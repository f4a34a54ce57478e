//! Runtime value types produced by field accessors.
//!
//! The [`FieldValue`] enum is what an accessor hands back for one dimension
//! of one record: a piece of text, a list of texts, a calendar date, a
//! number, or nothing at all.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::NaiveDate;

/// Value of one dimension of one record, borrowed from the record where
/// possible.
///
/// # Example
///
/// ```
/// use deskview_query::{FieldValue, Number};
///
/// struct Invoice {
///     number: String,
///     amount: f64,
///     tags: Vec<String>,
/// }
///
/// fn accessor<'a>(invoice: &'a Invoice, dimension: &str) -> FieldValue<'a> {
///     match dimension {
///         "number" => FieldValue::text(&invoice.number),
///         "amount" => FieldValue::Number(Number::from(invoice.amount)),
///         "tags" => FieldValue::list(invoice.tags.iter().map(String::as_str)),
///         _ => FieldValue::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Single text value (categorical dimensions).
    Text(Cow<'a, str>),
    /// Several text values; a record belongs to every listed category.
    List(Vec<Cow<'a, str>>),
    /// Calendar date (date-range dimensions).
    Date(NaiveDate),
    /// Numeric value (numeric-range dimensions).
    Number(Number),
    /// Field absent, empty, or not a dimension of this record type.
    None,
}

impl<'a> FieldValue<'a> {
    /// Borrowed text value.
    pub fn text(s: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(s))
    }

    /// List value from anything yielding strings.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, FieldValue::None)
    }

    /// Returns `true` if this is a `Text` or `List` value.
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldValue::Text(_) | FieldValue::List(_))
    }

    /// Extracts the text value, if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the date value, if present.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// All text values carried by this value, flattening lists.
    ///
    /// Non-text values yield an empty vector.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            FieldValue::Text(s) => vec![s.as_ref()],
            FieldValue::List(items) => items.iter().map(|s| s.as_ref()).collect(),
            _ => Vec::new(),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::text(s)
    }
}

impl From<String> for FieldValue<'_> {
    fn from(s: String) -> Self {
        FieldValue::Text(Cow::Owned(s))
    }
}

impl From<NaiveDate> for FieldValue<'_> {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

impl From<Number> for FieldValue<'_> {
    fn from(n: Number) -> Self {
        FieldValue::Number(n)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Integers keep their precision; comparisons between different variants
/// fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for a floating point NaN.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident, $target:ty; $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64, i64; i8, i16, i32, i64, isize);
number_from!(U64, u64; u8, u16, u32, u64, usize);
number_from!(F64, f64; f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_extractors() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        assert_eq!(FieldValue::text("open").as_text(), Some("open"));
        assert_eq!(FieldValue::Date(date).as_date(), Some(date));
        assert_eq!(
            FieldValue::Number(Number::I64(5)).as_number(),
            Some(Number::I64(5))
        );

        assert_eq!(FieldValue::text("open").as_number(), None);
        assert_eq!(FieldValue::Number(Number::I64(1)).as_text(), None);
        assert!(FieldValue::None.is_none());
    }

    #[test]
    fn texts_flattens_lists() {
        assert_eq!(FieldValue::text("a").texts(), vec!["a"]);
        assert_eq!(
            FieldValue::list(["a", "b"]).texts(),
            vec!["a", "b"]
        );
        assert!(FieldValue::Number(Number::I64(1)).texts().is_empty());
        assert!(FieldValue::None.texts().is_empty());
    }

    #[test]
    fn textual_check() {
        assert!(FieldValue::text("a").is_textual());
        assert!(FieldValue::list(Vec::<String>::new()).is_textual());
        assert!(!FieldValue::None.is_textual());
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::U64(10).compare(Number::F64(5.5)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn number_nan() {
        assert!(Number::F64(f64::NAN).is_nan());
        assert!(!Number::I64(0).is_nan());
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
        assert_eq!(Number::from(7usize), Number::U64(7));
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::I64(-3).to_string(), "-3");
        assert_eq!(Number::F64(2.5).to_string(), "2.5");
    }
}
