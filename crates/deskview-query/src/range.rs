//! Date and numeric range constraints.
//!
//! Both range types are inclusive at both ends. An inverted range
//! (`from` after `to`, `min` above `max`) is legal and simply matches
//! nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value::Number;

/// Inclusive calendar-date range.
///
/// Without `from` the range imposes no constraint. With `from` but no `to`,
/// it covers the single day `from`.
///
/// ```
/// use chrono::NaiveDate;
/// use deskview_query::DateRange;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// let range = DateRange::day(day);
///
/// assert!(range.contains(day));
/// assert!(!range.contains(day.succ_opt().unwrap()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        DateRange {
            from: Some(date),
            to: None,
        }
    }

    /// A range covering `from..=to`.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Returns `true` if the range constrains anything (has a `from`).
    pub fn is_active(&self) -> bool {
        self.from.is_some()
    }

    /// Returns `true` if `from` is after `to`.
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    /// The effective last day, if the range is active.
    pub fn end(&self) -> Option<NaiveDate> {
        self.from.map(|from| self.to.unwrap_or(from))
    }

    /// Tests whether a date falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.from {
            None => true,
            Some(from) => {
                let to = self.to.unwrap_or(from);
                from <= date && date <= to
            }
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.from, self.end()) {
            (Some(from), Some(to)) if from == to => write!(f, "{}", from),
            (Some(from), Some(to)) => write!(f, "{}..{}", from, to),
            _ => write!(f, "any"),
        }
    }
}

/// Inclusive numeric range; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRange {
    /// Creates a range from optional bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        NumericRange { min, max }
    }

    /// A range covering `min..=max`.
    pub fn between(min: f64, max: f64) -> Self {
        NumericRange {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Values greater than or equal to `min`.
    pub fn at_least(min: f64) -> Self {
        NumericRange {
            min: Some(min),
            max: None,
        }
    }

    /// Values less than or equal to `max`.
    pub fn at_most(max: f64) -> Self {
        NumericRange {
            min: None,
            max: Some(max),
        }
    }

    /// Returns `true` if either bound is set.
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Returns `true` if `min` is above `max`.
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }

    /// Tests whether a number falls inside the range. NaN never does.
    pub fn contains(&self, value: Number) -> bool {
        if value.is_nan() {
            return false;
        }
        let above_min = self
            .min
            .map_or(true, |min| value.compare(Number::F64(min)).is_some_and(|o| o.is_ge()));
        let below_max = self
            .max
            .map_or(true, |max| value.compare(Number::F64(max)).is_some_and(|o| o.is_le()));
        above_min && below_max
    }
}

impl std::fmt::Display for NumericRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "{}..{}", min, max),
            (Some(min), None) => write!(f, ">= {}", min),
            (None, Some(max)) => write!(f, "<= {}", max),
            (None, None) => write!(f, "any"),
        }
    }
}
