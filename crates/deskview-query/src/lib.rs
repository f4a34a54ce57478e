//! Client-side query engine for list screens over in-memory records.
//!
//! A dashboard screen holds a collection of records and lets the user narrow
//! it down with a free-text search, multi-value categorical filters, date
//! ranges and numeric ranges, then pages through the result. This crate
//! provides the pieces for that, leaf first:
//!
//! - [`Accessors`]: how the engine reads a record (plain function pointers,
//!   or derived from [`Filterable`])
//! - [`QueryState`]: the declarative, immutable query
//! - [`filter()`]: the pure filter engine
//! - [`aggregate`]: distinct option values and counts for filter widgets
//! - [`PageState`] / [`Paginator`]: pagination with the clamp rule
//! - [`Schema`]: dimension declarations and selection rules
//! - [`Screen`]: all of the above bound together, with memoization and
//!   search debouncing
//!
//! # Quick Start
//!
//! ```rust
//! use std::borrow::Cow;
//! use deskview_query::{filter, Accessors, FieldValue, Number, NumericRange, QueryState};
//!
//! struct WorkOrder {
//!     code: String,
//!     status: String,
//!     amount: f64,
//! }
//!
//! fn field<'a>(wo: &'a WorkOrder, dimension: &str) -> FieldValue<'a> {
//!     match dimension {
//!         "status" => FieldValue::text(&wo.status),
//!         "amount" => FieldValue::Number(Number::F64(wo.amount)),
//!         _ => FieldValue::None,
//!     }
//! }
//!
//! fn search(wo: &WorkOrder) -> Vec<Cow<'_, str>> {
//!     vec![Cow::Borrowed(wo.code.as_str())]
//! }
//!
//! let orders = vec![
//!     WorkOrder { code: "WO-001".into(), status: "open".into(), amount: 450.0 },
//!     WorkOrder { code: "WO-002".into(), status: "closed".into(), amount: 800.0 },
//!     WorkOrder { code: "WO-003".into(), status: "open".into(), amount: 1200.0 },
//! ];
//!
//! let query = QueryState::new()
//!     .with_search("wo")
//!     .select("status", "open")
//!     .numeric_range("amount", NumericRange::between(400.0, 1000.0));
//!
//! let results = filter(&orders, &Accessors::new(field, search), &query);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].code, "WO-001");
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! match = search (any search term contains the text, case-insensitive)
//!       ∧ for every categorical dimension: value ∩ selection ≠ ∅
//!       ∧ for every date range: from <= date <= (to or from)
//!       ∧ for every numeric range: min <= n <= max
//! ```
//!
//! - Selected values of one dimension are OR-ed; dimensions are AND-ed.
//! - An empty selection, empty search or unbounded range constrains nothing.
//! - Inverted ranges match nothing; they are not errors.
//! - A record without a value for a constrained dimension does not match.
//!
//! # Dimension Kinds
//!
//! | Kind | Accessor value | Constraint | Options |
//! |------|----------------|------------|---------|
//! | Category | `Text` or `List` | selected values | counted |
//! | Date | `Date` | [`DateRange`] | no |
//! | Number | `Number` | [`NumericRange`] | no |

mod accessor;
mod config;
mod debounce;
mod error;
mod filter;
mod memo;
mod options;
mod ordering;
mod pagination;
mod policy;
mod query;
mod range;
mod schema;
mod screen;
mod store;
mod traits;
mod value;

// Re-export public API
pub use accessor::{Accessors, FieldFn, SearchFn};
pub use config::ScreenConfig;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use error::{QueryError, Result};
pub use filter::{
    count, filter, filter_cloned, filter_indices, filter_staged, matches, matches_categories,
    matches_dates, matches_numbers, matches_search, Stage,
};
pub use memo::Memo;
pub use options::{aggregate, aggregate_dependent, FacetOption, OptionSet};
pub use ordering::{compare_by_orderings, compare_values, Dir, OrderBy};
pub use pagination::{paginate, Page, PageState, Paginator, DEFAULT_ITEMS_PER_PAGE};
pub use policy::{apply_overrides, QueryOverride};
pub use query::QueryState;
pub use range::{DateRange, NumericRange};
pub use schema::{Dimension, DimensionKind, DimensionSpec, Schema, Selection};
pub use screen::{CacheStats, FacetGroup, Screen, ScreenView};
pub use store::{RecordStore, StoreKey};
pub use traits::{FacetDate, FacetText, Filterable};
pub use value::{FieldValue, Number};

// Re-export chrono's date type for derive-generated code and callers.
pub use chrono::NaiveDate;
