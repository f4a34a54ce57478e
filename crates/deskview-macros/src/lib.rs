//! Proc macros for deskview.
//!
//! - [`Filterable`] - Generate query engine accessors from struct field
//!   annotations
//!
//! For working examples, see `deskview/tests/filterable_derive.rs`.

mod filterable;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Filterable` trait for record structs.
///
/// This macro generates an implementation of `deskview_query::Filterable`,
/// letting the query engine search, filter and count records of the type.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `category` | Categorical dimension; field type implements `FacetText` |
/// | `tags` | Categorical dimension over a list; items implement `FacetText` |
/// | `date` | Date dimension; field type implements `FacetDate` |
/// | `number` | Numeric dimension; any primitive number type |
/// | `search` | Include in free-text search (text and tag fields) |
/// | `skip` | Ignore this field |
/// | `rename = "..."` | Use a custom dimension name |
///
/// Wrapping a field in `Option` makes a missing value read as
/// `FieldValue::None`, which no active constraint matches.
///
/// # Generated Code
///
/// 1. Dimension name constants (e.g., `Ticket::STATUS`, `Ticket::OPENED`)
/// 2. `Filterable::facet_value()`, `search_terms()` and `dimensions()`
///
/// Declaring the same dimension name twice is a compile error.
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use deskview_macros::Filterable;
/// use deskview_query::{filter, Accessors, QueryState};
///
/// #[derive(Filterable)]
/// struct Ticket {
///     #[filter(search)]
///     subject: String,
///
///     #[filter(category)]
///     status: String,
///
///     #[filter(tags, search)]
///     labels: Vec<String>,
///
///     #[filter(date)]
///     opened: NaiveDate,
///
///     #[filter(number)]
///     priority: Option<u8>,
/// }
///
/// let query = QueryState::new()
///     .select(Ticket::STATUS, "open")
///     .with_search("printer");
///
/// let results = filter(&tickets, &Accessors::<Ticket>::of(), &query);
/// ```
#[proc_macro_derive(Filterable, attributes(filter))]
pub fn filterable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    filterable::filterable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
