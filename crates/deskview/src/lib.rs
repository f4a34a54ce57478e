//! # deskview
//!
//! List screens for a facilities management dashboard: work orders,
//! invoices, payments, projects, bids and help desk tickets, each
//! searchable, filterable and paginated through
//! [`deskview_query`].
//!
//! Records derive [`Filterable`] to declare their dimensions:
//!
//! ```rust
//! use deskview::{Filterable, QueryState, RecordStore, Screen, ScreenConfig};
//!
//! #[derive(Filterable)]
//! struct Visit {
//!     #[filter(search)]
//!     site: String,
//!     #[filter(category)]
//!     crew: String,
//!     #[filter(number)]
//!     hours: f64,
//! }
//!
//! let store = RecordStore::new(vec![
//!     Visit { site: "North yard".into(), crew: "A".into(), hours: 3.5 },
//!     Visit { site: "South yard".into(), crew: "B".into(), hours: 6.0 },
//! ]);
//!
//! let mut screen = Screen::<Visit>::for_record(ScreenConfig::default()).unwrap();
//! screen.set_query(QueryState::new().with_search("north")).unwrap();
//! let view = screen.evaluate(&store).unwrap();
//!
//! assert_eq!(view.total_matched(), 1);
//! assert_eq!(Visit::CREW, "crew");
//! ```
//!
//! The `deskview` binary loads a JSON [`Dataset`](dataset::Dataset) and
//! prints one page of one screen; see [`cli`].

pub mod cli;
pub mod dataset;
pub mod output;
pub mod records;
pub mod screens;
pub mod serialize;
pub mod table;
pub mod views;

pub use deskview_macros::Filterable;
pub use deskview_query::*;
