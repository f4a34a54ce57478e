//! Result types for list screens.
//!
//! A screen handler evaluates its query and hands back a [`ListViewResult`]:
//! the visible page of records plus everything needed to render around it
//! (page position, counts, facet options and status messages). The output
//! layer serializes it as-is or renders it as a text table.

mod list_view;
mod message;

pub use list_view::{list_view, ListViewBuilder, ListViewResult, PageInfo};
pub use message::{Message, MessageLevel};
