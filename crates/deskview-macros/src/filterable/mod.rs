//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! Generates the record accessors and dimension name constants the query
//! engine reads records through, from `#[filter(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::filterable_derive_impl;
