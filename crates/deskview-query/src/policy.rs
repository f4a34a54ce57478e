//! Screen-specific query rewrites.

use std::fmt::Debug;

use crate::query::QueryState;

/// Rewrites the query a screen evaluates, without touching the query the
/// user built.
///
/// Screens use this for rules the generic engine does not know about, such
/// as a status dropdown taking precedence over the filter panel. Overrides
/// run in the order they were installed, each seeing the previous output.
///
/// ```
/// use deskview_query::{QueryOverride, QueryState};
///
/// #[derive(Debug)]
/// struct OpenOnly;
///
/// impl QueryOverride for OpenOnly {
///     fn name(&self) -> &str {
///         "open-only"
///     }
///
///     fn apply(&self, query: QueryState) -> QueryState {
///         query.set_values("status", ["open"])
///     }
/// }
///
/// let effective = OpenOnly.apply(QueryState::new().select("status", "closed"));
/// assert_eq!(effective.selected("status"), ["open"]);
/// ```
pub trait QueryOverride: Debug {
    /// Identifies the override; installing another with the same name
    /// replaces it.
    fn name(&self) -> &str;

    /// Returns the query to evaluate in place of `query`.
    fn apply(&self, query: QueryState) -> QueryState;
}

/// Applies overrides in order.
pub fn apply_overrides(query: &QueryState, overrides: &[Box<dyn QueryOverride>]) -> QueryState {
    overrides
        .iter()
        .fold(query.clone(), |query, o| o.apply(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Force(&'static str, &'static str);

    impl QueryOverride for Force {
        fn name(&self) -> &str {
            self.0
        }

        fn apply(&self, query: QueryState) -> QueryState {
            query.set_values(self.0, [self.1])
        }
    }

    #[test]
    fn overrides_apply_in_order() {
        let overrides: Vec<Box<dyn QueryOverride>> = vec![
            Box::new(Force("status", "open")),
            Box::new(Force("status", "closed")),
        ];
        let query = QueryState::new().select("status", "pending");
        let effective = apply_overrides(&query, &overrides);

        assert_eq!(effective.selected("status"), ["closed"]);
        assert_eq!(query.selected("status"), ["pending"]);
    }

    #[test]
    fn no_overrides_is_identity() {
        let query = QueryState::new().with_search("x");
        assert_eq!(apply_overrides(&query, &[]), query);
    }
}
