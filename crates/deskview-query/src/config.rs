//! Per-screen configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pagination::{PageState, DEFAULT_ITEMS_PER_PAGE};
use crate::schema::DimensionSpec;

/// Settings a screen starts from and returns to on reset.
///
/// All fields have defaults, so a config file only needs to name what it
/// changes:
///
/// ```
/// use deskview_query::ScreenConfig;
///
/// let config: ScreenConfig = serde_json::from_str(r#"{"items_per_page": 5}"#).unwrap();
/// assert_eq!(config.items_per_page, 5);
/// assert_eq!(config.initial_page, 0);
/// assert_eq!(config.search_debounce_ms, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub items_per_page: usize,
    pub initial_page: usize,
    pub search_debounce_ms: u64,
    /// Declarations that replace the record type's defaults, e.g. to add
    /// labels or make a dimension single-select.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<DimensionSpec>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            initial_page: 0,
            search_debounce_ms: 300,
            dimensions: Vec::new(),
        }
    }
}

impl ScreenConfig {
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.search_debounce_ms = ms;
        self
    }

    pub fn with_dimension(mut self, spec: DimensionSpec) -> Self {
        self.dimensions.push(spec);
        self
    }

    /// The pagination state a screen starts in.
    pub fn page_state(&self) -> Result<PageState> {
        PageState::new(self.initial_page, self.items_per_page)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    #[test]
    fn defaults() {
        let config = ScreenConfig::default();
        assert_eq!(config.page_state().unwrap(), PageState::new(0, 10).unwrap());
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn zero_page_size_is_a_config_error() {
        let config = ScreenConfig::default().with_items_per_page(0);
        assert_eq!(config.page_state(), Err(QueryError::InvalidPageSize));
    }
}
