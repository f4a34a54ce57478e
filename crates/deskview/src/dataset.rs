//! Loading dashboard records and configuration from disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::records::{Bid, Invoice, Payment, Project, Ticket, WorkOrder};
use crate::screens::ScreenKind;

/// Errors raised while reading a dataset or a config file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

fn read(path: &Path) -> Result<String, DataError> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Every record collection the dashboard shows. Missing arrays are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub work_orders: Vec<WorkOrder>,
    pub invoices: Vec<Invoice>,
    pub payments: Vec<Payment>,
    pub projects: Vec<Project>,
    pub bids: Vec<Bid>,
    pub tickets: Vec<Ticket>,
}

impl Dataset {
    pub fn from_json(text: &str, path: &Path) -> Result<Self, DataError> {
        serde_json::from_str(text).map_err(|source| DataError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        let dataset = Self::from_json(&read(path)?, path)?;
        debug!(
            path = %path.display(),
            work_orders = dataset.work_orders.len(),
            invoices = dataset.invoices.len(),
            payments = dataset.payments.len(),
            projects = dataset.projects.len(),
            bids = dataset.bids.len(),
            tickets = dataset.tickets.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Number of records behind a screen.
    pub fn len_of(&self, screen: ScreenKind) -> usize {
        match screen {
            ScreenKind::WorkOrders => self.work_orders.len(),
            ScreenKind::Invoices => self.invoices.len(),
            ScreenKind::Payments => self.payments.len(),
            ScreenKind::Projects => self.projects.len(),
            ScreenKind::Bids => self.bids.len(),
            ScreenKind::HelpDesk => self.tickets.len(),
        }
    }
}

/// Per-screen settings a config file may override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenSettings {
    pub items_per_page: Option<usize>,
    pub search_debounce_ms: Option<u64>,
}

/// Dashboard configuration file.
///
/// ```yaml
/// screens:
///   work-orders:
///     items_per_page: 25
///   help-desk:
///     search_debounce_ms: 150
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeskConfig {
    pub screens: BTreeMap<ScreenKind, ScreenSettings>,
}

impl DeskConfig {
    pub fn from_yaml(text: &str, path: &Path) -> Result<Self, DataError> {
        serde_yaml::from_str(text).map_err(|source| DataError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, DataError> {
        Self::from_yaml(&read(path)?, path)
    }

    pub fn settings(&self, screen: ScreenKind) -> ScreenSettings {
        self.screens.get(&screen).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collections_default_to_empty() {
        let dataset = Dataset::from_json(r#"{ "invoices": [] }"#, Path::new("x.json")).unwrap();
        assert_eq!(dataset, Dataset::default());
        assert_eq!(dataset.len_of(ScreenKind::HelpDesk), 0);
    }

    #[test]
    fn bad_json_names_the_file() {
        let err = Dataset::from_json("{", Path::new("rows.json")).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
        assert!(err.to_string().starts_with("invalid dataset rows.json"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Dataset::load(Path::new("/nonexistent/deskview.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn config_overrides_per_screen() {
        let yaml = "screens:\n  work-orders:\n    items_per_page: 25\n  bids:\n    search_debounce_ms: 50\n";
        let config = DeskConfig::from_yaml(yaml, Path::new("desk.yaml")).unwrap();

        assert_eq!(config.settings(ScreenKind::WorkOrders).items_per_page, Some(25));
        assert_eq!(config.settings(ScreenKind::Bids).search_debounce_ms, Some(50));
        assert_eq!(config.settings(ScreenKind::Invoices), ScreenSettings::default());
    }

    #[test]
    fn config_rejects_unknown_keys() {
        let yaml = "screens:\n  invoices:\n    page_size: 3\n";
        assert!(DeskConfig::from_yaml(yaml, Path::new("desk.yaml")).is_err());
    }
}
