//! The dashboard's list screens and their query policies.

use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use deskview_query::{DateRange, DimensionSpec, QueryOverride, QueryState, ScreenConfig};
use serde::{Deserialize, Serialize};

use crate::dataset::ScreenSettings;

/// One list screen of the dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenKind {
    WorkOrders,
    Invoices,
    Payments,
    Projects,
    Bids,
    HelpDesk,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 6] = [
        ScreenKind::WorkOrders,
        ScreenKind::Invoices,
        ScreenKind::Payments,
        ScreenKind::Projects,
        ScreenKind::Bids,
        ScreenKind::HelpDesk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenKind::WorkOrders => "work-orders",
            ScreenKind::Invoices => "invoices",
            ScreenKind::Payments => "payments",
            ScreenKind::Projects => "projects",
            ScreenKind::Bids => "bids",
            ScreenKind::HelpDesk => "help-desk",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScreenKind::WorkOrders => "Work Orders",
            ScreenKind::Invoices => "Invoices",
            ScreenKind::Payments => "Payments",
            ScreenKind::Projects => "Projects",
            ScreenKind::Bids => "Bids",
            ScreenKind::HelpDesk => "Help Desk",
        }
    }

    /// The dimension driven by the screen's status dropdown.
    pub fn status_dimension(&self) -> Option<&'static str> {
        match self {
            ScreenKind::Payments => None,
            _ => Some("status"),
        }
    }

    /// The date dimension an "ending soon" shortcut restricts.
    pub fn ending_dimension(&self) -> Option<&'static str> {
        match self {
            ScreenKind::WorkOrders | ScreenKind::Invoices => Some("due"),
            ScreenKind::Projects => Some("end"),
            ScreenKind::Bids => Some("expires"),
            ScreenKind::Payments | ScreenKind::HelpDesk => None,
        }
    }

    /// Built-in configuration: page size and dimension labels.
    pub fn default_config(&self) -> ScreenConfig {
        match self {
            ScreenKind::WorkOrders => ScreenConfig::default()
                .with_dimension(DimensionSpec::category("client").label("Client").searchable())
                .with_dimension(
                    DimensionSpec::category("status")
                        .label("Status")
                        .value_label("in_progress", "In progress")
                        .value_label("on_hold", "On hold"),
                )
                .with_dimension(DimensionSpec::category("priority").label("Priority"))
                .with_dimension(
                    DimensionSpec::category("technician")
                        .label("Technician")
                        .searchable(),
                )
                .with_dimension(DimensionSpec::category("trades").label("Trades"))
                .with_dimension(DimensionSpec::date("due").label("Due date")),
            ScreenKind::Invoices => ScreenConfig::default()
                .with_dimension(DimensionSpec::category("client").label("Client").searchable())
                .with_dimension(DimensionSpec::category("status").label("Status"))
                .with_dimension(DimensionSpec::date("due").label("Due date")),
            ScreenKind::Payments => ScreenConfig::default()
                .with_dimension(DimensionSpec::category("client").label("Client").searchable())
                .with_dimension(
                    DimensionSpec::category("method")
                        .label("Method")
                        .value_label("ach", "ACH"),
                ),
            ScreenKind::Projects => ScreenConfig::default()
                .with_dimension(DimensionSpec::category("client").label("Client").searchable())
                .with_dimension(DimensionSpec::category("manager").label("Manager").searchable())
                .with_dimension(
                    DimensionSpec::category("status")
                        .label("Status")
                        .value_label("on_hold", "On hold"),
                )
                .with_dimension(DimensionSpec::date("end").label("End date")),
            ScreenKind::Bids => ScreenConfig::default()
                .with_items_per_page(5)
                .with_dimension(DimensionSpec::category("project").label("Project").searchable())
                .with_dimension(DimensionSpec::category("vendor").label("Vendor").searchable())
                .with_dimension(DimensionSpec::category("status").label("Status"))
                .with_dimension(DimensionSpec::date("expires").label("Expires")),
            ScreenKind::HelpDesk => ScreenConfig::default()
                .with_items_per_page(5)
                .with_dimension(DimensionSpec::category("status").label("Status").single())
                .with_dimension(DimensionSpec::category("priority").label("Priority"))
                .with_dimension(DimensionSpec::category("topic").label("Topic"))
                .with_dimension(
                    DimensionSpec::category("assignee")
                        .label("Assignee")
                        .searchable(),
                )
                .with_dimension(DimensionSpec::category("labels").label("Labels")),
        }
    }

    /// The built-in configuration with a config file's settings applied.
    pub fn config(&self, settings: &ScreenSettings) -> ScreenConfig {
        let mut config = self.default_config();
        if let Some(items_per_page) = settings.items_per_page {
            config = config.with_items_per_page(items_per_page);
        }
        if let Some(ms) = settings.search_debounce_ms {
            config = config.with_debounce_ms(ms);
        }
        config
    }
}

impl std::fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a status dropdown that leaves the filter panel in charge.
pub const ALL_STATUSES: &str = "all";

/// A status dropdown that takes precedence over the filter panel.
///
/// Any value other than [`ALL_STATUSES`] replaces whatever the panel
/// selected on the same dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownPrecedence {
    pub dimension: String,
    pub value: String,
}

impl DropdownPrecedence {
    pub fn new(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        DropdownPrecedence {
            dimension: dimension.into(),
            value: value.into(),
        }
    }
}

impl QueryOverride for DropdownPrecedence {
    fn name(&self) -> &str {
        "dropdown-precedence"
    }

    fn apply(&self, query: QueryState) -> QueryState {
        if self.value == ALL_STATUSES {
            query
        } else {
            query.set_values(&self.dimension, [self.value.as_str()])
        }
    }
}

/// Restricts a date dimension to `[today, today + days]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndingSoon {
    pub dimension: String,
    pub today: NaiveDate,
    pub days: u64,
}

impl EndingSoon {
    pub fn new(dimension: impl Into<String>, today: NaiveDate, days: u64) -> Self {
        EndingSoon {
            dimension: dimension.into(),
            today,
            days,
        }
    }

    pub fn range(&self) -> DateRange {
        let until = self
            .today
            .checked_add_days(Days::new(self.days))
            .unwrap_or(NaiveDate::MAX);
        DateRange::between(self.today, until)
    }
}

impl QueryOverride for EndingSoon {
    fn name(&self) -> &str {
        "ending-soon"
    }

    fn apply(&self, query: QueryState) -> QueryState {
        query.date_range(&self.dimension, self.range())
    }
}
