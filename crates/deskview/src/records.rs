//! Dashboard record types.
//!
//! Each record derives [`Filterable`] so list screens can search, filter
//! and count it without per-screen glue code.

use chrono::NaiveDate;
use deskview_macros::Filterable;
use serde::{Deserialize, Serialize};

/// Declares a status-like enum that serializes in snake_case and reads as
/// the same text through [`FacetText`](deskview_query::FacetText).
macro_rules! facet_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::deskview_query::FacetText for $name {
            fn facet_text(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(self.as_str())
            }
        }
    };
}

facet_enum! {
    /// Urgency shared by work orders and tickets.
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

facet_enum! {
    pub enum WorkOrderStatus {
        Open => "open",
        Scheduled => "scheduled",
        InProgress => "in_progress",
        OnHold => "on_hold",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

facet_enum! {
    pub enum InvoiceStatus {
        Draft => "draft",
        Sent => "sent",
        Paid => "paid",
        Overdue => "overdue",
        Void => "void",
    }
}

facet_enum! {
    pub enum PaymentMethod {
        Card => "card",
        Ach => "ach",
        Check => "check",
        Wire => "wire",
        Cash => "cash",
    }
}

facet_enum! {
    pub enum ProjectStatus {
        Planning => "planning",
        Active => "active",
        OnHold => "on_hold",
        Completed => "completed",
    }
}

facet_enum! {
    pub enum BidStatus {
        Draft => "draft",
        Submitted => "submitted",
        Accepted => "accepted",
        Rejected => "rejected",
        Expired => "expired",
    }
}

facet_enum! {
    pub enum TicketStatus {
        New => "new",
        Open => "open",
        Pending => "pending",
        Resolved => "resolved",
        Closed => "closed",
    }
}

/// A maintenance or installation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Filterable)]
pub struct WorkOrder {
    #[filter(search)]
    pub id: String,
    #[filter(search)]
    pub title: String,
    #[filter(category, search)]
    pub client: String,
    #[filter(category)]
    pub status: WorkOrderStatus,
    #[filter(category)]
    pub priority: Priority,
    #[filter(category)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[filter(tags)]
    #[serde(default)]
    pub trades: Vec<String>,
    #[filter(date)]
    pub scheduled: NaiveDate,
    #[filter(date)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[filter(number)]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Filterable)]
pub struct Invoice {
    #[filter(search)]
    pub number: String,
    #[filter(category, search)]
    pub client: String,
    #[filter(category)]
    pub status: InvoiceStatus,
    #[filter(date)]
    pub issued: NaiveDate,
    #[filter(date)]
    pub due: NaiveDate,
    #[filter(number)]
    pub amount: f64,
    #[filter(number)]
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Filterable)]
pub struct Payment {
    #[filter(search)]
    pub reference: String,
    #[filter(search)]
    pub invoice: String,
    #[filter(category, search)]
    pub client: String,
    #[filter(category)]
    pub method: PaymentMethod,
    #[filter(date)]
    pub received: NaiveDate,
    #[filter(number)]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Filterable)]
pub struct Project {
    #[filter(search)]
    pub code: String,
    #[filter(search)]
    pub name: String,
    #[filter(category, search)]
    pub client: String,
    #[filter(category)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[filter(category)]
    pub status: ProjectStatus,
    #[filter(date)]
    pub start: NaiveDate,
    #[filter(date)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[filter(number)]
    pub budget: f64,
    /// Percent complete, 0 to 100.
    #[filter(number)]
    pub progress: u8,
}

/// A vendor's offer on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Filterable)]
pub struct Bid {
    #[filter(search)]
    pub id: String,
    #[filter(category, search)]
    pub project: String,
    #[filter(category, search)]
    pub vendor: String,
    #[filter(category)]
    pub status: BidStatus,
    #[filter(date)]
    pub submitted: NaiveDate,
    #[filter(date)]
    pub expires: NaiveDate,
    #[filter(number)]
    pub amount: f64,
}

/// A help desk request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Filterable)]
pub struct Ticket {
    #[filter(search)]
    pub id: String,
    #[filter(search)]
    pub subject: String,
    #[filter(search)]
    pub requester: String,
    #[filter(category)]
    pub status: TicketStatus,
    #[filter(category)]
    pub priority: Priority,
    #[filter(category)]
    pub topic: String,
    #[filter(category)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[filter(tags, search)]
    #[serde(default)]
    pub labels: Vec<String>,
    #[filter(date)]
    pub opened: NaiveDate,
}
