//! Tests for `#[derive(Filterable)]`.

use chrono::NaiveDate;
use deskview::{
    aggregate, filter, Accessors, DateRange, DimensionKind, FieldValue, Filterable, Number,
    NumericRange, QueryState,
};

#[derive(Debug, Clone, Filterable)]
struct Ticket {
    #[filter(search)]
    subject: String,

    #[filter(category, rename = "state")]
    status: String,

    #[filter(tags, search)]
    labels: Vec<String>,

    #[filter(date)]
    opened: NaiveDate,

    #[filter(number)]
    priority: Option<u8>,

    #[filter(skip)]
    #[allow(dead_code)]
    internal_note: String,

    #[allow(dead_code)]
    plain: u32,
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn ticket(subject: &str, status: &str, labels: &[&str], opened: &str, priority: Option<u8>) -> Ticket {
    Ticket {
        subject: subject.to_string(),
        status: status.to_string(),
        labels: labels.iter().map(|l| l.to_string()).collect(),
        opened: date(opened),
        priority,
        internal_note: String::new(),
        plain: 0,
    }
}

fn tickets() -> Vec<Ticket> {
    vec![
        ticket("Printer jammed", "open", &["hardware", "floor-2"], "2024-01-05", Some(2)),
        ticket("VPN drops", "open", &["network"], "2024-01-12", None),
        ticket("New laptop", "closed", &["hardware"], "2024-01-20", Some(1)),
    ]
}

#[test]
fn test_dimension_constants_and_kinds() {
    assert_eq!(Ticket::STATE, "state");
    assert_eq!(Ticket::LABELS, "labels");
    assert_eq!(Ticket::OPENED, "opened");

    let dims: Vec<(&str, DimensionKind)> =
        Ticket::dimensions().iter().map(|d| (d.name, d.kind)).collect();
    assert_eq!(
        dims,
        vec![
            ("state", DimensionKind::Category),
            ("labels", DimensionKind::Category),
            ("opened", DimensionKind::Date),
            ("priority", DimensionKind::Number),
        ]
    );
}

#[test]
fn test_renamed_field_is_read_under_new_name() {
    let t = &tickets()[0];
    assert_eq!(t.facet_value("state"), FieldValue::text("open"));
    assert_eq!(t.facet_value("status"), FieldValue::None);
}

#[test]
fn test_skipped_and_unannotated_fields_are_not_dimensions() {
    let t = &tickets()[0];
    assert_eq!(t.facet_value("internal_note"), FieldValue::None);
    assert_eq!(t.facet_value("plain"), FieldValue::None);
}

#[test]
fn test_optional_number() {
    let all = tickets();
    assert_eq!(all[0].facet_value("priority"), FieldValue::Number(Number::U64(2)));
    assert_eq!(all[1].facet_value("priority"), FieldValue::None);
}

#[test]
fn test_search_includes_tags() {
    let all = tickets();
    assert_eq!(all[0].search_terms(), vec!["Printer jammed", "hardware", "floor-2"]);

    let query = QueryState::new().with_search("NETWORK");
    let found = filter(&all, &Accessors::of(), &query);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].subject, "VPN drops");
}

#[test]
fn test_filter_with_derived_accessors() {
    let all = tickets();
    let query = QueryState::new()
        .select(Ticket::STATE, "open")
        .select(Ticket::LABELS, "hardware")
        .date_range(Ticket::OPENED, DateRange::between(date("2024-01-01"), date("2024-01-31")));
    let found = filter(&all, &Accessors::of(), &query);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].subject, "Printer jammed");

    // A record without a priority never matches a priority range.
    let query = QueryState::new().numeric_range("priority", NumericRange::at_most(5.0));
    assert_eq!(filter(&all, &Accessors::of(), &query).len(), 2);
}

#[test]
fn test_aggregate_over_tags() {
    let set = aggregate(&tickets(), &Accessors::<Ticket>::of(), &[Ticket::LABELS]);
    assert_eq!(set.values("labels"), vec!["floor-2", "hardware", "network"]);
    assert_eq!(set.count("labels", "hardware"), 2);
}
