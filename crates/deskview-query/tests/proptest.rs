//! Property-based tests for the query engine using proptest.

use std::borrow::Cow;

use chrono::NaiveDate;
use deskview_query::{
    aggregate, count, filter, filter_indices, filter_staged, paginate, Accessors, DateRange,
    FieldValue, Number, NumericRange, PageState, QueryState, Stage,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    name: String,
    status: String,
    tags: Vec<String>,
    day: Option<u32>,
    amount: f64,
}

fn item_field<'a>(item: &'a TestItem, dimension: &str) -> FieldValue<'a> {
    match dimension {
        "status" => FieldValue::text(&item.status),
        "tags" => FieldValue::list(item.tags.iter().map(String::as_str)),
        "day" => item
            .day
            .and_then(|d| NaiveDate::from_ymd_opt(2024, 1, d))
            .map_or(FieldValue::None, FieldValue::Date),
        "amount" => FieldValue::Number(Number::F64(item.amount)),
        _ => FieldValue::None,
    }
}

fn item_search(item: &TestItem) -> Vec<Cow<'_, str>> {
    vec![Cow::Borrowed(item.name.as_str())]
}

fn accessors() -> Accessors<TestItem> {
    Accessors::new(item_field, item_search)
}

const STATUSES: [&str; 4] = ["open", "closed", "pending", ""];
const TAGS: [&str; 4] = ["hvac", "roof", "solar", "plumbing"];

fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (
        "[a-zA-Z]{1,8}",
        prop::sample::select(STATUSES.to_vec()),
        prop::collection::vec(prop::sample::select(TAGS.to_vec()), 0..4),
        prop::option::of(1u32..=31),
        -1000.0f64..1000.0,
    )
        .prop_map(|(name, status, tags, day, amount)| TestItem {
            name,
            status: status.to_string(),
            tags: tags.into_iter().map(String::from).collect(),
            day,
            amount,
        })
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn query_strategy() -> impl Strategy<Value = QueryState> {
    (
        prop::option::of("[a-z]{0,2}"),
        prop::collection::vec(prop::sample::select(STATUSES[..3].to_vec()), 0..3),
        prop::collection::vec(prop::sample::select(TAGS.to_vec()), 0..3),
        prop::option::of((1u32..=31, prop::option::of(1u32..=31))),
        prop::option::of((-1000.0f64..1000.0, -1000.0f64..1000.0)),
    )
        .prop_map(|(search, statuses, tags, days, amounts)| {
            let mut query = QueryState::new()
                .with_search(search.unwrap_or_default())
                .set_values("status", statuses)
                .set_values("tags", tags);
            if let Some((from, to)) = days {
                query = query.date_range("day", DateRange::new(Some(date(from)), to.map(date)));
            }
            if let Some((min, max)) = amounts {
                query = query.numeric_range("amount", NumericRange::between(min, max));
            }
            query
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// The order of predicate stages never changes the result.
    #[test]
    fn stage_order_is_commutative(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        query in query_strategy(),
        stages in Just(Stage::ALL.to_vec()).prop_shuffle(),
    ) {
        let canonical = filter_staged(&items, &accessors(), &query, &Stage::ALL);
        let shuffled = filter_staged(&items, &accessors(), &query, &stages);
        prop_assert_eq!(canonical, shuffled);
    }

    /// An empty query returns the collection unchanged.
    #[test]
    fn empty_query_is_identity(
        items in prop::collection::vec(test_item_strategy(), 0..40),
    ) {
        let indices = filter_indices(&items, &accessors(), &QueryState::new());
        prop_assert_eq!(indices, (0..items.len()).collect::<Vec<_>>());
    }

    /// Filtering a filtered collection again changes nothing.
    #[test]
    fn filter_is_idempotent(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        query in query_strategy(),
    ) {
        let once: Vec<TestItem> = filter(&items, &accessors(), &query).into_iter().cloned().collect();
        let twice = filter(&once, &accessors(), &query);
        prop_assert_eq!(once.len(), twice.len());
    }

    /// Filter never grows the collection, and count agrees with it.
    #[test]
    fn count_equals_filter_len(
        items in prop::collection::vec(test_item_strategy(), 0..40),
        query in query_strategy(),
    ) {
        let filtered = filter(&items, &accessors(), &query);
        prop_assert!(filtered.len() <= items.len());
        prop_assert_eq!(filtered.len(), count(&items, &accessors(), &query));
    }

    /// For a single-valued dimension, option counts sum to the number of
    /// records with a non-blank value.
    #[test]
    fn option_counts_sum_to_membership(
        items in prop::collection::vec(test_item_strategy(), 0..40),
    ) {
        let set = aggregate(&items, &accessors(), &["status"]);
        let with_status = items.iter().filter(|i| !i.status.trim().is_empty()).count();
        let total: usize = set.options("status").iter().map(|o| o.count).sum();
        prop_assert_eq!(total, with_status);
    }

    /// For a list dimension, each tag is counted once per record that
    /// carries it, however often it repeats there.
    #[test]
    fn list_option_counts_match_distinct_membership(
        items in prop::collection::vec(test_item_strategy(), 0..40),
    ) {
        let set = aggregate(&items, &accessors(), &["tags"]);
        let options = set.options("tags");
        for tag in TAGS {
            let carrying = items.iter().filter(|i| i.tags.iter().any(|t| t == tag)).count();
            let counted = options.iter().find(|o| o.value == tag).map_or(0, |o| o.count);
            prop_assert_eq!(counted, carrying);
        }

        let total: usize = options.iter().map(|o| o.count).sum();
        let distinct: usize = items
            .iter()
            .map(|i| i.tags.iter().collect::<std::collections::BTreeSet<_>>().len())
            .sum();
        prop_assert_eq!(total, distinct);
    }

    /// Each option count equals the number of records selecting that value
    /// would keep.
    #[test]
    fn option_count_matches_selection(
        items in prop::collection::vec(test_item_strategy(), 0..40),
    ) {
        let set = aggregate(&items, &accessors(), &["tags"]);
        for option in set.options("tags") {
            let query = QueryState::new().select("tags", option.value.clone());
            prop_assert_eq!(option.count, count(&items, &accessors(), &query));
        }
    }

    /// After clamping, the page is always inside `0..max(total_pages, 1)`.
    #[test]
    fn clamp_keeps_page_in_range(
        page in 0usize..1000,
        items_per_page in 1usize..50,
        total_items in 0usize..500,
    ) {
        let state = PageState::new(page, items_per_page).unwrap().clamped(total_items);
        let total_pages = state.total_pages(total_items);
        prop_assert!(state.page() < total_pages.max(1));
    }

    /// Page length is `min(n, len - page * n)` for in-range pages.
    #[test]
    fn page_slice_length(
        items_per_page in 1usize..20,
        total_items in 0usize..200,
        page in 0usize..20,
    ) {
        let items: Vec<usize> = (0..total_items).collect();
        let state = PageState::new(page, items_per_page).unwrap();
        let slice = paginate(&items, state);
        let expected = items_per_page.min(total_items.saturating_sub(page * items_per_page));
        prop_assert_eq!(slice.items.len(), expected);
    }

    /// Selected values of one dimension combine with OR.
    #[test]
    fn multi_select_is_union(
        items in prop::collection::vec(test_item_strategy(), 0..40),
    ) {
        let open = count(&items, &accessors(), &QueryState::new().select("status", "open"));
        let closed = count(&items, &accessors(), &QueryState::new().select("status", "closed"));
        let both = QueryState::new().select("status", "open").select("status", "closed");
        prop_assert_eq!(count(&items, &accessors(), &both), open + closed);
    }
}

#[test]
fn inverted_numeric_range_matches_nothing() {
    let items = vec![TestItem {
        name: "a".to_string(),
        status: "open".to_string(),
        tags: Vec::new(),
        day: None,
        amount: 5.0,
    }];
    let query = QueryState::new().numeric_range("amount", NumericRange::between(10.0, 1.0));
    assert!(filter(&items, &accessors(), &query).is_empty());
}
