//! The screen controller.
//!
//! A [`Screen`] ties one record type's accessors to a schema, a query, a
//! paginator, a search debouncer and the memos that keep re-evaluation
//! cheap. It owns no records: each call to [`Screen::evaluate`] reads the
//! current [`RecordStore`].

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::accessor::Accessors;
use crate::config::ScreenConfig;
use crate::debounce::Debouncer;
use crate::error::{QueryError, Result};
use crate::filter::filter_indices;
use crate::memo::Memo;
use crate::options::{aggregate, aggregate_dependent, FacetOption, OptionSet};
use crate::ordering::OrderBy;
use crate::pagination::{paginate, Page, PageState, Paginator};
use crate::policy::{apply_overrides, QueryOverride};
use crate::query::QueryState;
use crate::range::{DateRange, NumericRange};
use crate::schema::{DimensionKind, Schema, Selection};
use crate::store::{RecordStore, StoreKey};
use crate::traits::Filterable;

/// Hit and miss counters of a screen's memos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub filter_hits: u64,
    pub filter_misses: u64,
    pub option_hits: u64,
    pub option_misses: u64,
}

/// The option list of one categorical dimension, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetGroup {
    pub dimension: String,
    pub label: String,
    pub selection: Selection,
    pub searchable: bool,
    pub selected: Vec<String>,
    pub options: Vec<FacetOption>,
}

/// Everything a list screen renders after one evaluation.
#[derive(Debug, Clone)]
pub struct ScreenView<'a, T> {
    matched: Vec<&'a T>,
    state: PageState,
    /// Number of records in the store before filtering.
    pub total_records: usize,
    pub facets: Vec<FacetGroup>,
    /// The query after overrides, as it was evaluated.
    pub query: QueryState,
}

impl<'a, T> ScreenView<'a, T> {
    /// The visible page.
    pub fn page(&self) -> Page<'_, &'a T> {
        paginate(&self.matched, self.state)
    }

    /// Every matching record, sorted, across all pages.
    pub fn matched(&self) -> &[&'a T] {
        &self.matched
    }

    pub fn total_matched(&self) -> usize {
        self.matched.len()
    }

    pub fn page_state(&self) -> PageState {
        self.state
    }
}

/// Query, pagination and option state of one list screen.
///
/// ```
/// use std::borrow::Cow;
/// use deskview_query::{
///     Dimension, DimensionKind, FieldValue, Filterable, RecordStore, Screen, ScreenConfig,
/// };
///
/// struct Bid {
///     vendor: &'static str,
/// }
///
/// impl Filterable for Bid {
///     fn facet_value(&self, dimension: &str) -> FieldValue<'_> {
///         match dimension {
///             "vendor" => FieldValue::text(self.vendor),
///             _ => FieldValue::None,
///         }
///     }
///
///     fn search_terms(&self) -> Vec<Cow<'_, str>> {
///         vec![Cow::Borrowed(self.vendor)]
///     }
///
///     fn dimensions() -> &'static [Dimension] {
///         &[Dimension { name: "vendor", kind: DimensionKind::Category }]
///     }
/// }
///
/// let store = RecordStore::new(vec![Bid { vendor: "Acme" }, Bid { vendor: "Initech" }]);
/// let mut screen = Screen::<Bid>::for_record(ScreenConfig::default()).unwrap();
///
/// screen.select("vendor", "Acme").unwrap();
/// let view = screen.evaluate(&store).unwrap();
///
/// assert_eq!(view.total_matched(), 1);
/// assert_eq!(view.facets[0].options.len(), 2);
/// ```
#[derive(Debug)]
pub struct Screen<T> {
    schema: Schema,
    accessors: Accessors<T>,
    config: ScreenConfig,
    query: QueryState,
    paginator: Paginator,
    debouncer: Debouncer<String>,
    overrides: Vec<Box<dyn QueryOverride>>,
    matches: Memo<(StoreKey, QueryState), Vec<usize>>,
    options: Memo<StoreKey, OptionSet>,
}

impl<T> Screen<T> {
    /// Creates a screen. Dimension declarations in `config` replace those
    /// of `schema`.
    pub fn new(schema: Schema, accessors: Accessors<T>, config: ScreenConfig) -> Result<Self> {
        let schema = config
            .dimensions
            .iter()
            .cloned()
            .try_fold(schema, |schema, spec| schema.with(spec))?;
        let paginator = Paginator::new(config.page_state()?);
        let debouncer = Debouncer::new(config.debounce());

        Ok(Screen {
            schema,
            accessors,
            config,
            query: QueryState::new(),
            paginator,
            debouncer,
            overrides: Vec::new(),
            matches: Memo::new(),
            options: Memo::new(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// The query as the user built it, before overrides.
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The query after every installed override.
    pub fn effective_query(&self) -> QueryState {
        apply_overrides(&self.query, &self.overrides)
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            filter_hits: self.matches.hits(),
            filter_misses: self.matches.misses(),
            option_hits: self.options.hits(),
            option_misses: self.options.misses(),
        }
    }

    /// Returns query, page and pending search to the configured start.
    pub fn reset(&mut self) {
        self.query = QueryState::new();
        self.debouncer.cancel();
        // page_state was validated in new()
        if let Ok(state) = self.config.page_state() {
            self.paginator.reset(state);
        }
    }

    // ========================================================================
    // Query mutations
    // ========================================================================

    /// Replaces the query after checking it against the schema.
    pub fn set_query(&mut self, query: QueryState) -> Result<()> {
        if let Err(err) = self.schema.validate(&query) {
            warn!(error = %err, "rejected query");
            return Err(err);
        }
        self.query = query;
        Ok(())
    }

    fn update(
        &mut self,
        change: impl FnOnce(&Schema, QueryState) -> Result<QueryState>,
    ) -> Result<()> {
        let query = match change(&self.schema, self.query.clone()) {
            Ok(query) => query,
            Err(err) => {
                warn!(error = %err, "rejected query change");
                return Err(err);
            }
        };
        self.set_query(query)
    }

    pub fn select(&mut self, dimension: &str, value: &str) -> Result<()> {
        self.update(|schema, query| schema.select(query, dimension, value))
    }

    pub fn deselect(&mut self, dimension: &str, value: &str) -> Result<()> {
        self.update(|schema, query| schema.deselect(query, dimension, value))
    }

    pub fn toggle(&mut self, dimension: &str, value: &str) -> Result<()> {
        self.update(|schema, query| schema.toggle(query, dimension, value))
    }

    pub fn set_values<I, S>(&mut self, dimension: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|schema, query| schema.set_values(query, dimension, values))
    }

    pub fn clear_dimension(&mut self, dimension: &str) -> Result<()> {
        self.update(|schema, query| schema.clear(query, dimension))
    }

    /// Removes every dimension constraint, keeping search and sort.
    pub fn clear_filters(&mut self) {
        self.query = std::mem::take(&mut self.query).clear_filters();
    }

    pub fn set_date_range(&mut self, dimension: &str, range: DateRange) -> Result<()> {
        self.update(|_, query| Ok(query.date_range(dimension, range)))
    }

    pub fn set_numeric_range(&mut self, dimension: &str, range: NumericRange) -> Result<()> {
        self.update(|_, query| Ok(query.numeric_range(dimension, range)))
    }

    /// Sets the sort keys, replacing any existing ones.
    pub fn sort_by(&mut self, orderings: &[OrderBy]) -> Result<()> {
        self.update(|_, query| {
            Ok(orderings
                .iter()
                .fold(query.clear_order(), |q, o| q.order_by(&o.field, o.dir)))
        })
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Applies search text immediately, dropping any pending keystrokes.
    pub fn set_search(&mut self, text: &str) {
        self.debouncer.cancel();
        self.query = std::mem::take(&mut self.query).with_search(text);
    }

    /// Records a keystroke; the text is applied by a later [`Screen::tick`].
    pub fn type_search(&mut self, text: &str, now: Instant) {
        self.debouncer.push(text.to_string(), now);
    }

    /// Applies pending search text once the debounce delay has passed.
    /// Returns `true` if the query changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(text) if text != self.query.search_text() => {
                self.query = std::mem::take(&mut self.query).with_search(text);
                true
            }
            _ => false,
        }
    }

    pub fn pending_search(&self) -> Option<&str> {
        self.debouncer.pending().map(String::as_str)
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    pub fn set_page(&mut self, page: usize) {
        self.paginator.set_page(page);
    }

    pub fn next_page(&mut self) {
        self.paginator.next();
    }

    pub fn prev_page(&mut self) {
        self.paginator.prev();
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        self.paginator.set_items_per_page(items_per_page)
    }

    // ========================================================================
    // Overrides
    // ========================================================================

    /// Installs an override, replacing one with the same name.
    pub fn set_override(&mut self, policy: Box<dyn QueryOverride>) {
        self.overrides.retain(|o| o.name() != policy.name());
        self.overrides.push(policy);
    }

    pub fn remove_override(&mut self, name: &str) {
        self.overrides.retain(|o| o.name() != name);
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Filters, sorts and paginates the store with the effective query.
    ///
    /// The page is clamped to the new result size. Filtered indices are
    /// reused while neither the store revision nor the effective query
    /// changes; option counts are reused while the store revision does not
    /// change.
    pub fn evaluate<'a>(&mut self, store: &'a RecordStore<T>) -> Result<ScreenView<'a, T>> {
        let query = self.effective_query();
        if let Err(err) = self.schema.validate(&query) {
            warn!(error = %err, "override produced an invalid query");
            return Err(err);
        }

        let records = store.records();
        let accessors = &self.accessors;
        let indices = self.matches.get_or_compute((store.key(), query.clone()), || {
            debug!(revision = store.revision(), "recomputing matches");
            filter_indices(records, accessors, &query)
        });
        let matched: Vec<&'a T> = indices.iter().map(|&i| &records[i]).collect();
        self.paginator.sync(matched.len());

        let facets = self.facets(store, &query);

        Ok(ScreenView {
            matched,
            state: self.paginator.state(),
            total_records: records.len(),
            facets,
            query,
        })
    }

    fn facets(&mut self, store: &RecordStore<T>, query: &QueryState) -> Vec<FacetGroup> {
        let options = cached_options(&mut self.options, &self.schema, &self.accessors, store);
        self.schema
            .dimensions()
            .iter()
            .filter(|spec| spec.kind == DimensionKind::Category)
            .map(|spec| FacetGroup {
                dimension: spec.name.clone(),
                label: spec.display_label().to_string(),
                selection: spec.selection,
                searchable: spec.searchable,
                selected: query.selected(&spec.name).to_vec(),
                options: options.options_for(spec),
            })
            .collect()
    }

    /// Options of a searchable dimension matching `needle`.
    pub fn search_options(
        &mut self,
        store: &RecordStore<T>,
        dimension: &str,
        needle: &str,
    ) -> Result<Vec<FacetOption>> {
        let options = cached_options(&mut self.options, &self.schema, &self.accessors, store);
        self.schema.search_options(options, dimension, needle)
    }

    /// Option counts of one dimension over the records matching every
    /// other constraint of the effective query.
    pub fn dependent_options(
        &self,
        store: &RecordStore<T>,
        dimension: &str,
    ) -> Result<Vec<FacetOption>> {
        let query = self.effective_query();
        let spec = self
            .schema
            .get(dimension)
            .ok_or_else(|| QueryError::UnknownDimension(dimension.to_string()))?;
        let set = aggregate_dependent(store.records(), &self.accessors, &query, dimension);
        Ok(set.options_for(spec))
    }
}

fn cached_options<'m, T>(
    memo: &'m mut Memo<StoreKey, OptionSet>,
    schema: &Schema,
    accessors: &Accessors<T>,
    store: &RecordStore<T>,
) -> &'m OptionSet {
    memo.get_or_compute(store.key(), || {
        debug!(revision = store.revision(), "recomputing options");
        aggregate(store.records(), accessors, &schema.category_names())
    })
}

impl<T: Filterable> Screen<T> {
    /// A screen over every dimension `T` declares.
    pub fn for_record(config: ScreenConfig) -> Result<Self> {
        Screen::new(Schema::for_record::<T>()?, Accessors::of(), config)
    }
}
