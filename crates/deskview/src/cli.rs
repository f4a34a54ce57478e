//! The `deskview` command line.
//!
//! One invocation shows one page of one screen:
//!
//! ```text
//! deskview work-orders --data rows.json \
//!     --search boiler --filter status=open,scheduled \
//!     --range amount=500..1000 --sort due:desc --page 2
//! ```

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser};
use deskview_query::{
    DateRange, Dir, Filterable, NumericRange, OrderBy, QueryState, RecordStore, Schema, Screen,
    ScreenConfig,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::dataset::{Dataset, DeskConfig};
use crate::output::OutputMode;
use crate::screens::{DropdownPrecedence, EndingSoon, ScreenKind};
use crate::serialize::{serialize_structured, SerializeError};
use crate::table::render_list;
use crate::views::{ListViewBuilder, ListViewResult};

#[derive(Debug, Parser)]
#[command(
    name = "deskview",
    version,
    about = "Search, filter and page through dashboard records"
)]
pub struct Cli {
    /// Screen to show.
    #[arg(value_enum)]
    pub screen: ScreenKind,

    /// JSON dataset with the records of every screen.
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// YAML file overriding per-screen settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Free-text search over each record's searchable fields.
    #[arg(long, short)]
    pub search: Option<String>,

    /// Keep records whose DIM is one of the listed values. Repeatable.
    #[arg(long = "filter", value_name = "DIM=A,B")]
    pub filters: Vec<String>,

    /// Restrict a date dimension; a single date means that day only.
    #[arg(long = "date", value_name = "DIM=FROM[..TO]")]
    pub dates: Vec<String>,

    /// Restrict a numeric dimension; either bound may be left out.
    #[arg(long = "range", value_name = "DIM=MIN..MAX")]
    pub ranges: Vec<String>,

    /// Sort key, most significant first. Repeatable.
    #[arg(long = "sort", value_name = "FIELD[:desc]")]
    pub sorts: Vec<String>,

    /// Page to show, counting from 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Items per page; defaults to the screen's setting.
    #[arg(long, value_name = "N")]
    pub per_page: Option<usize>,

    /// Status dropdown. Overrides any status filter; `all` disables it.
    #[arg(long)]
    pub status: Option<String>,

    /// Only records ending within DAYS from today.
    #[arg(long, value_name = "DAYS")]
    pub ending_soon: Option<u64>,

    /// Date used as "today" by --ending-soon.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Show filter options with their record counts.
    #[arg(long)]
    pub options: bool,

    /// Count options over the records matching the other filters only.
    #[arg(long, requires = "options")]
    pub dependent: bool,

    #[arg(long, value_enum, default_value = "auto")]
    pub output: OutputMode,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Malformed or inapplicable command-line values.
#[derive(Debug, Error, PartialEq)]
pub enum ArgError {
    #[error("--{flag} expects {expected}, got '{arg}'")]
    Malformed {
        flag: &'static str,
        expected: &'static str,
        arg: String,
    },

    #[error("invalid date '{value}' in '{arg}': {source}")]
    InvalidDate {
        arg: String,
        value: String,
        source: chrono::ParseError,
    },

    #[error("invalid number '{value}' in '{arg}': {source}")]
    InvalidNumber {
        arg: String,
        value: String,
        source: std::num::ParseFloatError,
    },

    #[error("unknown sort direction '{0}' (use asc or desc)")]
    InvalidDirection(String),

    #[error("pages are numbered from 1")]
    ZeroPage,

    #[error("the {0} screen has no status dropdown")]
    NoStatus(ScreenKind),

    #[error("the {0} screen has no end date")]
    NoEndingDate(ScreenKind),
}

fn split_assignment<'a>(
    flag: &'static str,
    expected: &'static str,
    arg: &'a str,
) -> Result<(&'a str, &'a str), ArgError> {
    match arg.split_once('=') {
        Some((dim, rest)) if !dim.trim().is_empty() => Ok((dim.trim(), rest.trim())),
        _ => Err(ArgError::Malformed {
            flag,
            expected,
            arg: arg.to_string(),
        }),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Splits `FROM..TO` into optional bounds; a bare value is both.
fn split_bounds(text: &str) -> (Option<&str>, Option<&str>) {
    match text.split_once("..") {
        Some((from, to)) => (non_empty(from), non_empty(to)),
        None => {
            let value = non_empty(text);
            (value, value)
        }
    }
}

/// Parses `--filter status=open,closed`.
pub fn parse_filter(arg: &str) -> Result<(String, Vec<String>), ArgError> {
    let (dim, values) = split_assignment("filter", "DIM=A,B", arg)?;
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    Ok((dim.to_string(), values))
}

/// Parses `--date due=2024-01-01..2024-01-31`.
///
/// A single date selects that day; `FROM..` leaves the end open. A range
/// always needs a start.
pub fn parse_date(arg: &str) -> Result<(String, DateRange), ArgError> {
    const EXPECTED: &str = "DIM=FROM[..TO]";
    let (dim, bounds) = split_assignment("date", EXPECTED, arg)?;
    let parse = |value: &str| {
        value.parse::<NaiveDate>().map_err(|source| ArgError::InvalidDate {
            arg: arg.to_string(),
            value: value.to_string(),
            source,
        })
    };
    let malformed = || ArgError::Malformed {
        flag: "date",
        expected: EXPECTED,
        arg: arg.to_string(),
    };
    let range = match bounds.split_once("..") {
        Some((from, to)) => {
            let from = non_empty(from).ok_or_else(malformed)?;
            DateRange::new(Some(parse(from)?), non_empty(to).map(parse).transpose()?)
        }
        None => DateRange::day(parse(non_empty(bounds).ok_or_else(malformed)?)?),
    };
    Ok((dim.to_string(), range))
}

/// Parses `--range amount=500..1000`.
pub fn parse_range(arg: &str) -> Result<(String, NumericRange), ArgError> {
    let (dim, bounds) = split_assignment("range", "DIM=MIN..MAX", arg)?;
    let parse = |value: Option<&str>| {
        value
            .map(|v| {
                v.parse::<f64>().map_err(|source| ArgError::InvalidNumber {
                    arg: arg.to_string(),
                    value: v.to_string(),
                    source,
                })
            })
            .transpose()
    };
    let (min, max) = split_bounds(bounds);
    Ok((dim.to_string(), NumericRange::new(parse(min)?, parse(max)?)))
}

/// Parses `--sort amount:desc`.
pub fn parse_sort(arg: &str) -> Result<OrderBy, ArgError> {
    let (field, dir) = match arg.split_once(':') {
        Some((field, dir)) => (field.trim(), dir.trim()),
        None => (arg.trim(), "asc"),
    };
    if field.is_empty() {
        return Err(ArgError::Malformed {
            flag: "sort",
            expected: "FIELD[:desc]",
            arg: arg.to_string(),
        });
    }
    let dir = match dir.to_ascii_lowercase().as_str() {
        "asc" => Dir::Asc,
        "desc" => Dir::Desc,
        _ => return Err(ArgError::InvalidDirection(dir.to_string())),
    };
    Ok(OrderBy::new(field, dir))
}

/// Builds the query the flags describe, checked against `schema`.
pub fn build_query(cli: &Cli, schema: &Schema) -> anyhow::Result<QueryState> {
    let mut query = QueryState::new();
    if let Some(search) = &cli.search {
        query = query.with_search(search.as_str());
    }
    for arg in &cli.filters {
        let (dim, values) = parse_filter(arg)?;
        let mut selected = query.selected(&dim).to_vec();
        selected.extend(values);
        query = schema.set_values(query, &dim, selected)?;
    }
    for arg in &cli.dates {
        let (dim, range) = parse_date(arg)?;
        query = query.date_range(&dim, range);
    }
    for arg in &cli.ranges {
        let (dim, range) = parse_range(arg)?;
        query = query.numeric_range(&dim, range);
    }
    for arg in &cli.sorts {
        let order = parse_sort(arg)?;
        query = query.order_by(&order.field, order.dir);
    }
    schema.validate(&query)?;
    Ok(query)
}

/// Loads the data, evaluates the requested screen and renders it.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    if cli.page == 0 {
        return Err(ArgError::ZeroPage.into());
    }
    let dataset = Dataset::load(&cli.data)?;
    let desk = match &cli.config {
        Some(path) => DeskConfig::load(path)?,
        None => DeskConfig::default(),
    };
    let config = cli.screen.config(&desk.settings(cli.screen));
    info!(screen = %cli.screen, records = dataset.len_of(cli.screen), "showing screen");

    match cli.screen {
        ScreenKind::WorkOrders => show(cli, config, dataset.work_orders),
        ScreenKind::Invoices => show(cli, config, dataset.invoices),
        ScreenKind::Payments => show(cli, config, dataset.payments),
        ScreenKind::Projects => show(cli, config, dataset.projects),
        ScreenKind::Bids => show(cli, config, dataset.bids),
        ScreenKind::HelpDesk => show(cli, config, dataset.tickets),
    }
}

fn show<T>(cli: &Cli, config: ScreenConfig, records: Vec<T>) -> anyhow::Result<String>
where
    T: Filterable + Serialize,
{
    let store = RecordStore::new(records);
    let mut screen = Screen::<T>::for_record(config)?;

    let query = build_query(cli, screen.schema())?;
    screen.set_query(query)?;
    if let Some(per_page) = cli.per_page {
        screen.set_items_per_page(per_page)?;
    }
    screen.set_page(cli.page - 1);

    if let Some(value) = &cli.status {
        let dimension = cli
            .screen
            .status_dimension()
            .ok_or(ArgError::NoStatus(cli.screen))?;
        screen.set_override(Box::new(DropdownPrecedence::new(dimension, value.as_str())));
    }
    if let Some(days) = cli.ending_soon {
        let dimension = cli
            .screen
            .ending_dimension()
            .ok_or(ArgError::NoEndingDate(cli.screen))?;
        let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
        screen.set_override(Box::new(EndingSoon::new(dimension, today, days)));
    }

    let view = screen.evaluate(&store)?;
    debug!(
        matched = view.total_matched(),
        page = view.page_state().page(),
        "evaluated screen"
    );

    let mut builder = ListViewBuilder::from_screen(&view).intro(cli.screen.title());
    let shown = view.page_state().page() + 1;
    if shown != cli.page {
        builder = builder.warning(format!(
            "page {} is out of range, showing page {shown}",
            cli.page
        ));
    }
    if view.total_matched() == 0 && view.total_records > 0 {
        builder = builder.info("no records match the current filters");
    }
    if cli.options {
        let mut facets = view.facets.clone();
        if cli.dependent {
            for facet in &mut facets {
                facet.options = screen.dependent_options(&store, &facet.dimension)?;
            }
        }
        builder = builder.facets(facets);
    }

    Ok(render(&builder.build(), cli.output)?)
}

/// Renders a list view in the given output mode.
pub fn render<T: Serialize>(
    view: &ListViewResult<T>,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode.to_text_mode() {
        Some(text_mode) => render_list(view, text_mode),
        None => serialize_structured(view, mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn filter_values_are_split_and_trimmed() {
        assert_eq!(
            parse_filter("status= open, closed,,").unwrap(),
            ("status".to_string(), vec!["open".to_string(), "closed".to_string()])
        );
        assert!(matches!(
            parse_filter("status"),
            Err(ArgError::Malformed { flag: "filter", .. })
        ));
        assert!(parse_filter("=open").is_err());
    }

    #[test]
    fn date_bounds() {
        let (dim, range) = parse_date("due=2024-01-01..2024-01-31").unwrap();
        assert_eq!(dim, "due");
        assert_eq!(range, DateRange::between(date("2024-01-01"), date("2024-01-31")));

        let (_, day) = parse_date("due=2024-01-10").unwrap();
        assert_eq!(day, DateRange::day(date("2024-01-10")));

        let (_, open_end) = parse_date("due=2024-01-01..").unwrap();
        assert_eq!(open_end, DateRange::new(Some(date("2024-01-01")), None));

        assert!(matches!(
            parse_date("due=..2024-01-31"),
            Err(ArgError::Malformed { flag: "date", .. })
        ));

        assert!(matches!(
            parse_date("due=2024-13-01"),
            Err(ArgError::InvalidDate { .. })
        ));
    }

    #[test]
    fn numeric_bounds() {
        let (dim, range) = parse_range("amount=500..1000").unwrap();
        assert_eq!(dim, "amount");
        assert_eq!(range, NumericRange::between(500.0, 1000.0));
        assert_eq!(parse_range("amount=500..").unwrap().1, NumericRange::at_least(500.0));
        assert_eq!(parse_range("amount=..1000").unwrap().1, NumericRange::at_most(1000.0));
        assert!(matches!(
            parse_range("amount=lots"),
            Err(ArgError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn sort_keys() {
        assert_eq!(parse_sort("due").unwrap(), OrderBy::asc("due"));
        assert_eq!(parse_sort("amount:DESC").unwrap(), OrderBy::desc("amount"));
        assert_eq!(
            parse_sort("amount:down"),
            Err(ArgError::InvalidDirection("down".to_string()))
        );
        assert!(parse_sort(":desc").is_err());
    }

    #[test]
    fn cli_parses_repeated_flags() {
        let cli = Cli::try_parse_from([
            "deskview",
            "invoices",
            "--data",
            "rows.json",
            "--filter",
            "status=sent",
            "--filter",
            "status=overdue",
            "--sort",
            "due:desc",
            "--output",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.screen, ScreenKind::Invoices);
        assert_eq!(cli.filters.len(), 2);
        assert_eq!(cli.page, 1);
        assert_eq!(cli.output, OutputMode::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn repeated_filters_accumulate() {
        let cli = Cli::try_parse_from([
            "deskview",
            "invoices",
            "--data",
            "rows.json",
            "--filter",
            "status=sent",
            "--filter",
            "status=overdue",
        ])
        .unwrap();
        let schema = Schema::for_record::<crate::records::Invoice>().unwrap();
        let query = build_query(&cli, &schema).unwrap();
        assert_eq!(query.selected("status"), ["sent", "overdue"]);
    }

    #[test]
    fn unknown_dimension_is_rejected() {
        let cli = Cli::try_parse_from([
            "deskview",
            "invoices",
            "--data",
            "rows.json",
            "--range",
            "weight=1..2",
        ])
        .unwrap();
        let schema = Schema::for_record::<crate::records::Invoice>().unwrap();
        assert!(build_query(&cli, &schema).is_err());
    }
}
