//! Text rendering of list views.
//!
//! Items are serialized to JSON values first, so any `Serialize` record
//! renders without a per-type column spec: top-level fields become
//! columns in declaration order, lists are joined with commas and nested
//! objects are shown as compact JSON.

use console::Style;
use serde::Serialize;
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::output::TextMode;
use crate::serialize::SerializeError;
use crate::views::ListViewResult;

/// Widest a cell may get before it is truncated.
pub const MAX_CELL_WIDTH: usize = 32;

const GAP: &str = "  ";

/// Renders a list view as an aligned table with its surrounding text.
pub fn render_list<T: Serialize>(
    view: &ListViewResult<T>,
    mode: TextMode,
) -> Result<String, SerializeError> {
    let mut out = String::new();

    if let Some(intro) = &view.intro {
        out.push_str(&paint(intro, Style::new().bold(), mode));
        out.push_str("\n\n");
    }

    let rows = view
        .items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    if !rows.is_empty() {
        let (headers, cells) = tabulate(&rows);
        out.push_str(&render_table(&headers, &cells, mode));
        out.push('\n');
    }

    if let Some(showing) = view.showing() {
        out.push_str(&showing);
        out.push('\n');
    }
    if let Some(summary) = &view.filter_summary {
        out.push_str(&paint(
            &format!("Filtered by: {summary}"),
            Style::new().dim(),
            mode,
        ));
        out.push('\n');
    }

    for facet in &view.facets {
        let options: Vec<String> = facet
            .options
            .iter()
            .map(|o| {
                let marker = if facet.selected.contains(&o.value) {
                    "*"
                } else {
                    ""
                };
                format!("{marker}{} ({})", o.label, o.count)
            })
            .collect();
        let heading = paint(&format!("{}:", facet.label), Style::new().bold(), mode);
        if options.is_empty() {
            out.push_str(&format!("{heading} -\n"));
        } else {
            out.push_str(&format!("{heading} {}\n", options.join(", ")));
        }
    }

    for message in &view.messages {
        out.push_str(&paint(&message.to_string(), message.level.style(), mode));
        out.push('\n');
    }

    if let Some(ending) = &view.ending {
        out.push('\n');
        out.push_str(ending);
        out.push('\n');
    }

    Ok(out)
}

/// Headers (union of object keys in order of first appearance) and the
/// cell text of every row.
pub fn tabulate(rows: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        match row {
            Value::Object(map) => {
                for key in map.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
            _ => {
                if !headers.iter().any(|h| h == "value") {
                    headers.push("value".to_string());
                }
            }
        }
    }

    let cells = rows
        .iter()
        .map(|row| {
            let map = match row {
                Value::Object(map) => Some(map),
                _ => None,
            };
            headers
                .iter()
                .map(|h| match map {
                    Some(map) => cell_text(map.get(h).unwrap_or(&Value::Null)),
                    None if h == "value" => cell_text(row),
                    None => String::new(),
                })
                .collect()
        })
        .collect();

    (headers, cells)
}

fn cell_text(value: &Value) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(cell_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    };
    truncate_to_width(&text, MAX_CELL_WIDTH)
}

fn render_table(headers: &[String], cells: &[Vec<String>], mode: TextMode) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_uppercase()).collect();
    out.push_str(&render_row(&header_cells, &widths, Some(Style::new().bold()), mode));

    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&render_row(&rule, &widths, Some(Style::new().dim()), mode));

    for row in cells {
        out.push_str(&render_row(row, &widths, None, mode));
    }
    out
}

fn render_row(cells: &[String], widths: &[usize], style: Option<Style>, mode: TextMode) -> String {
    let last = cells.len().saturating_sub(1);
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        match &style {
            Some(style) => line.push_str(&paint(cell, style.clone(), mode)),
            None => line.push_str(cell),
        }
        if i < last {
            line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
            line.push_str(GAP);
        }
    }
    line.push('\n');
    line
}

fn paint(text: &str, style: Style, mode: TextMode) -> String {
    match mode {
        TextMode::Styled => style.force_styling(true).apply_to(text).to_string(),
        TextMode::Plain => text.to_string(),
    }
}

/// Truncates `s` to at most `max_width` display columns, ending in `…`
/// when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{list_view, PageInfo};
    use deskview_query::{paginate, PageState};
    use serde_json::json;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
        assert_eq!(truncate_to_width("123456", 5), "1234…");
        assert_eq!(truncate_to_width("Hello", 0), "…");
        assert_eq!(truncate_to_width("日本語です", 5), "日本…");
    }

    #[test]
    fn test_tabulate_collects_headers_from_all_rows() {
        let rows = vec![
            json!({"id": "WO-1", "amount": 10}),
            json!({"id": "WO-2", "technician": "Dana", "amount": 20.5}),
        ];
        let (headers, cells) = tabulate(&rows);

        assert_eq!(headers, vec!["id", "amount", "technician"]);
        assert_eq!(cells[0], vec!["WO-1", "10", ""]);
        assert_eq!(cells[1], vec!["WO-2", "20.5", "Dana"]);
    }

    #[test]
    fn test_lists_are_joined() {
        let (_, cells) = tabulate(&[json!({"trades": ["hvac", "electrical"]})]);
        assert_eq!(cells[0], vec!["hvac, electrical"]);
    }

    #[test]
    fn test_plain_table_alignment() {
        let items = vec![
            json!({"id": "WO-1", "client": "Acme"}),
            json!({"id": "WO-10", "client": "Initech Holdings"}),
        ];
        let page = paginate(&items, PageState::default());
        let view = list_view(items.clone())
            .intro("Work Orders")
            .page(PageInfo::of(&page))
            .total_count(2)
            .filter_summary("search \"wo\"")
            .warning("heads up")
            .build();

        let out = render_list(&view, TextMode::Plain).unwrap();
        let expected = "\
Work Orders

ID     CLIENT
─────  ────────────────
WO-1   Acme
WO-10  Initech Holdings

Showing 1-2 of 2 (page 1 of 1)
Filtered by: search \"wo\"
warning: heads up
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_empty_list_has_no_table() {
        let rows: Vec<Value> = Vec::new();
        let page = paginate(&rows, PageState::default());
        let view = list_view(Vec::<Value>::new())
            .page(PageInfo::of(&page))
            .total_count(0)
            .build();
        let out = render_list(&view, TextMode::Plain).unwrap();
        assert_eq!(out, "No matching records\n");
    }

    #[test]
    fn test_styled_output_has_ansi_codes() {
        let view = list_view(vec![json!({"id": 1})]).intro("Bids").build();
        let out = render_list(&view, TextMode::Styled).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(console::strip_ansi_codes(&out).starts_with("Bids\n\nID\n"));
    }
}
