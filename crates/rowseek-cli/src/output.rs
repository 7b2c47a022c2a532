//! Rendering a result page as JSON or as an aligned text table.

use std::borrow::Cow;

use anyhow::Result;
use clap::ValueEnum;
use rowseek::{json_value, PageInfo, TableConfig};
use serde::Serialize;
use serde_json::Value as JsonValue;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::input::{JsonRow, Table};

/// Widest a text cell may get before it is truncated.
pub const MAX_CELL_WIDTH: usize = 40;

const GAP: &str = "  ";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"rows": [...], "total": n, "page": {...}}`
    Json,
    /// Aligned columns with an `x-y of n` footer.
    Text,
}

/// A column of the text table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextColumn {
    pub field: String,
    pub header: String,
}

/// The columns to show: the config's, or every field the input had.
pub fn text_columns(config: &TableConfig, table: &Table) -> Vec<TextColumn> {
    if config.columns.is_empty() {
        table
            .headers
            .iter()
            .map(|field| TextColumn {
                field: field.clone(),
                header: field.clone(),
            })
            .collect()
    } else {
        config
            .columns
            .iter()
            .map(|column| TextColumn {
                field: column.id.clone(),
                header: column.header().to_string(),
            })
            .collect()
    }
}

#[derive(Serialize)]
struct PageDocument<'a> {
    rows: &'a [&'a JsonRow],
    total: usize,
    page: &'a PageInfo,
}

/// Renders the page as pretty-printed JSON.
pub fn render_json(rows: &[&JsonRow], info: &PageInfo) -> Result<String> {
    let document = PageDocument {
        rows,
        total: info.total,
        page: info,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Renders the page as a text table followed by a pagination footer.
pub fn render_text(columns: &[TextColumn], rows: &[&JsonRow], info: &PageInfo) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| truncate_to_width(&cell_text(row.get(&column.field)), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(column.header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    if !columns.is_empty() {
        let headers: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();
        push_line(&mut out, &headers, &widths);
        let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rules, &widths);
        for row in &cells {
            push_line(&mut out, row, &widths);
        }
    }

    out.push_str(&format!(
        "{info} (page {} of {})",
        info.page + 1,
        info.total_pages
    ));
    out
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        let cell = cell.as_ref();
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Display text of a JSON cell; null and missing cells are blank.
fn cell_text(value: Option<&JsonValue>) -> Cow<'_, str> {
    let Some(value) = value else {
        return Cow::Borrowed("");
    };
    match json_value(value).to_text() {
        Some(text) => text,
        None if value.is_null() => Cow::Borrowed(""),
        None => Cow::Owned(value.to_string()),
    }
}

/// Truncates to a display width, marking the cut with `…`.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let limit = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut current = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > limit {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push('…');
    result
}
