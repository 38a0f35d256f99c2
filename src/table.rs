use std::borrow::Cow;
use std::fmt::Write as _;

use crate::{
    data::format_number,
    model::{GroupComparison, TrendSeries},
};

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator_cells, &separator_widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

pub fn render_trend(series: &TrendSeries) -> String {
    let headers = vec!["year".to_string(), "metric_value".to_string()];
    let rows = series
        .points()
        .iter()
        .map(|point| vec![point.year.to_string(), format_number(point.value)])
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

pub fn render_comparison(comparison: &GroupComparison) -> String {
    let headers = vec!["Group".to_string(), "metric_value".to_string()];
    let rows = comparison
        .groups
        .iter()
        .map(|entry| vec![entry.group.clone(), format_number(entry.value)])
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate().take(widths.len()) {
        let sanitized = sanitize_cell(value);
        let padding = widths[idx].saturating_sub(display_width(sanitized.as_ref()));
        let mut cell = sanitized.into_owned();
        cell.push_str(&" ".repeat(padding));
        cells.push(cell);
    }
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
