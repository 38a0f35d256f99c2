//! Source loading and column validation.
//!
//! [`read_raw`] turns a CSV source into a [`RawTable`] and keeps only the known
//! columns that the header actually carries. [`load`] runs the whole cleaning
//! pipeline (read, year normalization, value sanitization) and returns the
//! [`Table`] that the selection engine works on.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info, warn};

use crate::{
    data::parse_number,
    error::LoadError,
    io_utils,
    model::{RawRow, RawTable, RowFields, Table},
    normalize::normalize_years,
    sanitize::sanitize_values,
    schema::{Column, ColumnLayout},
};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Field delimiter; resolved from the file extension when `None`.
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

/// Reads, normalizes and sanitizes `source` into an analysis-ready table.
pub fn load(source: &Path, options: &LoadOptions) -> Result<Table, LoadError> {
    let raw = read_raw(source, options)?;
    let read = raw.rows.len();
    let table = sanitize_values(normalize_years(raw));
    info!(
        "Loaded {} of {} row(s) from {:?} across {} known column(s)",
        table.len(),
        read,
        source,
        table.layout.present().len()
    );
    Ok(table)
}

pub fn read_raw(source: &Path, options: &LoadOptions) -> Result<RawTable, LoadError> {
    let delimiter = io_utils::resolve_input_delimiter(source, options.delimiter);
    let input = io_utils::open_source(source).map_err(|err| LoadError::unavailable(source, err))?;
    let mut reader = io_utils::open_csv_reader(input, delimiter);
    let headers = io_utils::reader_headers(&mut reader, options.encoding)
        .map_err(|err| LoadError::unavailable(source, format!("reading header: {err:#}")))?;

    let layout = ColumnLayout::resolve(&headers);
    if layout.is_empty() {
        return Err(LoadError::Schema {
            source_path: source.to_path_buf(),
            found: headers,
        });
    }
    let missing = layout.missing();
    if !missing.is_empty() {
        let names = missing.iter().map(|c| c.name()).collect::<Vec<_>>();
        warn!(
            "Source {:?} is missing column(s) {}; continuing with the rest",
            source,
            names.join(", ")
        );
    }
    debug!("Resolved column layout {:?}", layout.present());

    let mut rows = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|err| {
            LoadError::unavailable(source, format!("reading row {}: {err}", row_idx + 2))
        })?;
        let decoded = io_utils::decode_record(&record, options.encoding).map_err(|err| {
            LoadError::unavailable(source, format!("decoding row {}: {err:#}", row_idx + 2))
        })?;
        rows.push(raw_row(&layout, &decoded));
    }
    Ok(RawTable { layout, rows })
}

/// Builds a [`RawRow`] from one decoded record. Absent columns and blank
/// fields become `None`; numeric fields that fail to parse do too.
pub fn raw_row(layout: &ColumnLayout, record: &[String]) -> RawRow {
    let text = |column| layout.field(column, record).map(str::to_string);
    let number = |column| layout.field(column, record).and_then(parse_number);
    RawRow {
        year: layout
            .field(Column::Year, record)
            .unwrap_or_default()
            .to_string(),
        fields: RowFields {
            sex: text(Column::Sex),
            race_ethnicity: text(Column::RaceEthnicity),
            age_category: text(Column::AgeCategory),
            metric_name: text(Column::MetricName),
            metric_value: number(Column::MetricValue),
            lower_bound: number(Column::LowerBound),
            upper_bound: number(Column::UpperBound),
            source: text(Column::Source),
            category: text(Column::Category),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn raw_row_reads_present_columns_only() {
        let layout = ColumnLayout::resolve(&record(&["metric_name", "year", "metric_value"]));
        let row = raw_row(&layout, &record(&["diabetes_rate", "FY2020", "12.5"]));
        assert_eq!(row.year, "FY2020");
        assert_eq!(row.fields.metric_name.as_deref(), Some("diabetes_rate"));
        assert_eq!(row.fields.metric_value, Some(12.5));
        assert_eq!(row.fields.sex, None);
        assert_eq!(row.fields.lower_bound, None);
    }

    #[test]
    fn raw_row_marks_unparseable_numbers_missing() {
        let layout = ColumnLayout::resolve(&record(&["year", "metric_value", "upper_bound"]));
        let row = raw_row(&layout, &record(&["2019", "N/A", "x"]));
        assert_eq!(row.fields.metric_value, None);
        assert_eq!(row.fields.upper_bound, None);
    }
}
