//! CSV export of selection results.
//!
//! Rows keep the order of the series or comparison passed in. Output is UTF-8
//! with a literal header: `year,metric_value` for trends and
//! `Group,metric_value` for group comparisons.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};

use crate::{
    io_utils,
    model::{GroupComparison, TrendSeries},
    selection::SelectionResult,
};

pub const TREND_HEADER: [&str; 2] = ["year", "metric_value"];
pub const GROUP_HEADER: [&str; 2] = ["Group", "metric_value"];

pub fn write_trend_csv<W: Write>(writer: &mut csv::Writer<W>, series: &TrendSeries) -> Result<()> {
    writer.write_record(TREND_HEADER)?;
    for point in series.points() {
        writer.write_record([point.year.to_string(), point.value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_comparison_csv<W: Write>(
    writer: &mut csv::Writer<W>,
    comparison: &GroupComparison,
) -> Result<()> {
    writer.write_record(GROUP_HEADER)?;
    for entry in &comparison.groups {
        writer.write_record([entry.group.clone(), entry.value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_result_csv<W: Write>(writer: &mut csv::Writer<W>, result: &SelectionResult) -> Result<()> {
    match result {
        SelectionResult::Trend { series, .. } => write_trend_csv(writer, series),
        SelectionResult::SingleYearComparison { comparison, .. } => {
            write_comparison_csv(writer, comparison)
        }
        SelectionResult::Empty => write_trend_csv(writer, &TrendSeries::default()),
    }
}

/// Serializes a selection result into CSV bytes.
pub fn serialize_csv(result: &SelectionResult) -> Result<Vec<u8>> {
    let mut writer = io_utils::csv_writer_builder().from_writer(Vec::new());
    write_result_csv(&mut writer, result)?;
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("Finishing CSV export: {}", err.error()))
}

/// Writes the export to `path`, or stdout for `-`.
pub fn export_to_path(path: &Path, result: &SelectionResult) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(Some(path))?;
    write_result_csv(&mut writer, result).with_context(|| format!("Writing export to {path:?}"))
}
