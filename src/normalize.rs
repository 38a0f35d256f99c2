//! Year normalization.
//!
//! Source feeds mix year formats (`2019`, `"2019 (est.)"`, `FY2020`, `2019.0`).
//! The first run of four ASCII digits is taken as the year; rows without one,
//! or whose run has a leading zero (`0999`), are dropped rather than reported.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::model::{RawTable, Row, Table};

static YEAR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn year_pattern() -> &'static Regex {
    YEAR_PATTERN.get_or_init(|| Regex::new(r"[0-9]{4}").expect("year pattern is valid"))
}

const MIN_YEAR: i32 = 1000;

/// Returns the first four-digit run in `raw` as an integer. A run below 1000
/// does not make a four-digit year and is rejected.
pub fn extract_year(raw: &str) -> Option<i32> {
    year_pattern()
        .find(raw)
        .and_then(|found| found.as_str().parse().ok())
        .filter(|year| *year >= MIN_YEAR)
}

pub fn normalize_years(raw: RawTable) -> Table {
    let total = raw.rows.len();
    let rows = raw
        .rows
        .into_iter()
        .filter_map(|row| extract_year(&row.year).map(|year| Row::new(year, row.fields)))
        .collect::<Vec<_>>();
    let dropped = total - rows.len();
    if dropped > 0 {
        debug!("Dropped {dropped} row(s) without a four-digit year");
    }
    Table::new(raw.layout, rows)
}
