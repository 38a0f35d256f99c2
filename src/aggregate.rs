//! Mean-by-year trends and mean-by-group comparisons.
//!
//! Both aggregations use the unweighted arithmetic mean of `metric_value` over
//! the matching rows. A key with no matching rows produces no entry at all.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::model::{
    Filters, GroupComparison, GroupValue, Row, Table, TrendPoint, TrendSeries, group_label,
};

/// Exclusive bounds for trend points. Zero and below are feed artifacts, and
/// anything at or past the ceiling is an implausible outlier.
pub const TREND_FLOOR: f64 = 0.0;
pub const TREND_CEILING: f64 = 100_000.0;

#[derive(Debug, Default, Clone, Copy)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn metric_rows<'a>(table: &'a Table, metric: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
    table
        .rows()
        .iter()
        .filter(move |row| row.metric_name() == Some(metric))
}

pub fn trend_by_year(table: &Table, metric: &str, filters: &Filters) -> TrendSeries {
    let mut by_year: BTreeMap<i32, MeanAccumulator> = BTreeMap::new();
    for row in metric_rows(table, metric).filter(|row| filters.matches(row)) {
        if let Some(value) = row.metric_value() {
            by_year.entry(row.year).or_default().add(value);
        }
    }
    let points = by_year
        .into_iter()
        .filter_map(|(year, acc)| acc.mean().map(|value| TrendPoint { year, value }))
        .filter(|point| within_trend_range(point.value))
        .collect();
    TrendSeries::from_sorted(points)
}

fn within_trend_range(value: f64) -> bool {
    value > TREND_FLOOR && value < TREND_CEILING
}

/// Ranks `sex|race_ethnicity` groups for one year, ascending by mean value.
/// Equal means fall back to label order so output is deterministic.
pub fn group_comparison(table: &Table, metric: &str, year: i32) -> GroupComparison {
    let groups = metric_rows(table, metric)
        .filter(|row| row.year == year)
        .filter_map(|row| {
            row.metric_value()
                .map(|value| (group_label(row.sex(), row.race_ethnicity()), value))
        })
        .into_grouping_map()
        .fold(MeanAccumulator::default(), |mut acc, _label, value| {
            acc.add(value);
            acc
        })
        .into_iter()
        .filter_map(|(group, acc)| acc.mean().map(|value| GroupValue { group, value }))
        .sorted_by(|a, b| a.value.total_cmp(&b.value).then_with(|| a.group.cmp(&b.group)))
        .collect();
    GroupComparison { year, groups }
}
