//! Row, table and aggregate types that flow through the pipeline.
//!
//! Each stage takes ownership of its input and returns a fresh value, so a
//! [`Table`] is never mutated once built:
//!
//! - [`RawTable`] comes straight from the loader, with the year still as text.
//! - [`Table`] has an integer year on every row and, once sanitized, a
//!   non-negative metric value on every row.
//! - [`TrendSeries`] and [`GroupComparison`] are the aggregates that the
//!   selection engine hands to renderers.

use serde::Serialize;

use crate::schema::ColumnLayout;

/// Labels and measurements shared by raw and normalized rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowFields {
    pub sex: Option<String>,
    pub race_ethnicity: Option<String>,
    pub age_category: Option<String>,
    pub metric_name: Option<String>,
    pub metric_value: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub source: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRow {
    /// Year exactly as it appeared in the source, empty when absent.
    pub year: String,
    #[serde(flatten)]
    pub fields: RowFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub year: i32,
    #[serde(flatten)]
    pub fields: RowFields,
}

impl Row {
    pub fn new(year: i32, fields: RowFields) -> Self {
        Self { year, fields }
    }

    pub fn metric_name(&self) -> Option<&str> {
        self.fields.metric_name.as_deref()
    }

    pub fn sex(&self) -> Option<&str> {
        self.fields.sex.as_deref()
    }

    pub fn race_ethnicity(&self) -> Option<&str> {
        self.fields.race_ethnicity.as_deref()
    }

    pub fn metric_value(&self) -> Option<f64> {
        self.fields.metric_value
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub layout: ColumnLayout,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub layout: ColumnLayout,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(layout: ColumnLayout, rows: Vec<Row>) -> Self {
        Self { layout, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

/// Demographic restriction applied to a trend. `None` leaves a key unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_ethnicity: Option<String>,
}

impl Filters {
    pub fn new(sex: Option<&str>, race_ethnicity: Option<&str>) -> Self {
        Self {
            sex: sex.map(str::to_string),
            race_ethnicity: race_ethnicity.map(str::to_string),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.sex.is_none() && self.race_ethnicity.is_none()
    }

    /// A row whose label is absent never satisfies a filter on that label.
    pub fn matches(&self, row: &Row) -> bool {
        let sex_ok = self.sex.as_deref().is_none_or(|want| row.sex() == Some(want));
        let race_ok = self
            .race_ethnicity
            .as_deref()
            .is_none_or(|want| row.race_ethnicity() == Some(want));
        sex_ok && race_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// Points ascending by year, one per year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Builds a series from points already sorted by year with no duplicates.
    pub(crate) fn from_sorted(points: Vec<TrendPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].year < w[1].year));
        Self { points }
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrendPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrendPoint> {
        self.points.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupValue {
    pub group: String,
    pub value: f64,
}

/// One year's demographic groups, ascending by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub year: i32,
    pub groups: Vec<GroupValue>,
}

impl GroupComparison {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Joins sex and race/ethnicity into the `sex|race` label used for groups.
pub fn group_label(sex: Option<&str>, race_ethnicity: Option<&str>) -> String {
    format!("{}|{}", sex.unwrap_or_default(), race_ethnicity.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sex: Option<&str>, race: Option<&str>) -> Row {
        Row::new(
            2020,
            RowFields {
                sex: sex.map(str::to_string),
                race_ethnicity: race.map(str::to_string),
                ..RowFields::default()
            },
        )
    }

    #[test]
    fn filters_require_every_set_key() {
        let filters = Filters::new(Some("Female"), Some("Black"));
        assert!(filters.matches(&row(Some("Female"), Some("Black"))));
        assert!(!filters.matches(&row(Some("Female"), Some("White"))));
        assert!(!filters.matches(&row(None, Some("Black"))));
    }

    #[test]
    fn empty_filters_match_rows_without_labels() {
        assert!(Filters::none().matches(&row(None, None)));
        assert!(Filters::none().is_empty());
    }

    #[test]
    fn group_label_joins_with_pipe() {
        assert_eq!(group_label(Some("Male"), Some("Asian")), "Male|Asian");
        assert_eq!(group_label(None, Some("Asian")), "|Asian");
    }
}
