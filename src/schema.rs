//! Expected column set and header resolution.
//!
//! A health-metrics source is a long-format table with up to ten known columns.
//! [`ColumnLayout`] records where each known column sits in a particular file's
//! header. Any subset is accepted; an empty intersection is a schema failure.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Year,
    Sex,
    RaceEthnicity,
    AgeCategory,
    MetricName,
    MetricValue,
    LowerBound,
    UpperBound,
    Source,
    Category,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Year,
        Column::Sex,
        Column::RaceEthnicity,
        Column::AgeCategory,
        Column::MetricName,
        Column::MetricValue,
        Column::LowerBound,
        Column::UpperBound,
        Column::Source,
        Column::Category,
    ];

    /// Literal header name, matched case-sensitively.
    pub fn name(self) -> &'static str {
        match self {
            Column::Year => "year",
            Column::Sex => "sex",
            Column::RaceEthnicity => "race_ethnicity",
            Column::AgeCategory => "age_category",
            Column::MetricName => "metric_name",
            Column::MetricValue => "metric_value",
            Column::LowerBound => "lower_bound",
            Column::UpperBound => "upper_bound",
            Column::Source => "source",
            Column::Category => "category",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of every known column within a source header, if present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    positions: [Option<usize>; 10],
}

impl ColumnLayout {
    /// Maps header names onto known columns. Unknown headers are ignored and
    /// the first occurrence wins when a name repeats.
    pub fn resolve(headers: &[String]) -> Self {
        let mut positions = [None; 10];
        for (idx, header) in headers.iter().enumerate() {
            let trimmed = header.trim();
            if let Some(column) = Column::ALL.iter().find(|c| c.name() == trimmed) {
                positions[column.slot()].get_or_insert(idx);
            }
        }
        Self { positions }
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions[column.slot()]
    }

    pub fn contains(&self, column: Column) -> bool {
        self.position(column).is_some()
    }

    pub fn present(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.contains(*c))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.iter().all(Option::is_none)
    }

    /// Returns the trimmed field for `column`, or `None` when the column is
    /// absent from the layout, the record is short, or the field is blank.
    pub fn field<'a>(&self, column: Column, record: &'a [String]) -> Option<&'a str> {
        self.position(column)
            .and_then(|idx| record.get(idx))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}
