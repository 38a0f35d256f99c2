//! Fallback selection between trend and single-year views.
//!
//! [`select`] is the one decision function behind every user selection. It
//! tries the trend the user asked for and, when that yields nothing, widens
//! step by step:
//!
//! | filtered trend | metric-only trend | result                                  |
//! |----------------|-------------------|-----------------------------------------|
//! | ≥ 2 points     | –                 | `Trend`, [`Scope::Full`]                |
//! | 1 point        | –                 | `Trend`, [`Scope::Full`] (single point) |
//! | empty          | ≥ 2 points        | `Trend`, [`Scope::Widened`]             |
//! | empty          | 1 point (year Y)  | `SingleYearComparison` for Y            |
//! | empty          | empty             | `Empty`                                 |
//!
//! "No data" is a result variant, never an error.

use log::debug;
use serde::Serialize;

use crate::{
    aggregate::{group_comparison, trend_by_year},
    model::{Filters, GroupComparison, Table, TrendSeries},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub metric: String,
    pub sex: Option<String>,
    pub race_ethnicity: Option<String>,
}

impl Selection {
    pub fn new(metric: impl Into<String>, sex: Option<&str>, race_ethnicity: Option<&str>) -> Self {
        Self {
            metric: metric.into(),
            sex: sex.map(str::to_string),
            race_ethnicity: race_ethnicity.map(str::to_string),
        }
    }

    pub fn filters(&self) -> Filters {
        Filters::new(self.sex.as_deref(), self.race_ethnicity.as_deref())
    }
}

/// Which demographic filters a trend honors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Scope {
    Full,
    /// The requested filters matched nothing and were dropped.
    Widened { dropped: Filters },
}

impl Scope {
    pub fn is_widened(&self) -> bool {
        matches!(self, Scope::Widened { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionResult {
    Trend {
        series: TrendSeries,
        #[serde(flatten)]
        scope: Scope,
    },
    SingleYearComparison {
        comparison: GroupComparison,
        year: i32,
    },
    Empty,
}

impl SelectionResult {
    pub fn is_empty(&self) -> bool {
        matches!(self, SelectionResult::Empty)
    }

    pub fn trend(&self) -> Option<&TrendSeries> {
        match self {
            SelectionResult::Trend { series, .. } => Some(series),
            _ => None,
        }
    }
}

pub fn select(table: &Table, selection: &Selection) -> SelectionResult {
    let metric = selection.metric.as_str();
    let filters = selection.filters();
    let series = trend_by_year(table, metric, &filters);
    if !series.is_empty() {
        debug!(
            "Selection {:?}: filtered trend has {} point(s)",
            selection,
            series.len()
        );
        return SelectionResult::Trend {
            series,
            scope: Scope::Full,
        };
    }

    let widened = trend_by_year(table, metric, &Filters::none());
    match widened.len() {
        0 => {
            debug!("Selection {:?}: no data for metric", selection);
            SelectionResult::Empty
        }
        1 => {
            let year = widened.points()[0].year;
            debug!(
                "Selection {:?}: single year {} available, comparing groups",
                selection, year
            );
            SelectionResult::SingleYearComparison {
                comparison: group_comparison(table, metric, year),
                year,
            }
        }
        _ => {
            debug!(
                "Selection {:?}: filters matched nothing, widened to {} point(s)",
                selection,
                widened.len()
            );
            SelectionResult::Trend {
                series: widened,
                scope: Scope::Widened { dropped: filters },
            }
        }
    }
}
