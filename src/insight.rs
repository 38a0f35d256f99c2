//! Percent-change insight over a trend series and its one-line summary.

use heck::ToTitleCase;
use serde::Serialize;

use crate::{
    model::TrendSeries,
    selection::{Scope, Selection, SelectionResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PercentChange {
    Defined { percent: f64 },
    /// Fewer than two points; a trend cannot be measured.
    InsufficientData,
    /// The first value is zero; only the absolute change is meaningful.
    ZeroBaseline { absolute_change: f64 },
}

impl PercentChange {
    pub fn value(&self) -> Option<f64> {
        match self {
            PercentChange::Defined { percent } => Some(*percent),
            _ => None,
        }
    }
}

pub fn percent_change(series: &TrendSeries) -> PercentChange {
    let [first, .., last] = series.points() else {
        return PercentChange::InsufficientData;
    };
    if first.value == 0.0 {
        return PercentChange::ZeroBaseline {
            absolute_change: last.value - first.value,
        };
    }
    PercentChange::Defined {
        percent: (last.value - first.value) / first.value * 100.0,
    }
}

/// `diabetes_rate` → `Diabetes Rate`.
pub fn display_metric_name(metric: &str) -> String {
    metric.to_title_case()
}

fn spoken_metric_name(metric: &str) -> String {
    metric.replace('_', " ")
}

/// `race, sex` for whichever demographic filters the selection sets.
pub(crate) fn audience_label(selection: &Selection) -> Option<String> {
    let parts = [
        selection.race_ethnicity.as_deref(),
        selection.sex.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Renders the user-facing message for a selection result.
pub fn summarize(selection: &Selection, result: &SelectionResult) -> String {
    let metric = spoken_metric_name(&selection.metric);
    match result {
        SelectionResult::Empty => "No data available for this selection.".to_string(),
        SelectionResult::SingleYearComparison { comparison, year } => format!(
            "Only one year of data available ({year}); comparing {} demographic group(s) for {metric}.",
            comparison.len()
        ),
        SelectionResult::Trend { series, scope } => {
            let who = (!scope.is_widened())
                .then(|| audience_label(selection))
                .flatten();
            let subject = match who {
                Some(who) => format!("{metric} for {who}"),
                None => metric,
            };
            let mut message = match (series.first(), series.last(), percent_change(series)) {
                (Some(first), Some(last), PercentChange::Defined { percent }) => format!(
                    "From {} to {}, {subject} changed by {percent:.1}%.",
                    first.year, last.year
                ),
                (Some(first), Some(last), PercentChange::ZeroBaseline { absolute_change }) => {
                    format!(
                        "From {} to {}, {subject} changed by {absolute_change:+.2} from a zero baseline.",
                        first.year, last.year
                    )
                }
                _ => "Only one year of data available.".to_string(),
            };
            if let Scope::Widened { dropped } = scope {
                let requested = [dropped.race_ethnicity.as_deref(), dropped.sex.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(", ");
                message.push_str(&format!(
                    " No rows matched {requested}; showing all demographics."
                ));
            }
            message
        }
    }
}
