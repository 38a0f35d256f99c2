//! Distinct selector values offered to the user.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{Row, Table};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectorOptions {
    pub metrics: Vec<String>,
    pub sexes: Vec<String>,
    pub races: Vec<String>,
    pub years: Vec<i32>,
}

fn distinct<'a>(table: &'a Table, label: impl Fn(&'a Row) -> Option<&'a str>) -> Vec<String> {
    table
        .rows()
        .iter()
        .filter_map(label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted distinct metric names, sex and race/ethnicity labels, and years.
pub fn selector_options(table: &Table) -> SelectorOptions {
    SelectorOptions {
        metrics: distinct(table, Row::metric_name),
        sexes: distinct(table, Row::sex),
        races: distinct(table, Row::race_ethnicity),
        years: table
            .rows()
            .iter()
            .map(|row| row.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowFields;

    #[test]
    fn selector_options_are_sorted_and_unique() {
        let rows = [("b", "Male", 2020), ("a", "Female", 2019), ("b", "Female", 2020)]
            .into_iter()
            .map(|(metric, sex, year)| {
                Row::new(
                    year,
                    RowFields {
                        metric_name: Some(metric.into()),
                        sex: Some(sex.into()),
                        ..RowFields::default()
                    },
                )
            })
            .collect();
        let options = selector_options(&Table::new(Default::default(), rows));
        assert_eq!(options.metrics, vec!["a", "b"]);
        assert_eq!(options.sexes, vec!["Female", "Male"]);
        assert!(options.races.is_empty());
        assert_eq!(options.years, vec![2019, 2020]);
    }
}
