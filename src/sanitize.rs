use log::debug;

use crate::model::Table;

/// Drops rows whose metric value is missing or negative. Zero survives here;
/// trend clipping removes it later, after aggregation.
pub fn sanitize_values(table: Table) -> Table {
    let total = table.len();
    let rows = table
        .rows
        .into_iter()
        .filter(|row| row.metric_value().is_some_and(|value| value >= 0.0))
        .collect::<Vec<_>>();
    let dropped = total - rows.len();
    if dropped > 0 {
        debug!("Dropped {dropped} row(s) with a missing or negative metric value");
    }
    Table::new(table.layout, rows)
}
