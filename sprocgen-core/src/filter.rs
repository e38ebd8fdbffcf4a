//! Per-action column selection.

use crate::{Action, Column};

/// Select the columns that take part in the statement generated for `action`.
///
/// - `Insert` and `Update` keep only non-key columns.
/// - `Delete` keeps only primary-key columns.
/// - `Select` keeps every column.
///
/// Relative column order is preserved.
pub fn filter_columns_by_action(action: Action, columns: &[Column]) -> Vec<Column> {
    match action {
        Action::Insert | Action::Update => filter_columns(columns, |c| !c.is_primary_key),
        Action::Delete => filter_columns(columns, |c| c.is_primary_key),
        Action::Select => columns.to_vec(),
    }
}

fn filter_columns(columns: &[Column], keep: impl Fn(&Column) -> bool) -> Vec<Column> {
    columns.iter().filter(|c| keep(c)).cloned().collect()
}
