use serde::Serialize;

/// A table column as described by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name as it appears in the table.
    pub column_name: String,
    /// SQL type including any length suffix, e.g. `varchar(50)`.
    pub column_type: String,
    /// Whether the column is part of the primary key.
    pub is_primary_key: bool,
    /// Driver-specific bound parameter name, e.g. `@id`.
    pub parameter_name: String,
}

impl Column {
    pub fn new(
        column_name: impl Into<String>,
        column_type: impl Into<String>,
        is_primary_key: bool,
        parameter_name: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            column_type: column_type.into(),
            is_primary_key,
            parameter_name: parameter_name.into(),
        }
    }
}

/// A table and its columns, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub table_name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(table_name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }
}
