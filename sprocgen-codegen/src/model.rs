//! Template contexts.

use serde::Serialize;
use sprocgen_core::{Action, Column, StoredProcedureStructure};

/// Context for action and parameter-section templates.
#[derive(Debug, Clone, Serialize)]
pub struct ActionModel<'a> {
    pub table_name: &'a str,
    pub action: Action,
    /// Columns taking part in the statement.
    pub columns: &'a [Column],
    /// Every column of the table, in catalog order.
    pub all_columns: &'a [Column],
}

/// Context for the driver's `procedure.tmpl`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcedureModel<'a> {
    /// Base name plus action suffix, e.g. `sp_users_select`.
    pub procedure_name: String,
    pub table_name: &'a str,
    pub action: Action,
    /// Driver-specific name of an `action` parameter.
    pub action_parameter: &'a str,
    pub returns_rows: bool,
    pub structure: &'a StoredProcedureStructure,
}
