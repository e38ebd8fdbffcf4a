//! Assembly of per-action stored-procedure parts.

use serde::Serialize;

use crate::Action;

/// The rendered parts of one stored procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredProcedureStructure {
    pub action: Action,
    /// Parameter declarations, e.g. `@id int, @name varchar(50)`.
    pub parameter_section: String,
    /// Statement body without its WHERE clause.
    pub query: String,
    /// WHERE clause; always empty for [`Action::Insert`].
    pub where_condition: String,
}

impl StoredProcedureStructure {
    /// Attach the rendered parameter declarations.
    pub fn with_parameter_section(mut self, parameter_section: impl Into<String>) -> Self {
        self.parameter_section = parameter_section.into();
        self
    }
}

/// Combine a rendered query and WHERE clause for `action`.
///
/// Inserts never carry a WHERE clause: the supplied condition is dropped.
/// Every other action keeps it unchanged.
pub fn assemble(
    action: Action,
    query: impl Into<String>,
    where_condition: impl Into<String>,
) -> StoredProcedureStructure {
    let where_condition = if action.has_where_clause() {
        where_condition.into()
    } else {
        String::new()
    };

    StoredProcedureStructure {
        action,
        parameter_section: String::new(),
        query: query.into(),
        where_condition,
    }
}
