//! Stored-procedure actions.

use std::fmt;

use serde::Serialize;

/// A statement kind a stored procedure can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Select,
    Insert,
    Update,
    Delete,
}

impl Action {
    /// Order in which actions are generated, independent of the order
    /// they were requested in.
    pub const GENERATION_ORDER: [Action; 4] =
        [Action::Select, Action::Delete, Action::Insert, Action::Update];

    /// Returns the action identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Select => "select",
            Action::Insert => "insert",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// Suffix appended to the procedure base name and output file path.
    pub fn suffix(&self) -> &'static str {
        match self {
            Action::Select => "_select",
            Action::Insert => "_insert",
            Action::Update => "_update",
            Action::Delete => "_delete",
        }
    }

    /// File name of the query template, relative to the template root.
    pub fn template_file(&self) -> &'static str {
        match self {
            Action::Select => "select.tmpl",
            Action::Insert => "insert.tmpl",
            Action::Update => "update.tmpl",
            Action::Delete => "delete.tmpl",
        }
    }

    /// Whether the generated statement carries a WHERE clause.
    pub fn has_where_clause(&self) -> bool {
        match self {
            Action::Select | Action::Update | Action::Delete => true,
            Action::Insert => false,
        }
    }

    /// Whether the generated statement produces a result set.
    pub fn returns_rows(&self) -> bool {
        match self {
            Action::Select => true,
            Action::Insert | Action::Update | Action::Delete => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
