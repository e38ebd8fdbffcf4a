//! Core data model for the sprocgen stored-procedure generator.
//!
//! This crate holds the driver-independent pieces of the pipeline:
//! the table model read from the database, the per-action column
//! filtering, WHERE clause synthesis, and assembly of the final
//! [`StoredProcedureStructure`] for each requested [`Action`].

mod action;
mod condition;
mod file;
mod filter;
mod procedure;
mod table;

pub use action::Action;
pub use condition::where_condition;
pub use file::File;
pub use filter::filter_columns_by_action;
pub use procedure::{StoredProcedureStructure, assemble};
pub use table::{Column, Table};
