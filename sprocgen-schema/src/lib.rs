//! Database schema introspection for sprocgen.
//!
//! Reads a single table's column catalog through `sqlx` (MySQL, PostgreSQL)
//! or `tiberius` (SQL Server) and normalizes it
//! into a [`TableDescription`]: column name, SQL type with its length suffix,
//! and primary-key membership, in catalog order.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod driver;
mod error;
mod reader;

pub use driver::Driver;
pub use error::{DatabaseError, Error, Result};
pub use reader::{SchemaColumn, TableDescription, format_column_type, read_table};
