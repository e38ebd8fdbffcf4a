//! Template rendering and stored-procedure generation for sprocgen.
//!
//! # Module Organization
//!
//! - [`template`] - The substitution language used by template files
//! - [`settings`] - Template file layout on disk
//! - [`naming`] - Column name to bound parameter name conversion
//! - [`generator`] - Per-action generation and procedure rendering

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
pub mod generator;
mod model;
pub mod naming;
mod option;
pub mod settings;
pub mod template;

pub use error::{Error, Result, SourceContext};
pub use generator::{GeneratedProcedure, Generator};
pub use model::{ActionModel, ProcedureModel};
pub use naming::ParameterNamer;
pub use option::GenerateOption;
pub use settings::TemplateSettings;
