//! Bound parameter naming.

use std::path::PathBuf;

use sprocgen_core::{Column, Table};
use sprocgen_schema::{Driver, TableDescription};

use crate::{Result, TemplateSettings, template::Template};

/// Turns column names into driver-specific parameter names using the
/// driver's `parameterConvert.tmpl`.
///
/// The template is read from disk on every call.
#[derive(Debug, Clone)]
pub struct ParameterNamer {
    template_file: PathBuf,
}

impl ParameterNamer {
    pub fn new(settings: &TemplateSettings, driver: Driver) -> Self {
        Self {
            template_file: settings.parameter_convert_file(driver),
        }
    }

    /// Render the parameter name for `column_name`, e.g. `id` -> `@id`.
    pub fn parameter_name(&self, column_name: &str) -> Result<String> {
        let template = Template::load(&self.template_file)?;
        let name = template.render(column_name)?;
        Ok(name.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Build the table model, naming the parameter of every column.
    pub fn name_table(&self, description: &TableDescription) -> Result<Table> {
        let columns = description
            .columns
            .iter()
            .map(|c| {
                Ok(Column::new(
                    &c.name,
                    &c.column_type,
                    c.is_primary_key,
                    self.parameter_name(&c.name)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Table::new(&description.name, columns))
    }
}
