//! Stored-procedure generation.

use std::path::PathBuf;

use sprocgen_core::{
    Action, Column, File, StoredProcedureStructure, Table, assemble, filter_columns_by_action,
    where_condition,
};

use crate::{
    GenerateOption, Result,
    model::{ActionModel, ProcedureModel},
    template::Template,
};

/// Permission bits for written procedure files.
pub const OUTPUT_FILE_MODE: u32 = 0o755;

/// A fully rendered stored procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProcedure {
    pub action: Action,
    /// Name including the action suffix, e.g. `sp_users_insert`.
    pub procedure_name: String,
    pub content: String,
}

impl GeneratedProcedure {
    /// Output path for this procedure: `<base><suffix>.sql`.
    pub fn output_path(&self, base: &str) -> PathBuf {
        PathBuf::from(format!("{}{}.sql", base, self.action.suffix()))
    }

    /// The file to write for this procedure under `base`.
    pub fn file(&self, base: &str) -> File {
        File::new(self.output_path(base), self.content.clone()).with_mode(OUTPUT_FILE_MODE)
    }
}

/// Renders stored procedures for one table.
pub struct Generator<'a> {
    option: &'a GenerateOption,
}

impl<'a> Generator<'a> {
    pub fn new(option: &'a GenerateOption) -> Self {
        Self { option }
    }

    /// Render every requested action into a complete procedure.
    pub fn generate(&self, table: &Table) -> Result<Vec<GeneratedProcedure>> {
        self.generate_sql(table)?
            .iter()
            .map(|structure| self.render_procedure(table, structure))
            .collect()
    }

    /// Build the procedure parts for every requested action.
    pub fn generate_sql(&self, table: &Table) -> Result<Vec<StoredProcedureStructure>> {
        self.option
            .actions()
            .iter()
            .map(|&action| self.generate_action(table, action))
            .collect()
    }

    fn generate_action(&self, table: &Table, action: Action) -> Result<StoredProcedureStructure> {
        let settings = self.option.template();
        let filtered = filter_columns_by_action(action, &table.columns);

        let query = Template::load(&settings.template_file_for(action))?.render(&ActionModel {
            table_name: &table.table_name,
            action,
            columns: &filtered,
            all_columns: &table.columns,
        })?;

        // Updates take every column as a parameter: keys select the row,
        // the rest supply new values.
        let columns: &[Column] = match action {
            Action::Update => &table.columns,
            Action::Select | Action::Insert | Action::Delete => &filtered,
        };

        let parameter_section = Template::load(&settings.parameter_section_file(self.option.driver()))?
            .render(&ActionModel {
                table_name: &table.table_name,
                action,
                columns,
                all_columns: &table.columns,
            })?;

        tracing::debug!(
            %action,
            columns = filtered.len(),
            parameters = columns.len(),
            "rendered query"
        );

        Ok(assemble(action, query.trim_end(), where_condition(columns))
            .with_parameter_section(parameter_section.trim_end()))
    }

    /// Wrap procedure parts with the driver's procedure template.
    pub fn render_procedure(
        &self,
        table: &Table,
        structure: &StoredProcedureStructure,
    ) -> Result<GeneratedProcedure> {
        let procedure_name = self.option.procedure_name_for(structure.action);
        let template = Template::load(&self.option.template().procedure_file(self.option.driver()))?;

        let content = template.render(&ProcedureModel {
            procedure_name: procedure_name.clone(),
            table_name: &table.table_name,
            action: structure.action,
            action_parameter: self.option.action_parameter(),
            returns_rows: structure.action.returns_rows(),
            structure,
        })?;
        tracing::debug!(procedure = %procedure_name, template = template.name(), "rendered procedure");

        Ok(GeneratedProcedure {
            action: structure.action,
            procedure_name,
            content,
        })
    }
}
