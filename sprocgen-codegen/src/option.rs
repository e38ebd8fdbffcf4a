//! Run-level generation options.

use sprocgen_core::Action;
use sprocgen_schema::Driver;

use crate::{ParameterNamer, Result, TemplateSettings};

/// Controls how stored procedures are generated. Built once per run.
#[derive(Debug, Clone)]
pub struct GenerateOption {
    driver: Driver,
    procedure_name: String,
    actions: Vec<Action>,
    action_parameter: String,
    template: TemplateSettings,
}

impl GenerateOption {
    /// Create options for `driver`.
    ///
    /// Requested actions are deduplicated and put in generation order.
    /// The driver's parameter template is used to name the `action`
    /// parameter, so it must exist.
    pub fn new(
        driver: Driver,
        procedure_name: impl Into<String>,
        actions: impl IntoIterator<Item = Action>,
        template: TemplateSettings,
    ) -> Result<Self> {
        let requested: Vec<Action> = actions.into_iter().collect();
        let actions = Action::GENERATION_ORDER
            .into_iter()
            .filter(|a| requested.contains(a))
            .collect();
        let action_parameter = ParameterNamer::new(&template, driver).parameter_name("action")?;

        Ok(Self {
            driver,
            procedure_name: procedure_name.into(),
            actions,
            action_parameter,
            template,
        })
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    /// Procedure base name, without action suffix.
    pub fn procedure_name(&self) -> &str {
        &self.procedure_name
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn action_parameter(&self) -> &str {
        &self.action_parameter
    }

    pub fn template(&self) -> &TemplateSettings {
        &self.template
    }

    /// Full procedure name for an action, e.g. `sp_users_delete`.
    pub fn procedure_name_for(&self, action: Action) -> String {
        format!("{}{}", self.procedure_name, action.suffix())
    }
}
