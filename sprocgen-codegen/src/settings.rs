//! Template file locations.

use std::path::{Path, PathBuf};

use sprocgen_core::Action;
use sprocgen_schema::Driver;

/// Default template root, relative to the working directory.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Parameter declarations for a procedure signature.
pub const PARAMETER_SECTION_FILE: &str = "parameterSection.tmpl";

/// Column name to bound parameter name conversion.
pub const PARAMETER_CONVERT_FILE: &str = "parameterConvert.tmpl";

/// Wraps a rendered statement into a procedure definition.
pub const PROCEDURE_FILE: &str = "procedure.tmpl";

/// Where template files are located.
///
/// Action templates live directly under the root; parameter and procedure
/// templates live in a sub-directory named after the driver:
///
/// ```text
/// templates/
/// ├── select.tmpl  insert.tmpl  update.tmpl  delete.tmpl
/// └── <driver>/
///     ├── parameterSection.tmpl
///     ├── parameterConvert.tmpl
///     └── procedure.tmpl
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSettings {
    folder: PathBuf,
}

impl TemplateSettings {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Query template for an action.
    pub fn template_file_for(&self, action: Action) -> PathBuf {
        self.folder.join(action.template_file())
    }

    pub fn parameter_section_file(&self, driver: Driver) -> PathBuf {
        self.driver_file(driver, PARAMETER_SECTION_FILE)
    }

    pub fn parameter_convert_file(&self, driver: Driver) -> PathBuf {
        self.driver_file(driver, PARAMETER_CONVERT_FILE)
    }

    pub fn procedure_file(&self, driver: Driver) -> PathBuf {
        self.driver_file(driver, PROCEDURE_FILE)
    }

    fn driver_file(&self, driver: Driver, file: &str) -> PathBuf {
        self.folder.join(driver.as_str()).join(file)
    }
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_DIR)
    }
}
