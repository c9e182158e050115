//! The configuration manifest: an ordered set of options bound to one
//! backing table.
//!
//! Built once per feature at process start and never mutated. Building
//! validates what the runtime cannot: the option list is non-empty and
//! no two options target the same column.

use steward_types::error::ManifestError;

use super::option::ConfigOption;

/// Correlation token of the drill-down selector itself.
pub const MAIN_MENU_ID: &str = "config-main-menu";

/// Immutable, ordered, non-empty set of options for one table.
#[derive(Debug, Clone)]
pub struct Manifest {
    table: String,
    options: Vec<ConfigOption>,
}

impl Manifest {
    /// Bind `options` to `table`, validating the set.
    ///
    /// Fails only on programmer error; callers assert success at
    /// startup.
    pub fn build(
        table: impl Into<String>,
        options: Vec<ConfigOption>,
    ) -> Result<Self, ManifestError> {
        if options.is_empty() {
            return Err(ManifestError::Empty);
        }

        for (i, option) in options.iter().enumerate() {
            if options[..i].iter().any(|o| o.column() == option.column()) {
                return Err(ManifestError::DuplicateColumn(option.column().to_string()));
            }
        }

        Ok(Self {
            table: table.into(),
            options,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn options(&self) -> &[ConfigOption] {
        &self.options
    }

    /// Every column the manifest addresses, in manifest order.
    pub fn columns(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| o.column().to_string())
            .collect()
    }

    /// Resolve a correlation token (`config-message-<column>`) back to
    /// its option.
    pub fn option_by_token(&self, token: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.custom_id(None) == token)
    }
}
