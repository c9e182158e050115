//! The option model: one configurable setting.
//!
//! A [`ConfigOption`] carries a display name and description, the column
//! it persists to, a closed [`OptionKind`] deciding which prompt flow
//! edits it, and optional validate/transform hooks. Options are
//! immutable once a manifest is built.

use std::sync::Arc;

use serde_json::Value;
use steward_types::component::{SelectChoice, TextInputStyle};

/// Prefix shared by every correlation token the engine renders.
const CUSTOM_ID_PREFIX: &str = "config-message";

/// Validation hook. Returns a user-facing rejection reason on failure.
pub type ValidateFn = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Pure value transform applied when crossing the storage boundary.
pub type TransformFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// The closed set of option kinds, each with its own input ritual.
///
/// Adding a kind here forces every `match` in the engine to handle it.
#[derive(Clone)]
pub enum OptionKind {
    /// Edited through a modal with a single text field.
    Text {
        placeholder: Option<String>,
        style: TextInputStyle,
    },
    /// Edited through a toggle button; persisted as a store-side invert.
    Boolean,
    /// Edited through a single-select channel picker.
    Channel { placeholder: Option<String> },
    /// Edited through a single-select role picker.
    Role { placeholder: Option<String> },
    /// Fixed choice list. No prompt flow exists yet; selecting such an
    /// option raises an explicit unsupported error.
    Select {
        placeholder: Option<String>,
        choices: Vec<SelectChoice>,
    },
}

impl OptionKind {
    /// Stable lowercase name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            OptionKind::Text { .. } => "text",
            OptionKind::Boolean => "boolean",
            OptionKind::Channel { .. } => "channel",
            OptionKind::Role { .. } => "role",
            OptionKind::Select { .. } => "select",
        }
    }
}

impl std::fmt::Debug for OptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One configurable setting of a manifest.
#[derive(Clone)]
pub struct ConfigOption {
    name: String,
    description: String,
    column: String,
    kind: OptionKind,
    label: Option<String>,
    emoji: Option<String>,
    required: bool,
    validate: Option<ValidateFn>,
    to_store: Option<TransformFn>,
    from_store: Option<TransformFn>,
}

impl ConfigOption {
    fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        column: impl Into<String>,
        kind: OptionKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            column: column.into(),
            kind,
            label: None,
            emoji: None,
            required: false,
            validate: None,
            to_store: None,
            from_store: None,
        }
    }

    /// A free-text option edited through a modal.
    pub fn text(
        name: impl Into<String>,
        description: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            description,
            column,
            OptionKind::Text {
                placeholder: None,
                style: TextInputStyle::Short,
            },
        )
    }

    /// An on/off option edited through a toggle button.
    pub fn boolean(
        name: impl Into<String>,
        description: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self::new(name, description, column, OptionKind::Boolean)
    }

    /// A channel reference edited through a channel picker.
    pub fn channel(
        name: impl Into<String>,
        description: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            description,
            column,
            OptionKind::Channel { placeholder: None },
        )
    }

    /// A role reference edited through a role picker.
    pub fn role(
        name: impl Into<String>,
        description: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            description,
            column,
            OptionKind::Role { placeholder: None },
        )
    }

    /// A fixed-choice option. Declarable today, editable once the
    /// select prompt flow exists.
    pub fn select(
        name: impl Into<String>,
        description: impl Into<String>,
        column: impl Into<String>,
        choices: Vec<SelectChoice>,
    ) -> Self {
        Self::new(
            name,
            description,
            column,
            OptionKind::Select {
                placeholder: None,
                choices,
            },
        )
    }

    // -----------------------------------------------------------------
    // Builder-style hints
    // -----------------------------------------------------------------

    /// Placeholder text shown in the option's input control.
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        match &mut self.kind {
            OptionKind::Text { placeholder, .. }
            | OptionKind::Channel { placeholder }
            | OptionKind::Role { placeholder }
            | OptionKind::Select { placeholder, .. } => *placeholder = Some(text),
            OptionKind::Boolean => {}
        }
        self
    }

    /// Use a multi-line text input instead of a single line.
    pub fn paragraph(mut self) -> Self {
        if let OptionKind::Text { style, .. } = &mut self.kind {
            *style = TextInputStyle::Paragraph;
        }
        self
    }

    /// Override the button label (falls back to the option name).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Emoji shown before the button label.
    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Mark the option's input as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Validation hook; return `Err(reason)` to reject the input.
    pub fn validate(
        mut self,
        f: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validate = Some(Arc::new(f));
        self
    }

    /// Transform applied when persisting a collected value.
    pub fn to_store(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.to_store = Some(Arc::new(f));
        self
    }

    /// Transform applied when reading the stored value back.
    pub fn from_store(mut self, f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.from_store = Some(Arc::new(f));
        self
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// Button label, falling back to the option name.
    pub fn button_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn emoji_hint(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Correlation token for a control rendered for this option:
    /// `config-message-<column>[-<suffix>]`.
    pub fn custom_id(&self, suffix: Option<&str>) -> String {
        match suffix {
            Some(suffix) => format!("{CUSTOM_ID_PREFIX}-{}-{suffix}", self.column),
            None => format!("{CUSTOM_ID_PREFIX}-{}", self.column),
        }
    }

    /// Run the validation hook. Accepts everything when no hook is set.
    pub fn validate_value(&self, value: &Value) -> Result<(), String> {
        match &self.validate {
            Some(validate) => validate(value),
            None => Ok(()),
        }
    }

    /// Apply the `to_store` transform (identity when unset).
    pub fn encode(&self, value: Value) -> Value {
        match &self.to_store {
            Some(f) => f(value),
            None => value,
        }
    }

    /// Apply the `from_store` transform (identity when unset).
    pub fn decode(&self, value: Value) -> Value {
        match &self.from_store {
            Some(f) => f(value),
            None => value,
        }
    }
}

impl std::fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigOption")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .finish()
    }
}
