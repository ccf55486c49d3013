//! Slash-command definitions.
//!
//! Definitions are what the gateway registers with the chat platform. Options
//! backed by a Dynmap catalog are offered as static choices when the catalog
//! fits the platform limit, and switch to autocomplete when it does not.

use serde::Serialize;

use crate::dynmap::{CatalogEntry, Suggestion, MAX_SUGGESTIONS};

/// Type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// A subcommand with its own options.
    SubCommand,
    /// Free or choice-restricted text.
    String,
    /// Whole number.
    Integer,
}

/// One option of a command definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDefinition {
    /// Option type.
    #[serde(rename = "type")]
    pub kind: OptionKind,

    /// Option name.
    pub name: String,

    /// Help text shown by the platform.
    pub description: String,

    /// Whether the user must fill it in.
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,

    /// Static choices; empty means free input.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Suggestion>,

    /// Whether the platform should ask for suggestions while typing.
    #[serde(skip_serializing_if = "is_false")]
    pub autocomplete: bool,

    /// Child options (subcommands only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Self>,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

impl OptionDefinition {
    fn new(kind: OptionKind, name: &str, description: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            description: description.to_string(),
            required: false,
            choices: Vec::new(),
            autocomplete: false,
            options: Vec::new(),
        }
    }

    /// A text option.
    #[must_use]
    pub fn string(name: &str, description: &str) -> Self {
        Self::new(OptionKind::String, name, description)
    }

    /// An integer option.
    #[must_use]
    pub fn integer(name: &str, description: &str) -> Self {
        Self::new(OptionKind::Integer, name, description)
    }

    /// A subcommand holding `options`.
    #[must_use]
    pub fn subcommand(name: &str, description: &str, options: Vec<Self>) -> Self {
        Self {
            options,
            ..Self::new(OptionKind::SubCommand, name, description)
        }
    }

    /// Marks the option as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Offers `entries` as choices, or enables autocomplete if there are more
    /// than the platform accepts.
    #[must_use]
    pub fn with_catalog<E: CatalogEntry>(mut self, entries: &[E]) -> Self {
        if entries.len() > MAX_SUGGESTIONS {
            self.autocomplete = true;
            self.choices.clear();
        } else {
            self.choices = entries.iter().map(Suggestion::from_entry).collect();
        }
        self
    }
}

/// A top-level slash command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDefinition {
    /// Command name.
    pub name: String,

    /// Help text shown by the platform.
    pub description: String,

    /// Options or subcommands.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDefinition>,
}

impl CommandDefinition {
    /// Creates a command without options.
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            options: Vec::new(),
        }
    }

    /// Adds options.
    #[must_use]
    pub fn with_options(mut self, options: Vec<OptionDefinition>) -> Self {
        self.options = options;
        self
    }

    /// Finds a top-level option by name.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|option| option.name == name)
    }
}
