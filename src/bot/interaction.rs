//! Interaction payloads exchanged with the chat gateway.
//!
//! The gateway forwards each slash-command invocation or autocomplete
//! keystroke as one JSON object and expects one JSON object back.
//!
//! # Message Types
//!
//! - **Interaction** (incoming): a command run or an autocomplete request
//! - **Response** (outgoing): a message, a list of choices, or the command
//!   definitions for registration

use serde::{Deserialize, Serialize};

use super::definition::CommandDefinition;
use crate::dynmap::Suggestion;

pub use crate::dynmap::request::{CommandOption, OptionValue};

/// Identifier the gateway uses to match a response to its interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InteractionId {
    /// Numeric id.
    Number(i64),
    /// String id (platform snowflakes).
    String(String),
}

impl std::fmt::Display for InteractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// What the user did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// A submitted slash command.
    Command,
    /// A keystroke in an autocomplete-enabled option.
    Autocomplete,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

/// An incoming interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    /// Gateway-assigned id, echoed in the response.
    pub id: InteractionId,

    /// Command run or autocomplete.
    pub kind: InteractionKind,

    /// Top-level command name.
    pub command: String,

    /// Display name of the invoking user, for logging.
    #[serde(default)]
    pub user: Option<String>,

    /// Top-level options (subcommands for grouped commands).
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl Interaction {
    /// Returns the first subcommand, if any.
    #[must_use]
    pub fn subcommand(&self) -> Option<&CommandOption> {
        self.options.first()
    }

    /// Finds the option being autocompleted, searching one level of
    /// subcommands.
    #[must_use]
    pub fn focused_option(&self) -> Option<&CommandOption> {
        self.options
            .iter()
            .chain(self.options.iter().flat_map(|group| group.options.iter()))
            .find(|option| option.focused)
    }

    /// Display name of the user, or a placeholder.
    #[must_use]
    pub fn user_name(&self) -> &str {
        self.user.as_deref().unwrap_or("<unknown>")
    }
}

/// The body of an outgoing response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseBody {
    /// A chat message.
    Message {
        /// Message text.
        content: String,
        /// Only visible to the invoking user.
        #[serde(skip_serializing_if = "is_false")]
        ephemeral: bool,
    },
    /// Autocomplete choices.
    Choices {
        /// At most 25 display/value pairs.
        choices: Vec<Suggestion>,
    },
    /// Command definitions for bulk registration.
    Definitions {
        /// Every command the bot serves.
        commands: Vec<CommandDefinition>,
    },
}

/// An outgoing response.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    /// The interaction this answers (absent for unsolicited messages).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<InteractionId>,

    /// Response content.
    #[serde(flatten)]
    pub body: ResponseBody,
}

impl Response {
    /// A public message.
    pub fn message(id: InteractionId, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            body: ResponseBody::Message {
                content: content.into(),
                ephemeral: false,
            },
        }
    }

    /// A message only the invoking user sees.
    pub fn ephemeral(id: Option<InteractionId>, content: impl Into<String>) -> Self {
        Self {
            id,
            body: ResponseBody::Message {
                content: content.into(),
                ephemeral: true,
            },
        }
    }

    /// Autocomplete choices.
    #[must_use]
    pub const fn choices(id: InteractionId, choices: Vec<Suggestion>) -> Self {
        Self {
            id: Some(id),
            body: ResponseBody::Choices { choices },
        }
    }

    /// Command definitions.
    #[must_use]
    pub const fn definitions(commands: Vec<CommandDefinition>) -> Self {
        Self {
            id: None,
            body: ResponseBody::Definitions { commands },
        }
    }

    /// Returns the message text, if this is a message.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Message { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// Parses one interaction line.
///
/// # Errors
///
/// Returns an error if the line is not a valid interaction object.
pub fn parse_interaction(line: &str) -> Result<Interaction, serde_json::Error> {
    serde_json::from_str(line)
}
