//! The `/ping` liveness command.

use super::definition::CommandDefinition;
use super::interaction::{Interaction, Response};

/// Command name.
pub const NAME: &str = "ping";

/// Reply text.
pub const PONG: &str = "Pong!";

/// The `/ping` definition.
#[must_use]
pub fn definition() -> CommandDefinition {
    CommandDefinition::new(NAME, "Returns back 'Pong!' - a liveness test.")
}

/// Answers a `/ping` invocation without touching the server.
#[must_use]
pub fn run(interaction: &Interaction) -> Response {
    Response::message(interaction.id.clone(), PONG)
}
