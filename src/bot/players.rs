//! The `/listplayers` command.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::definition::CommandDefinition;
use super::interaction::{Interaction, Response};
use crate::rcon::Transport;

/// Command name.
pub const NAME: &str = "listplayers";

/// Vanilla console command listing online players.
pub const LIST_COMMAND: &str = "list";

/// Shown to the invoking user when the server could not be asked.
pub const LIST_FAILED: &str = "Sorry, something went wrong while trying to list the players!";

fn list_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^There are (\d+) of a max of (\d+) players online(?::\s*(.*))?\.?$")
            .expect("player list pattern is valid")
    })
}

/// Output of the `list` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerList {
    /// Players online, as reported.
    pub online: String,
    /// Player slots.
    pub max: String,
    /// Names of the players online.
    pub players: Vec<String>,
}

impl PlayerList {
    /// Parses `There are N of a max of M players online: a, b, c`.
    ///
    /// Returns `None` if `text` is not a player listing.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let caps = list_regex().captures(text.trim_end())?;
        let players = caps
            .get(3)
            .map(|m| {
                m.as_str()
                    .split(", ")
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            online: caps[1].to_string(),
            max: caps[2].to_string(),
            players,
        })
    }
}

impl fmt::Display for PlayerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "There are {} of a max of {} players online:",
            self.online, self.max
        )?;
        for player in &self.players {
            write!(f, "\n - {player}")?;
        }
        Ok(())
    }
}

/// Renders `list` output one player per line.
///
/// Empty servers and unrecognised text are returned unchanged.
#[must_use]
pub fn format_player_list(text: &str) -> String {
    match PlayerList::parse(text) {
        Some(list) if list.online != "0" => list.to_string(),
        _ => text.to_string(),
    }
}

/// The `/listplayers` definition.
#[must_use]
pub fn definition() -> CommandDefinition {
    CommandDefinition::new(NAME, "List the players that are currently online")
}

/// Runs a `/listplayers` invocation.
pub async fn run<T: Transport>(transport: &T, interaction: &Interaction) -> Response {
    let id = interaction.id.clone();
    match transport.send(LIST_COMMAND).await {
        Ok(text) => Response::message(id, format_player_list(&text)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list players");
            Response::ephemeral(Some(id), LIST_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::interaction::{InteractionId, InteractionKind};
    use crate::rcon::testing::ScriptedTransport;

    #[test]
    fn parse_empty_server() {
        let list = PlayerList::parse("There are 0 of a max of 20 players online.").unwrap();
        assert_eq!(list.online, "0");
        assert_eq!(list.max, "20");
        assert!(list.players.is_empty());
    }

    #[test]
    fn parse_players() {
        let list = PlayerList::parse(
            "There are 3 of a max of 5 players online: OshDubh, MosEisley1976, Wizzeroo",
        )
        .unwrap();
        assert_eq!(list.players, ["OshDubh", "MosEisley1976", "Wizzeroo"]);
    }

    #[test]
    fn format_one_per_line() {
        assert_eq!(
            format_player_list("There are 2 of a max of 20 players online: alice, bob\n"),
            "There are 2 of a max of 20 players online:\n - alice\n - bob"
        );
    }

    #[test]
    fn empty_and_unknown_text_pass_through() {
        let empty = "There are 0 of a max of 20 players online.";
        assert_eq!(format_player_list(empty), empty);
        assert_eq!(format_player_list("Unknown command"), "Unknown command");
    }

    #[tokio::test]
    async fn run_reports_transport_failure() {
        let interaction = Interaction {
            id: InteractionId::Number(1),
            kind: InteractionKind::Command,
            command: NAME.to_string(),
            user: None,
            options: Vec::new(),
        };

        let response = run(&ScriptedTransport::new(), &interaction).await;
        assert_eq!(response.content(), Some(LIST_FAILED));

        let transport = ScriptedTransport::new()
            .reply("list", "There are 1 of a max of 20 players online: steve");
        let response = run(&transport, &interaction).await;
        assert_eq!(
            response.content(),
            Some("There are 1 of a max of 20 players online:\n - steve")
        );
    }
}
