//! Slash-command bot.
//!
//! The bot is platform-neutral: a gateway process owns the chat connection,
//! forwards each interaction as a JSON line, and relays the JSON line it gets
//! back. On start-up the bot writes its command definitions so the gateway
//! can register them in bulk.
//!
//! # Commands
//!
//! | Command | Module | Server round trips |
//! |---|---|---|
//! | `/dynmap addmarker` | [`dynmap`] | `dmarker add`, catalogs for definitions and autocomplete |
//! | `/listplayers` | [`players`] | `list` |
//! | `/ping` | [`ping`] | none |
//!
//! # Lifecycle
//!
//! [`Bot::run`] serves stdin/stdout until end of input, SIGINT or SIGTERM
//! (Ctrl+C on Windows).

pub mod channel;
pub mod definition;
pub mod dynmap;
pub mod interaction;
pub mod ping;
pub mod players;

pub use channel::{LineChannel, StdioChannel};
pub use definition::{CommandDefinition, OptionDefinition, OptionKind};
pub use interaction::{
    parse_interaction, CommandOption, Interaction, InteractionId, InteractionKind, OptionValue,
    Response, ResponseBody,
};

use std::io;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

use crate::config::MarkerConfig;
use crate::rcon::Transport;

/// Names of every command the bot serves, in registration order.
pub const COMMANDS: [&str; 3] = [dynmap::NAME, players::NAME, ping::NAME];

/// Dispatches interactions to command handlers.
#[derive(Debug)]
pub struct Bot<T> {
    transport: T,
    markers: MarkerConfig,
}

impl<T: Transport> Bot<T> {
    /// Creates a bot talking to the server through `transport`.
    pub const fn new(transport: T, markers: MarkerConfig) -> Self {
        Self { transport, markers }
    }

    /// Returns the server transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds every command definition, fetching Dynmap catalogs for the
    /// marker options.
    pub async fn definitions(&self) -> Vec<CommandDefinition> {
        let catalogs = dynmap::Catalogs::fetch_or_empty(&self.transport).await;
        vec![
            dynmap::definition(&catalogs),
            players::definition(),
            ping::definition(),
        ]
    }

    /// Answers one interaction.
    pub async fn handle(&self, interaction: &Interaction) -> Response {
        match interaction.kind {
            InteractionKind::Command => self.run_command(interaction).await,
            InteractionKind::Autocomplete => self.autocomplete(interaction).await,
        }
    }

    async fn run_command(&self, interaction: &Interaction) -> Response {
        info!(
            user = interaction.user_name(),
            command = %interaction.command,
            "User ran command"
        );

        match interaction.command.as_str() {
            dynmap::NAME => dynmap::run(&self.transport, &self.markers, interaction).await,
            players::NAME => players::run(&self.transport, interaction).await,
            ping::NAME => ping::run(interaction),
            other => {
                warn!(command = other, "Unknown command");
                Response::ephemeral(
                    Some(interaction.id.clone()),
                    format!("Unknown command '{other}'"),
                )
            }
        }
    }

    async fn autocomplete(&self, interaction: &Interaction) -> Response {
        if interaction.command == dynmap::NAME {
            dynmap::autocomplete(&self.transport, interaction).await
        } else {
            Response::choices(interaction.id.clone(), Vec::new())
        }
    }

    /// Announces the definitions, then answers interactions until the
    /// channel reaches end of input.
    ///
    /// A line that is not a valid interaction gets an ephemeral error
    /// without an id.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from or writing to the channel fails.
    pub async fn serve<R, W>(&self, channel: &mut LineChannel<R, W>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let commands = self.definitions().await;
        channel.write_response(&Response::definitions(commands)).await?;

        while let Some(line) = channel.read_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let response = match parse_interaction(&line) {
                Ok(interaction) => self.handle(&interaction).await,
                Err(e) => {
                    warn!(error = %e, "Rejecting malformed interaction");
                    Response::ephemeral(None, format!("Invalid interaction: {e}"))
                }
            };
            channel.write_response(&response).await?;
        }

        info!("Gateway closed the channel");
        Ok(())
    }

    /// Serves stdin/stdout until end of input or a shutdown signal.
    ///
    /// # Errors
    ///
    /// Returns an error if stdio fails or signal handlers cannot be
    /// installed.
    pub async fn run(&self) -> io::Result<()> {
        let mut channel = StdioChannel::stdio();

        tokio::select! {
            result = self.serve(&mut channel) => result,
            signal = shutdown_signal() => {
                let signal = signal?;
                info!(signal, "Received shutdown signal, initiating graceful shutdown");
                Ok(())
            }
        }
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => Ok("SIGINT"),
        _ = sigterm.recv() => Ok("SIGTERM"),
    }
}

#[cfg(windows)]
async fn shutdown_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("Ctrl+C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rcon::testing::ScriptedTransport;

    fn bot(transport: ScriptedTransport) -> Bot<ScriptedTransport> {
        Bot::new(transport, MarkerConfig::default())
    }

    fn command(name: &str) -> Interaction {
        Interaction {
            id: InteractionId::Number(5),
            kind: InteractionKind::Command,
            command: name.to_string(),
            user: Some("osh".to_string()),
            options: Vec::new(),
        }
    }

    #[tokio::test]
    async fn definitions_cover_every_command() {
        let definitions = bot(ScriptedTransport::new()).definitions().await;
        let names: Vec<_> = definitions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, COMMANDS);
    }

    #[tokio::test]
    async fn ping_replies_pong() {
        let response = bot(ScriptedTransport::new()).handle(&command("ping")).await;
        assert_eq!(response.content(), Some("Pong!"));
        assert_eq!(response.id, Some(InteractionId::Number(5)));
    }

    #[tokio::test]
    async fn unknown_command_is_ephemeral() {
        let response = bot(ScriptedTransport::new()).handle(&command("whitelist")).await;
        assert!(matches!(
            response.body,
            ResponseBody::Message { ephemeral: true, .. }
        ));
    }

    #[tokio::test]
    async fn autocomplete_for_other_commands_is_empty() {
        let mut interaction = command("listplayers");
        interaction.kind = InteractionKind::Autocomplete;

        let transport = ScriptedTransport::new();
        let bot = bot(transport);
        let response = bot.handle(&interaction).await;
        assert!(matches!(
            response.body,
            ResponseBody::Choices { ref choices } if choices.is_empty()
        ));
        assert!(bot.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn serve_announces_then_answers() {
        let input: &[u8] = b"{\"id\":1,\"kind\":\"command\",\"command\":\"ping\"}\n\nnot json\n";
        let mut channel = LineChannel::new(input, Vec::new());

        bot(ScriptedTransport::new()).serve(&mut channel).await.unwrap();

        let output = String::from_utf8(channel.into_writer()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "definitions");
        assert_eq!(lines[1]["id"], 1);
        assert_eq!(lines[1]["content"], "Pong!");
        assert!(lines[2].get("id").is_none());
        assert_eq!(lines[2]["ephemeral"], true);
    }
}
