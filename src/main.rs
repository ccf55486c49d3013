//! dynmap-rcon-bot: slash-command bot for a Minecraft server running Dynmap.
//!
//! `serve` speaks line-delimited JSON with a chat gateway on stdin/stdout.
//! The remaining subcommands run single console operations for diagnostics.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use dynmap_rcon_bot::bot::Bot;
use dynmap_rcon_bot::config::{self, Config};
use dynmap_rcon_bot::dynmap::{self, CatalogEntry, CatalogKind};
use dynmap_rcon_bot::rcon::{RconClient, Transport};

/// Slash-command bot for a Minecraft server running the Dynmap plugin.
///
/// Talks to the server over RCON. Configuration is read from --config or
/// the default location; RCON_ADDR and RCON_PASS override the file.
#[derive(Parser, Debug)]
#[command(name = "dynmap-rcon-bot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve interactions over stdin/stdout
    Serve,
    /// Print the command definitions as JSON
    Definitions,
    /// List the worlds Dynmap renders
    Worlds,
    /// List the available marker icons
    Icons,
    /// List the marker sets
    Sets,
    /// Show autocomplete suggestions for a catalog
    Suggest {
        /// Catalog to search (worlds, icons, sets)
        kind: CatalogKind,
        /// Text typed so far
        #[arg(default_value = "")]
        text: String,
    },
    /// Run a raw console command and print the reply
    Exec {
        /// Console command, e.g. "list"
        #[arg(required = true, num_args = 1..)]
        command: Vec<String>,
    },
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<S: serde::Serialize>(value: &S) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn print_catalog<E: CatalogEntry>(entries: &[E]) {
    for entry in entries {
        println!("{}\t{}", entry.id(), entry.display());
    }
}

async fn execute(command: Command, cfg: &Config, client: RconClient) -> Result<(), String> {
    let bot = Bot::new(client, cfg.markers.clone());

    match command {
        Command::Serve => {
            info!("Bot ready, waiting for interactions on stdin...");
            bot.run().await.map_err(|e| e.to_string())?;
            info!("Bot shut down gracefully");
        }
        Command::Definitions => print_json(&bot.definitions().await)?,
        Command::Worlds => print_catalog(
            &dynmap::fetch_worlds(bot.transport())
                .await
                .map_err(|e| e.to_string())?,
        ),
        Command::Icons => print_catalog(
            &dynmap::fetch_icons(bot.transport())
                .await
                .map_err(|e| e.to_string())?,
        ),
        Command::Sets => print_catalog(
            &dynmap::fetch_sets(bot.transport())
                .await
                .map_err(|e| e.to_string())?,
        ),
        Command::Suggest { kind, text } => {
            let suggestions = dynmap::suggest(bot.transport(), kind, &text)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&suggestions)?;
        }
        Command::Exec { command } => {
            let reply = bot
                .transport()
                .send(&command.join(" "))
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", reply.trim_end());
        }
    }

    Ok(())
}

/// Entry point for dynmap-rcon-bot.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if config_path.is_none() {
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("\nExpected config at: {}", default_path.display());
                    eprintln!(
                        "Or set {} and {} in the environment",
                        config::ENV_RCON_ADDR,
                        config::ENV_RCON_PASS
                    );
                }
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %cfg.rcon.address,
        "Starting dynmap-rcon-bot"
    );

    let client = RconClient::new(
        cfg.rcon.address.clone(),
        cfg.rcon.password.clone(),
        cfg.rcon.timeout(),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    match runtime.block_on(execute(args.command, &cfg, client)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_precedence() {
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(2, false, "error"), Level::DEBUG);
        assert_eq!(get_log_level(3, true, "trace"), Level::ERROR);
    }

    #[test]
    fn parse_suggest_subcommand() {
        let args = Args::parse_from(["dynmap-rcon-bot", "suggest", "icons", "ho"]);
        assert!(matches!(
            args.command,
            Command::Suggest { kind: CatalogKind::Icon, ref text } if text == "ho"
        ));
    }
}
