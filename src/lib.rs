//! dynmap-rcon-bot: a chat slash-command bot for a Minecraft server running
//! the Dynmap plugin.
//!
//! The bot reaches the server through its remote console (RCON). Most of the
//! work is adapting Dynmap's plaintext console protocol:
//!
//! - **Catalog parsing**: `dmap worldlist`, `dmarker icons`, `dmarker listsets`
//!   into typed records
//! - **Command building**: a structured marker request into `dmarker add`
//! - **Autocomplete**: filtering catalogs under the platform's 25-choice cap
//!
//! # Architecture
//!
//! ```text
//! gateway ──JSON lines──▶ bot ──▶ dynmap adapter ──▶ rcon ──TCP──▶ server
//! ```
//!
//! # Modules
//!
//! - [`bot`]: Command definitions, interaction dispatch, stdio channel
//! - [`config`]: Configuration loading and validation
//! - [`dynmap`]: Dynmap text-protocol adapter
//! - [`error`]: Configuration error types
//! - [`rcon`]: Remote console client and [`Transport`](rcon::Transport) trait

pub mod bot;
pub mod config;
pub mod dynmap;
pub mod error;
pub mod rcon;
