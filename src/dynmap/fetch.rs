//! Catalog fetching and marker creation over the remote console.
//!
//! Each catalog is fetched with its own command and parsed on its own, so a
//! failure listing icons says nothing about worlds or sets. Errors are
//! returned as-is; deciding whether an empty catalog is acceptable is up to
//! the caller.

use super::command::build_add_marker;
use super::error::DynmapResult;
use super::parser::{parse_icons, parse_sets, parse_worlds};
use super::{CatalogKind, Marker, MarkerIcon, MarkerSet, MarkerWorld};
use crate::rcon::Transport;

/// Lists the worlds Dynmap renders.
///
/// # Errors
///
/// Returns an error if the console request fails or the listing is malformed.
pub async fn fetch_worlds<T: Transport>(transport: &T) -> DynmapResult<Vec<MarkerWorld>> {
    let text = transport.send(CatalogKind::World.list_command()).await?;
    parse_worlds(&text)
}

/// Lists the available marker icons.
///
/// # Errors
///
/// Returns an error if the console request fails or the listing is malformed.
pub async fn fetch_icons<T: Transport>(transport: &T) -> DynmapResult<Vec<MarkerIcon>> {
    let text = transport.send(CatalogKind::Icon.list_command()).await?;
    parse_icons(&text)
}

/// Lists the marker sets.
///
/// # Errors
///
/// Returns an error if the console request fails or the listing is malformed.
pub async fn fetch_sets<T: Transport>(transport: &T) -> DynmapResult<Vec<MarkerSet>> {
    let text = transport.send(CatalogKind::Set.list_command()).await?;
    parse_sets(&text)
}

/// Sends a `dmarker add` command for `marker`.
///
/// The plugin's reply is returned but not interpreted; success means the
/// console round trip completed.
///
/// # Errors
///
/// Returns an error if the console request fails.
pub async fn add_marker<T: Transport>(transport: &T, marker: &Marker) -> DynmapResult<String> {
    let command = build_add_marker(marker);
    Ok(transport.send(&command).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynmap::DynmapError;
    use crate::rcon::testing::ScriptedTransport;

    #[tokio::test]
    async fn catalogs_fetch_independently() {
        let transport = ScriptedTransport::new()
            .reply(
                "dmarker icons",
                "anchor: label:\"anchor\", builtin:true\nbank: label:\"bank\", builtin:true",
            )
            .reply("dmarker listsets", "markers: label:\"Markers\", hide:maybe, prio:0, deficon:default");

        let worlds = fetch_worlds(&transport).await;
        let icons = fetch_icons(&transport).await;
        let sets = fetch_sets(&transport).await;

        assert!(matches!(worlds, Err(DynmapError::Transport(_))));
        assert_eq!(icons.unwrap().len(), 2);
        assert!(matches!(sets, Err(DynmapError::InvalidBoolean { .. })));
        assert_eq!(
            transport.sent(),
            ["dmap worldlist", "dmarker icons", "dmarker listsets"]
        );
    }

    #[tokio::test]
    async fn add_marker_sends_built_command() {
        let command = "dmarker add \"My Base\" x:10 y:64 z:-20 world:overworld";
        let transport = ScriptedTransport::new().reply(command, "Added marker id:'My_Base'");
        let marker = Marker {
            label: "My Base".to_string(),
            x: 10,
            y: 64,
            z: -20,
            world: "overworld".to_string(),
            ..Marker::default()
        };

        let reply = add_marker(&transport, &marker).await.unwrap();
        assert_eq!(reply, "Added marker id:'My_Base'");
        assert_eq!(transport.sent(), [command]);
    }
}
