//! The `/dynmap` command.
//!
//! `addmarker` places a marker through the remote console. Its `world`,
//! `icon` and `set` options are populated from the live Dynmap catalogs when
//! the command is defined, and served through autocomplete when a catalog is
//! too large for static choices.
//!
//! Catalog fetch failures never prevent the command from being defined: the
//! affected option just has no choices, and a warning is logged.

use super::definition::{CommandDefinition, OptionDefinition};
use super::interaction::{CommandOption, Interaction, Response};
use crate::config::MarkerConfig;
use crate::dynmap::{
    add_marker, extract_marker, fetch_icons, fetch_sets, fetch_worlds, suggest, CatalogKind,
    DynmapResult, Marker, MarkerField, MarkerIcon, MarkerSet, MarkerWorld,
};
use crate::rcon::Transport;

/// Command name.
pub const NAME: &str = "dynmap";

/// Subcommand that places a marker.
pub const ADD_MARKER: &str = "addmarker";

/// Shown to the invoking user when a marker could not be placed.
pub const ADD_MARKER_FAILED: &str = "Sorry, something went wrong while trying to add a marker!";

/// Catalogs used to build the command definition.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    /// Worlds for the `world` option.
    pub worlds: Vec<MarkerWorld>,
    /// Icons for the `icon` option.
    pub icons: Vec<MarkerIcon>,
    /// Marker sets for the `set` option.
    pub sets: Vec<MarkerSet>,
}

impl Catalogs {
    /// Fetches all three catalogs, substituting an empty one for each that
    /// fails.
    pub async fn fetch_or_empty<T: Transport>(transport: &T) -> Self {
        Self {
            worlds: or_empty(fetch_worlds(transport).await, CatalogKind::World),
            icons: or_empty(fetch_icons(transport).await, CatalogKind::Icon),
            sets: or_empty(fetch_sets(transport).await, CatalogKind::Set),
        }
    }
}

fn or_empty<R>(result: DynmapResult<Vec<R>>, kind: CatalogKind) -> Vec<R> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, catalog = %kind, "Unable to retrieve Dynmap catalog, offering no choices");
        Vec::new()
    })
}

/// Builds the `/dynmap` definition from `catalogs`.
#[must_use]
pub fn definition(catalogs: &Catalogs) -> CommandDefinition {
    let options = MarkerField::ALL
        .into_iter()
        .map(|field| field_option(field, catalogs))
        .collect();

    CommandDefinition::new(NAME, "Dynmap commands").with_options(vec![
        OptionDefinition::subcommand(ADD_MARKER, "Adds a marker to the map.", options),
    ])
}

fn field_option(field: MarkerField, catalogs: &Catalogs) -> OptionDefinition {
    let description = match field {
        MarkerField::Label => "The label that gets displayed on the map.",
        MarkerField::X => "The x-coordinate on the map to create the marker at.",
        MarkerField::Y => "The y-coordinate on the map to create the marker at.",
        MarkerField::Z => "The z-coordinate on the map to create the marker at.",
        MarkerField::World => "The dimension to add the marker to.",
        MarkerField::Id => "The unique id of the marker, defaults to the label.",
        MarkerField::Icon => "The icon displayed for this marker on the map.",
        MarkerField::Set => "The marker set that this marker belongs to.",
    };

    let option = if field.is_integer() {
        OptionDefinition::integer(field.name(), description)
    } else {
        OptionDefinition::string(field.name(), description)
    };

    match field {
        MarkerField::Label | MarkerField::X | MarkerField::Y | MarkerField::Z => option.required(),
        MarkerField::World => option.required().with_catalog(&catalogs.worlds),
        MarkerField::Icon => option.with_catalog(&catalogs.icons),
        MarkerField::Set => option.with_catalog(&catalogs.sets),
        MarkerField::Id => option,
    }
}

/// Runs a `/dynmap` invocation.
pub async fn run<T: Transport>(
    transport: &T,
    defaults: &MarkerConfig,
    interaction: &Interaction,
) -> Response {
    let id = interaction.id.clone();

    if let Some(sub) = interaction.subcommand() {
        if sub.name != ADD_MARKER {
            tracing::warn!(subcommand = %sub.name, "Unknown dynmap subcommand");
            return Response::ephemeral(Some(id), format!("Unknown subcommand '{}'", sub.name));
        }
    }

    match create_marker(transport, &interaction.options).await {
        Ok(marker) => Response::message(id, describe_created(&marker, defaults)),
        Err(e) if e.is_transport() => {
            tracing::error!(error = %e, user = interaction.user_name(), "Failed to add marker");
            Response::ephemeral(Some(id), ADD_MARKER_FAILED)
        }
        Err(e) => {
            tracing::warn!(error = %e, user = interaction.user_name(), "Rejected marker request");
            Response::ephemeral(Some(id), ADD_MARKER_FAILED)
        }
    }
}

async fn create_marker<T: Transport>(
    transport: &T,
    options: &[CommandOption],
) -> DynmapResult<Marker> {
    let marker = extract_marker(options)?;
    let reply = add_marker(transport, &marker).await?;
    tracing::debug!(reply = %reply.trim_end(), "Dynmap answered marker request");
    Ok(marker)
}

/// Confirmation text for a placed marker, filling in the plugin's defaults
/// for an omitted set or icon.
#[must_use]
pub fn describe_created(marker: &Marker, defaults: &MarkerConfig) -> String {
    let set = or_default(&marker.set, &defaults.default_set);
    let icon = or_default(&marker.icon, &defaults.default_icon);
    format!(
        "✅ created marker {set}/{} at {}, {}, {} in {} with icon {icon}",
        marker.label, marker.x, marker.y, marker.z, marker.world
    )
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Answers an autocomplete request for a catalog-backed option.
///
/// Options without a catalog, and catalogs that fail to load, get no
/// choices.
pub async fn autocomplete<T: Transport>(transport: &T, interaction: &Interaction) -> Response {
    let id = interaction.id.clone();

    let Some(option) = interaction.focused_option() else {
        tracing::debug!("Autocomplete request without a focused option");
        return Response::choices(id, Vec::new());
    };
    let Some(kind) = CatalogKind::from_option_name(&option.name) else {
        tracing::debug!(option = %option.name, "No catalog behind option");
        return Response::choices(id, Vec::new());
    };

    let typed = option.string_value().unwrap_or_default();
    match suggest(transport, kind, typed).await {
        Ok(choices) => Response::choices(id, choices),
        Err(e) => {
            tracing::warn!(error = %e, catalog = %kind, "Unable to retrieve Dynmap catalog for autocomplete");
            Response::choices(id, Vec::new())
        }
    }
}
