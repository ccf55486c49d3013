//! Dynmap plugin text-protocol adapter.
//!
//! Dynmap answers its console commands with loosely structured plaintext.
//! This module turns that text into typed catalog records and turns a
//! structured marker request back into the plugin's command syntax:
//!
//! - [`parser`]: `dmap worldlist`, `dmarker icons` and `dmarker listsets` output
//! - [`command`]: the `dmarker add` command line
//! - [`fetch`]: issuing the catalog commands over a [`Transport`](crate::rcon::Transport)
//! - [`suggest`]: capped, case-insensitive autocomplete over a catalog
//! - [`request`]: building a [`Marker`] from slash-command options
//!
//! # Catalog Line Formats
//!
//! ```text
//! world <id>: loaded=<bool>, enabled=<bool>, title=<word>, center=<x>/<y>/<z>, extrazoomout=<int>, sendhealth=<bool>, sendposition=<bool>, protected=<bool>, showborder=<bool>
//! <id>: label:"<text>", builtin:<bool>
//! <id>: label:"<text>", hide:<bool>, prio:<int>, deficon:<word>[, persistent=<bool>]
//! ```
//!
//! Records are recreated on every fetch; nothing here caches a catalog.

pub mod command;
pub mod error;
pub mod fetch;
pub mod parser;
pub mod request;
pub mod suggest;

pub use command::build_add_marker;
pub use error::{DynmapError, DynmapResult};
pub use fetch::{add_marker, fetch_icons, fetch_sets, fetch_worlds};
pub use parser::{parse_icons, parse_sets, parse_worlds};
pub use request::{extract_marker, CommandOption, MarkerField, OptionValue};
pub use suggest::{filter, suggest, Suggestion, MAX_SUGGESTIONS};

use std::fmt;
use std::str::FromStr;

/// A marker placement request.
///
/// Empty strings stand for "not supplied" on the optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Marker {
    /// Client-supplied marker id (optional).
    pub id: String,
    /// Label displayed on the map.
    pub label: String,
    /// Icon name (optional).
    pub icon: String,
    /// Marker set name (optional).
    pub set: String,
    /// X coordinate.
    pub x: i64,
    /// Y coordinate.
    pub y: i64,
    /// Z coordinate.
    pub z: i64,
    /// World name.
    pub world: String,
}

/// A world known to Dynmap (`dmap worldlist`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerWorld {
    /// World identifier.
    pub name: String,
    /// Whether the world is loaded.
    pub loaded: bool,
    /// Whether rendering is enabled.
    pub enabled: bool,
    /// Display title.
    pub title: String,
    /// Map centre as `x/y/z`, kept verbatim.
    pub center: String,
    /// Extra zoom-out levels.
    pub extra_zoom_out: i32,
    /// Whether player health is published.
    pub send_health: bool,
    /// Whether player positions are published.
    pub send_position: bool,
    /// Whether the world is protected.
    pub protected: bool,
    /// Whether the world border is drawn.
    pub show_border: bool,
}

/// A marker icon (`dmarker icons`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    /// Icon identifier.
    pub name: String,
    // Live output has so far always repeated the name here; kept separate
    // until the plugin shows otherwise.
    /// Display label.
    pub label: String,
    /// Whether the icon ships with Dynmap.
    pub builtin: bool,
}

/// A marker set (`dmarker listsets`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    /// Set identifier.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Whether the set is hidden by default.
    pub hide: bool,
    /// Layer priority.
    pub priority: i32,
    /// Default icon for markers in this set.
    pub default_icon: String,
    /// Whether the set persists. Older plugin versions omit the field,
    /// which reads as `false`.
    pub persistent: bool,
}

/// Common view over catalog records used by autocomplete and choices.
pub trait CatalogEntry {
    /// Value sent back to the plugin.
    fn id(&self) -> &str;

    /// Human-readable text shown to the user.
    fn display(&self) -> &str;
}

impl CatalogEntry for MarkerWorld {
    fn id(&self) -> &str {
        &self.name
    }

    fn display(&self) -> &str {
        &self.title
    }
}

impl CatalogEntry for MarkerIcon {
    fn id(&self) -> &str {
        &self.name
    }

    fn display(&self) -> &str {
        &self.label
    }
}

impl CatalogEntry for MarkerSet {
    fn id(&self) -> &str {
        &self.name
    }

    fn display(&self) -> &str {
        &self.label
    }
}

/// The three catalogs Dynmap can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// `dmap worldlist`
    World,
    /// `dmarker icons`
    Icon,
    /// `dmarker listsets`
    Set,
}

impl CatalogKind {
    /// All catalog kinds, in definition order.
    pub const ALL: [Self; 3] = [Self::World, Self::Icon, Self::Set];

    /// Console command that lists this catalog.
    #[must_use]
    pub const fn list_command(self) -> &'static str {
        match self {
            Self::World => "dmap worldlist",
            Self::Icon => "dmarker icons",
            Self::Set => "dmarker listsets",
        }
    }

    /// Marker option name this catalog populates.
    #[must_use]
    pub const fn option_name(self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Icon => "icon",
            Self::Set => "set",
        }
    }

    /// Looks up the catalog behind a marker option name.
    #[must_use]
    pub fn from_option_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.option_name() == name)
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::World => "worlds",
            Self::Icon => "icons",
            Self::Set => "sets",
        })
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "world" | "worlds" => Ok(Self::World),
            "icon" | "icons" => Ok(Self::Icon),
            "set" | "sets" => Ok(Self::Set),
            other => Err(format!(
                "unknown catalog '{other}'. Valid: worlds, icons, sets"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_kind_commands() {
        assert_eq!(CatalogKind::World.list_command(), "dmap worldlist");
        assert_eq!(CatalogKind::Icon.list_command(), "dmarker icons");
        assert_eq!(CatalogKind::Set.list_command(), "dmarker listsets");
    }

    #[test]
    fn catalog_kind_from_option_name() {
        assert_eq!(CatalogKind::from_option_name("set"), Some(CatalogKind::Set));
        assert_eq!(CatalogKind::from_option_name("label"), None);
    }

    #[test]
    fn catalog_kind_parse() {
        assert_eq!("Worlds".parse::<CatalogKind>(), Ok(CatalogKind::World));
        assert_eq!("icon".parse::<CatalogKind>(), Ok(CatalogKind::Icon));
        assert!("markers".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn icon_name_and_label_stay_distinct() {
        let icon = MarkerIcon {
            name: "house".to_string(),
            label: "House".to_string(),
            builtin: true,
        };
        assert_eq!(icon.id(), "house");
        assert_eq!(icon.display(), "House");
    }
}
