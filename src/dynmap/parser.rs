//! Parsers for Dynmap catalog listings.
//!
//! Each catalog has one fixed-shape line grammar. The parsers search for every
//! non-overlapping match anywhere in the response, so banners, blank lines and
//! other noise are skipped, and lines the server ran together without a
//! newline (`...showborder=trueworld DIM-1: ...`) still split correctly.
//!
//! Boolean and integer fields are captured loosely and converted strictly: a
//! token that is not `true`/`false`, or an integer that does not parse, fails
//! the whole listing. A drifted field means the plugin's format changed and
//! none of the remaining rows can be trusted.

use std::sync::OnceLock;

use regex::Regex;

use super::error::{DynmapError, DynmapResult};
use super::{MarkerIcon, MarkerSet, MarkerWorld};

// Trailing fields have no following separator to stop a greedy match, so they
// try the literal booleans first and only then fall back to a whole word.
const WORLD_PATTERN: &str = r"world ([\w\-]+): loaded=([^,\s]+), enabled=([^,\s]+), title=(\w+), center=([\d.\-/]+), extrazoomout=([^,\s]+), sendhealth=([^,\s]+), sendposition=([^,\s]+), protected=([^,\s]+), showborder=(true|false|\w+)";

const ICON_PATTERN: &str = r#"(\w+): label:"([^"]+)", builtin:(true|false|\w+)"#;

const SET_PATTERN: &str = r#"(\w+): label:"([^"]+)", hide:([^,\s]+), prio:([^,\s]+), deficon:(\w+)(?:, persistent=(true|false|\w+))?"#;

fn world_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WORLD_PATTERN).expect("world pattern is valid"))
}

fn icon_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ICON_PATTERN).expect("icon pattern is valid"))
}

fn set_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SET_PATTERN).expect("set pattern is valid"))
}

/// Parses `dmap worldlist` output.
///
/// # Errors
///
/// Returns [`DynmapError::InvalidBoolean`] or [`DynmapError::InvalidInteger`]
/// if any matched line carries a malformed flag or zoom level.
///
/// # Examples
///
/// ```
/// use dynmap_rcon_bot::dynmap::parse_worlds;
///
/// let worlds = parse_worlds(
///     "world overworld: loaded=true, enabled=true, title=world, center=0.0/64.0/0.0, \
///      extrazoomout=2, sendhealth=true, sendposition=true, protected=false, showborder=true",
/// )
/// .unwrap();
/// assert_eq!(worlds[0].name, "overworld");
/// assert_eq!(worlds[0].extra_zoom_out, 2);
/// ```
pub fn parse_worlds(text: &str) -> DynmapResult<Vec<MarkerWorld>> {
    const CATALOG: &str = "world";

    let worlds = world_regex()
        .captures_iter(text)
        .map(|caps| -> DynmapResult<MarkerWorld> {
            Ok(MarkerWorld {
                name: caps[1].to_string(),
                loaded: parse_bool(CATALOG, "loaded", &caps[2])?,
                enabled: parse_bool(CATALOG, "enabled", &caps[3])?,
                title: caps[4].to_string(),
                center: caps[5].to_string(),
                extra_zoom_out: parse_int(CATALOG, "extrazoomout", &caps[6])?,
                send_health: parse_bool(CATALOG, "sendhealth", &caps[7])?,
                send_position: parse_bool(CATALOG, "sendposition", &caps[8])?,
                protected: parse_bool(CATALOG, "protected", &caps[9])?,
                show_border: parse_bool(CATALOG, "showborder", &caps[10])?,
            })
        })
        .collect::<DynmapResult<Vec<_>>>()?;

    tracing::debug!(count = worlds.len(), "Parsed Dynmap worlds");
    Ok(worlds)
}

/// Parses `dmarker icons` output.
///
/// # Errors
///
/// Returns [`DynmapError::InvalidBoolean`] if a `builtin` flag is malformed.
pub fn parse_icons(text: &str) -> DynmapResult<Vec<MarkerIcon>> {
    const CATALOG: &str = "icon";

    let icons = icon_regex()
        .captures_iter(text)
        .map(|caps| -> DynmapResult<MarkerIcon> {
            Ok(MarkerIcon {
                name: caps[1].to_string(),
                label: caps[2].to_string(),
                builtin: parse_bool(CATALOG, "builtin", &caps[3])?,
            })
        })
        .collect::<DynmapResult<Vec<_>>>()?;

    tracing::debug!(count = icons.len(), "Parsed Dynmap marker icons");
    Ok(icons)
}

/// Parses `dmarker listsets` output.
///
/// The trailing `persistent=` field is optional; when absent the set reads
/// as non-persistent.
///
/// # Errors
///
/// Returns [`DynmapError::InvalidBoolean`] or [`DynmapError::InvalidInteger`]
/// if a flag or the priority is malformed.
pub fn parse_sets(text: &str) -> DynmapResult<Vec<MarkerSet>> {
    const CATALOG: &str = "set";

    let sets = set_regex()
        .captures_iter(text)
        .map(|caps| -> DynmapResult<MarkerSet> {
            let persistent = match caps.get(6) {
                Some(token) => parse_bool(CATALOG, "persistent", token.as_str())?,
                None => false,
            };

            Ok(MarkerSet {
                name: caps[1].to_string(),
                label: caps[2].to_string(),
                hide: parse_bool(CATALOG, "hide", &caps[3])?,
                priority: parse_int(CATALOG, "prio", &caps[4])?,
                default_icon: caps[5].to_string(),
                persistent,
            })
        })
        .collect::<DynmapResult<Vec<_>>>()?;

    tracing::debug!(count = sets.len(), "Parsed Dynmap marker sets");
    Ok(sets)
}

fn parse_bool(catalog: &'static str, field: &'static str, token: &str) -> DynmapResult<bool> {
    match token {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DynmapError::invalid_boolean(catalog, field, token)),
    }
}

fn parse_int(catalog: &'static str, field: &'static str, token: &str) -> DynmapResult<i32> {
    token
        .parse()
        .map_err(|e| DynmapError::invalid_integer(catalog, field, token, e))
}
