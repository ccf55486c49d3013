//! Builder for the `dmarker add` console command.
//!
//! # Command Format
//!
//! ```text
//! dmarker add [id:<id>] <label | "label with spaces"> [icon:<icon>] [set:<set>] x:<x> y:<y> z:<z> world:<world>
//! ```
//!
//! The plugin's option order is not documented, so this order is the one
//! known to work and must not change.

use super::Marker;

/// Command prefix for adding a marker.
pub const ADD_MARKER_PREFIX: &str = "dmarker add";

/// Builds the `dmarker add` command for a marker.
///
/// Optional fields that are empty are left out entirely, and so is an empty
/// label, so tokens are always separated by a single space. A label containing
/// whitespace is wrapped in double quotes; embedded quotes are passed through
/// unescaped because the plugin's escaping rules are unknown.
///
/// # Examples
///
/// ```
/// use dynmap_rcon_bot::dynmap::{build_add_marker, Marker};
///
/// let marker = Marker {
///     label: "My Base".to_string(),
///     x: 10,
///     y: 64,
///     z: -20,
///     world: "overworld".to_string(),
///     ..Marker::default()
/// };
/// assert_eq!(
///     build_add_marker(&marker),
///     r#"dmarker add "My Base" x:10 y:64 z:-20 world:overworld"#
/// );
/// ```
#[must_use]
pub fn build_add_marker(marker: &Marker) -> String {
    let mut parts = vec![ADD_MARKER_PREFIX.to_string()];

    if !marker.id.is_empty() {
        parts.push(format!("id:{}", marker.id));
    }

    if marker.label.chars().any(char::is_whitespace) {
        parts.push(format!("\"{}\"", marker.label));
    } else if !marker.label.is_empty() {
        parts.push(marker.label.clone());
    }

    if !marker.icon.is_empty() {
        parts.push(format!("icon:{}", marker.icon));
    }

    if !marker.set.is_empty() {
        parts.push(format!("set:{}", marker.set));
    }

    parts.push(format!("x:{}", marker.x));
    parts.push(format!("y:{}", marker.y));
    parts.push(format!("z:{}", marker.z));
    parts.push(format!("world:{}", marker.world));

    parts.join(" ")
}
