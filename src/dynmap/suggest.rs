//! Autocomplete over Dynmap catalogs.
//!
//! Chat platforms accept at most [`MAX_SUGGESTIONS`] choices per response.
//! The filter stops scanning as soon as it has that many, so the work per
//! keystroke is bounded even for large catalogs.

use serde::{Deserialize, Serialize};

use super::error::DynmapResult;
use super::fetch::{fetch_icons, fetch_sets, fetch_worlds};
use super::{CatalogEntry, CatalogKind};
use crate::rcon::Transport;

/// Maximum number of suggestions or static choices a platform accepts.
pub const MAX_SUGGESTIONS: usize = 25;

/// A display/value pair offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown to the user.
    pub name: String,
    /// Value submitted when picked.
    pub value: String,
}

impl Suggestion {
    /// Builds a suggestion from a catalog record.
    pub fn from_entry<E: CatalogEntry + ?Sized>(entry: &E) -> Self {
        Self {
            name: entry.display().to_string(),
            value: entry.id().to_string(),
        }
    }
}

/// Filters `entries` by `typed`, case-insensitively, against either the
/// display text or the identifier.
///
/// An empty `typed` matches everything, so the first [`MAX_SUGGESTIONS`]
/// records come back in catalog order.
#[must_use]
pub fn filter<E: CatalogEntry>(entries: &[E], typed: &str) -> Vec<Suggestion> {
    let needle = typed.to_lowercase();

    entries
        .iter()
        .filter(|entry| {
            entry.display().to_lowercase().contains(&needle)
                || entry.id().to_lowercase().contains(&needle)
        })
        .take(MAX_SUGGESTIONS)
        .map(Suggestion::from_entry)
        .collect()
}

/// Fetches the `kind` catalog and filters it by `typed`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or parsed.
pub async fn suggest<T: Transport>(
    transport: &T,
    kind: CatalogKind,
    typed: &str,
) -> DynmapResult<Vec<Suggestion>> {
    let suggestions = match kind {
        CatalogKind::World => filter(&fetch_worlds(transport).await?, typed),
        CatalogKind::Icon => filter(&fetch_icons(transport).await?, typed),
        CatalogKind::Set => filter(&fetch_sets(transport).await?, typed),
    };
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynmap::MarkerIcon;
    use crate::rcon::testing::ScriptedTransport;

    fn icon(name: &str, label: &str) -> MarkerIcon {
        MarkerIcon {
            name: name.to_string(),
            label: label.to_string(),
            builtin: true,
        }
    }

    fn numbered_icons(count: usize) -> Vec<MarkerIcon> {
        (0..count)
            .map(|i| icon(&format!("icon{i}"), &format!("Icon {i}")))
            .collect()
    }

    #[test]
    fn empty_prefix_caps_at_limit_in_order() {
        let icons = numbered_icons(30);
        let suggestions = filter(&icons, "");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0].value, "icon0");
        assert_eq!(suggestions[24].value, "icon24");
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter(&numbered_icons(30), "zzz").is_empty());
    }

    #[test]
    fn matches_label_or_id_case_insensitively() {
        let icons = vec![
            icon("redflag", "Red Flag"),
            icon("house", "Home"),
            icon("anchor", "anchor"),
        ];

        let by_label = filter(&icons, "FLAG");
        assert_eq!(by_label.len(), 1);
        assert_eq!(
            by_label[0],
            Suggestion {
                name: "Red Flag".to_string(),
                value: "redflag".to_string()
            }
        );

        let by_id = filter(&icons, "hous");
        assert_eq!(by_id[0].name, "Home");
    }

    #[test]
    fn small_catalog_is_not_padded() {
        assert_eq!(filter(&numbered_icons(3), "").len(), 3);
    }

    #[tokio::test]
    async fn suggest_worlds_uses_title_and_name() {
        let transport = ScriptedTransport::new().reply(
            "dmap worldlist",
            "world DIM-1: loaded=true, enabled=true, title=the_nether, center=0.0/64.0/0.0, extrazoomout=2, sendhealth=true, sendposition=true, protected=false, showborder=true",
        );

        let suggestions = suggest(&transport, CatalogKind::World, "NETH").await.unwrap();
        assert_eq!(
            suggestions,
            vec![Suggestion {
                name: "the_nether".to_string(),
                value: "DIM-1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn suggest_propagates_transport_failure() {
        let transport = ScriptedTransport::new();
        assert!(suggest(&transport, CatalogKind::Set, "").await.is_err());
    }
}
