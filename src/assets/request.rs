//! Asset request descriptors.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::replay::MapId;

/// Item identifier meaning "this slot holds no item".
pub const EMPTY_ITEM_ID: &str = "0";

/// Characters allowed verbatim in a cache key component; everything else is
/// percent-escaped so keys stay safe as file names and never traverse paths.
const KEY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'_').remove(b'-');

/// A tagged descriptor identifying one fetchable visual asset.
///
/// The variant's fields together form its cache and dedup identity; two
/// requests with equal fields share one fetch and one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetRequest {
    /// Minimap image for a map.
    Map {
        /// Numeric map identifier, e.g. "11".
        id: String,
        /// Display name, e.g. "Summoner's Rift".
        name: String,
    },
    /// Champion square portrait.
    Champion { name: String },
    /// Item icon.
    Item { id: String },
}

impl AssetRequest {
    /// Map request for an inferred [`MapId`].
    pub fn for_map(map: MapId) -> Self {
        AssetRequest::Map {
            id: map.numeric().to_string(),
            name: map.display_name().to_string(),
        }
    }

    /// Champion request by display name.
    pub fn champion(name: impl Into<String>) -> Self {
        AssetRequest::Champion { name: name.into() }
    }

    /// Item request by numeric identifier.
    pub fn item(id: impl Into<String>) -> Self {
        AssetRequest::Item { id: id.into() }
    }

    /// Short tag naming the asset kind; first segment of the cache key.
    pub fn kind(&self) -> &'static str {
        match self {
            AssetRequest::Map { .. } => "map",
            AssetRequest::Champion { .. } => "champion",
            AssetRequest::Item { .. } => "item",
        }
    }

    /// Canonical cache/dedup key, `"{kind}/{identity}"`.
    pub fn cache_key(&self) -> String {
        match self {
            AssetRequest::Map { id, name } => {
                format!("map/{}-{}", escape(id), escape(name))
            }
            AssetRequest::Champion { name } => format!("champion/{}", escape(name)),
            AssetRequest::Item { id } => format!("item/{}", escape(id)),
        }
    }

    /// Whether this is an item request for the reserved empty slot.
    ///
    /// An absent item field degrades to `""`, which means the same thing.
    pub fn is_empty_item(&self) -> bool {
        matches!(
            self,
            AssetRequest::Item { id } if id == EMPTY_ITEM_ID || id.is_empty()
        )
    }
}

/// Escape one key or path component. Shared with the origin layer so cache
/// keys and origin paths agree on what a safe component looks like.
pub(crate) fn escape(component: &str) -> Cow<'_, str> {
    utf8_percent_encode(component, KEY_ESCAPE).into()
}
