//! Asset resolution pipeline: requests, cache, origins, and the manager
//! that ties them together.
//!
//! ```text
//! AssetRequest ──► RequestManager ──► in-flight dedup
//!                        │                  │
//!                        ▼                  ▼
//!                   AssetCache ──miss──► AssetOrigin
//!                        ▲                  │
//!                        └───populate───────┘
//! ```

pub mod cache;
pub mod manager;
pub mod origin;
pub mod request;
pub mod response;

pub use cache::AssetCache;
pub use manager::RequestManager;
pub use origin::{AssetOrigin, BundleOrigin, HttpOrigin};
pub use request::{AssetRequest, EMPTY_ITEM_ID};
pub use response::{AssetResponse, FetchFault};

use crate::replay::{keys, ReplayHeader};

/// Every asset request a header's consumer will want: the map image, one
/// champion portrait per player, and all seven item slots per player.
///
/// Empty champion names (corrupted records) are skipped; empty item slots
/// are kept so callers can render the expected "no image" outcome.
pub fn requests_for(header: &ReplayHeader) -> Vec<AssetRequest> {
    let mut requests = vec![AssetRequest::for_map(header.inferred.map)];
    for player in &header.metadata.players {
        let champion = player.get(keys::SKIN);
        if !champion.is_empty() {
            requests.push(AssetRequest::champion(champion));
        }
        for item in player.item_ids() {
            requests.push(AssetRequest::item(item));
        }
    }
    requests
}
