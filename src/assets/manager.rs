//! Request orchestration: dedup, cache consultation, origin fallback.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::assets::cache::AssetCache;
use crate::assets::origin::AssetOrigin;
use crate::assets::request::AssetRequest;
use crate::assets::response::{AssetResponse, FetchFault};
use crate::metrics::Metrics;

/// In-flight fetch results are published over a watch channel; waiters see
/// `None` until the winning fetch stores the shared response.
type InFlightMap = HashMap<String, watch::Receiver<Option<AssetResponse>>>;

/// Resolves asset requests against the cache and an origin.
///
/// For any canonical key there is at most one concurrent origin fetch:
/// concurrent callers with the same key attach to the pending fetch and all
/// observe the same [`AssetResponse`] value. Failures come back as typed
/// faults and are never cached, so a later request retries the origin.
pub struct RequestManager {
    cache: AssetCache,
    origin: Arc<dyn AssetOrigin>,
    in_flight: Mutex<InFlightMap>,
}

impl RequestManager {
    pub fn new(cache: AssetCache, origin: Arc<dyn AssetOrigin>) -> Self {
        Self {
            cache,
            origin,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// The cache this manager populates.
    pub fn cache(&self) -> &AssetCache {
        &self.cache
    }

    /// Resolve one asset request to a response.
    ///
    /// Never panics and never surfaces a raw error: every outcome is a
    /// [`AssetResponse`], including the expected empty item slot.
    pub async fn fetch(&self, request: &AssetRequest) -> AssetResponse {
        if request.is_empty_item() {
            Metrics::global().record_fault(FetchFault::EmptyItemSlot);
            return AssetResponse::faulted(FetchFault::EmptyItemSlot);
        }

        let key = request.cache_key();
        loop {
            let role = {
                let mut in_flight = self.in_flight.lock().unwrap();
                match in_flight.get(&key) {
                    Some(rx) => Role::Waiter(rx.clone()),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        in_flight.insert(key.clone(), rx);
                        Role::Winner(tx)
                    }
                }
            };

            match role {
                Role::Waiter(mut rx) => {
                    match rx.wait_for(Option::is_some).await {
                        Ok(published) => {
                            debug!(key = %key, "attached to in-flight fetch");
                            return published
                                .clone()
                                .unwrap_or(AssetResponse::faulted(FetchFault::OriginError));
                        }
                        // The winning fetch was abandoned before publishing;
                        // its guard has retired the key, so start over.
                        Err(_) => continue,
                    }
                }
                Role::Winner(tx) => {
                    let _guard = InFlightGuard {
                        manager: self,
                        key: &key,
                    };
                    let response = self.resolve(request, &key).await;
                    let _ = tx.send(Some(response.clone()));
                    return response;
                }
            }
        }
    }

    /// Cache-first resolution for the winning caller of a key.
    async fn resolve(&self, request: &AssetRequest, key: &str) -> AssetResponse {
        let metrics = Metrics::global();

        if let Some(bytes) = self.cache.get(key).await {
            metrics.cache_hits_total.inc();
            debug!(key = %key, "cache hit");
            return AssetResponse::success(bytes);
        }
        metrics.cache_misses_total.inc();

        metrics.origin_fetches_total.inc();
        match self.origin.fetch(request).await {
            Ok(bytes) => {
                // The response is already in hand; a failed cache write only
                // costs a refetch later.
                if let Err(e) = self.cache.put(key, bytes.clone()).await {
                    warn!(key = %key, error = %e, "cache write failed");
                }
                AssetResponse::success(bytes)
            }
            Err(reason) => {
                metrics.record_fault(reason);
                debug!(key = %key, reason = %reason, "fetch faulted");
                AssetResponse::faulted(reason)
            }
        }
    }
}

enum Role {
    Winner(watch::Sender<Option<AssetResponse>>),
    Waiter(watch::Receiver<Option<AssetResponse>>),
}

/// Retires an in-flight key when the winning fetch finishes or is dropped.
///
/// Runs on cancellation too: an abandoned fetch must not wedge its key, and
/// waiters observing the closed channel re-enter the fetch loop.
struct InFlightGuard<'a> {
    manager: &'a RequestManager,
    key: &'a str,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.manager.in_flight.lock().unwrap().remove(self.key);
    }
}
