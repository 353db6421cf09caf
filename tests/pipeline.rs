//! End-to-end pipeline tests: parse a header, build its asset requests, and
//! resolve them against a local bundle origin.

use std::sync::Arc;

use futures_util::future::join_all;
use tempfile::TempDir;

use roflkit::assets::{
    requests_for, AssetCache, AssetOrigin, AssetRequest, BundleOrigin, FetchFault, RequestManager,
};
use roflkit::replay::{self, Winner};

/// A ten-player header in the container's native shape.
fn header_json() -> String {
    let stats: Vec<serde_json::Value> = (0..10)
        .map(|i| {
            serde_json::json!({
                "NAME": format!("summoner{}", i),
                "SKIN": if i % 2 == 0 { "Ahri" } else { "Garen" },
                "TEAM": if i < 5 { "100" } else { "200" },
                "WIN": if i < 5 { "Win" } else { "Fail" },
                "TEAM_POSITION": "TOP",
                "ITEM0": "3089",
                "ITEM1": "0",
            })
        })
        .collect();
    serde_json::json!({
        "gameVersion": "13.1.1",
        "gameLength": 1_893_000u64,
        "matchId": 31_337u64,
        "statsJson": serde_json::to_string(&stats).unwrap(),
    })
    .to_string()
}

/// Lay out a bundle directory covering the header's assets.
async fn write_bundle(dir: &TempDir) {
    for (path, bytes) in [
        ("map/map11.png", &b"minimap"[..]),
        ("champion/Ahri.png", &b"ahri"[..]),
        ("champion/Garen.png", &b"garen"[..]),
        ("item/3089.png", &b"rabadons"[..]),
    ] {
        let full = dir.path().join(path);
        tokio::fs::create_dir_all(full.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(full, bytes).await.unwrap();
    }
}

fn manager_over(bundle: &TempDir, cache: &TempDir) -> Arc<RequestManager> {
    let origin: Arc<dyn AssetOrigin> = Arc::new(BundleOrigin::new(bundle.path()));
    Arc::new(RequestManager::new(AssetCache::new(cache.path()), origin))
}

/// Parse a header and resolve every asset it references.
#[tokio::test]
async fn test_full_pipeline() {
    let bundle = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_bundle(&bundle).await;
    let manager = manager_over(&bundle, &cache);

    let header = replay::parse(header_json().as_bytes()).unwrap();
    assert_eq!(header.metadata.match_id, Some(31_337));
    assert_eq!(header.inferred.winner, Winner::BlueVictory);
    assert_eq!(header.metadata.blue_players().count(), 5);
    assert_eq!(header.metadata.red_players().count(), 5);

    let requests = requests_for(&header);
    let responses = join_all(requests.iter().map(|r| manager.fetch(r))).await;

    for (request, response) in requests.iter().zip(&responses) {
        match request {
            AssetRequest::Map { .. } | AssetRequest::Champion { .. } => {
                assert!(!response.is_faulted(), "faulted: {:?}", request);
            }
            AssetRequest::Item { id } if id == "3089" => {
                assert_eq!(
                    response.bytes().map(|b| b.as_ref()),
                    Some(&b"rabadons"[..])
                );
            }
            AssetRequest::Item { id } if id == "0" => {
                assert_eq!(response.fault(), Some(FetchFault::EmptyItemSlot));
            }
            AssetRequest::Item { .. } => {
                // Slots the header never mentioned degrade to empty ids
                assert_eq!(response.fault(), Some(FetchFault::EmptyItemSlot));
            }
        }
    }
}

/// Concurrent identical requests observe one value-equal response, and the
/// cache ends up with exactly one entry for the key.
#[tokio::test]
async fn test_concurrent_champion_requests_share_response() {
    let bundle = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_bundle(&bundle).await;
    let manager = manager_over(&bundle, &cache);

    let tasks = (0..8).map(|_| {
        let manager = manager.clone();
        tokio::spawn(async move { manager.fetch(&AssetRequest::champion("Ahri")).await })
    });
    let responses: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    for response in &responses {
        assert_eq!(response, &responses[0]);
        assert_eq!(response.bytes().map(|b| b.as_ref()), Some(&b"ahri"[..]));
    }
    assert!(cache.path().join("champion/Ahri.png").exists());
}

/// A populated cache answers even after the origin disappears.
#[tokio::test]
async fn test_cache_survives_origin_loss() {
    let bundle = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_bundle(&bundle).await;
    let manager = manager_over(&bundle, &cache);

    let request = AssetRequest::champion("Garen");
    assert!(!manager.fetch(&request).await.is_faulted());

    tokio::fs::remove_file(bundle.path().join("champion/Garen.png"))
        .await
        .unwrap();

    let again = manager.fetch(&request).await;
    assert_eq!(again.bytes().map(|b| b.as_ref()), Some(&b"garen"[..]));
}

/// Assets the origin does not carry fault with NotFound and are retried,
/// not cached.
#[tokio::test]
async fn test_missing_asset_faults_then_recovers() {
    let bundle = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    let manager = manager_over(&bundle, &cache);

    let request = AssetRequest::champion("Ahri");
    assert_eq!(
        manager.fetch(&request).await.fault(),
        Some(FetchFault::NotFound)
    );

    // The asset appears later; the next request must succeed
    write_bundle(&bundle).await;
    assert!(!manager.fetch(&request).await.is_faulted());
}

/// A persisted header artifact parses back to an equivalent model.
#[tokio::test]
async fn test_persist_and_reload_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("match.json");

    let header = replay::parse(header_json().as_bytes()).unwrap();
    replay::write_header_file(&path, &header).await.unwrap();

    let bytes = tokio::fs::read(&path).await.unwrap();
    let reloaded = replay::parse(&bytes).unwrap();
    assert_eq!(reloaded.metadata.match_id, header.metadata.match_id);
    assert_eq!(
        reloaded.metadata.game_duration_ms,
        header.metadata.game_duration_ms
    );
    assert_eq!(
        reloaded.metadata.players.len(),
        header.metadata.players.len()
    );
}
