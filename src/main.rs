use std::process::ExitCode;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{error, info};

use roflkit::assets::{
    self, AssetCache, AssetOrigin, BundleOrigin, FetchFault, HttpOrigin, RequestManager,
};
use roflkit::config::{env_bool, Config};
use roflkit::metrics::Metrics;
use roflkit::replay::{self, format_duration, infer_winner};

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    roflkit::logging::init(&config.logging);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: roflkit <header.json>");
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&config, &path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, path: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("roflkit {} starting", roflkit::PKG_VERSION);
    config.log_summary();

    let raw = tokio::fs::read(path).await?;
    let header = replay::parse(&raw)?;
    let meta = &header.metadata;

    info!(
        version = %meta.game_version,
        duration = %format_duration(meta.game_duration_ms),
        map = header.inferred.map.display_name(),
        outcome = infer_winner(meta).label(),
        "Parsed header"
    );
    for player in meta.blue_players() {
        info!(side = "blue", name = player.get("NAME"), champion = player.get("SKIN"), kda = %replay::kda(player), "Player");
    }
    for player in meta.red_players() {
        info!(side = "red", name = player.get("NAME"), champion = player.get("SKIN"), kda = %replay::kda(player), "Player");
    }

    // ROFLKIT_PREFETCH=1 pulls every referenced asset into the cache
    if env_bool("ROFLKIT_PREFETCH", false) {
        let origin: Arc<dyn AssetOrigin> = match &config.origin.bundle_dir {
            Some(dir) => Arc::new(BundleOrigin::new(dir)),
            None => Arc::new(HttpOrigin::new(&config.origin)?),
        };
        let manager = RequestManager::new(
            AssetCache::with_memory_capacity(
                &config.cache.cache_dir,
                config.cache.memory_capacity,
            ),
            origin,
        );

        let requests = assets::requests_for(&header);
        let total = requests.len();
        let responses = join_all(requests.iter().map(|r| manager.fetch(r))).await;

        let fetched = responses.iter().filter(|r| !r.is_faulted()).count();
        let empty = responses
            .iter()
            .filter(|r| r.fault() == Some(FetchFault::EmptyItemSlot))
            .count();
        info!(total, fetched, empty, "Prefetch finished");
        info!("metrics:\n{}", Metrics::global().export());
    }

    Ok(())
}
