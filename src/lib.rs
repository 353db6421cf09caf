//! roflkit - Replay header parsing and cached asset resolution.
//!
//! This crate ingests the header segment of a `.rofl` replay container,
//! exposes it as a typed [`replay::ReplayHeader`], and resolves the visual
//! assets the header references (map, champion, and item images) through a
//! cache-first async pipeline with in-flight deduplication.
//!
//! # Features
//!
//! - **Resilient parsing**: only undecodable payloads fail; missing or
//!   corrupted fields degrade to defaults
//! - **Safe field access**: per-player stat bags answer absent keys with
//!   `""` instead of failing
//! - **Deduplicated fetches**: at most one concurrent origin fetch per
//!   asset, no matter how many callers ask
//! - **Typed faults**: every fetch outcome is a value; no fault crosses the
//!   crate boundary as a panic
//! - **Structured logging**: JSON events via tracing
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use roflkit::assets::{AssetRequest, AssetCache, HttpOrigin, RequestManager};
//! use roflkit::config::Config;
//!
//! let config = Config::from_env()?;
//! let header = roflkit::replay::parse(&header_bytes)?;
//!
//! let origin = Arc::new(HttpOrigin::new(&config.origin)?);
//! let manager = RequestManager::new(AssetCache::new(&config.cache.cache_dir), origin);
//!
//! let response = manager.fetch(&AssetRequest::for_map(header.inferred.map)).await;
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod assets;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod region;
pub mod replay;

// Re-exports for convenience
pub use assets::{AssetRequest, AssetResponse, FetchFault, RequestManager};
pub use config::Config;
pub use replay::{HeaderParser, ParseError, ReplayHeader};
