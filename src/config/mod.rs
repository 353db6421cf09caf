//! Centralized configuration loading from environment variables.
//!
//! ```rust,ignore
//! use roflkit::config::Config;
//!
//! let config = Config::from_env()?;
//! println!("Cache: {:?}", config.cache.cache_dir);
//! println!("Origin: {}", config.origin.base_url);
//! ```

mod cache;
mod error;
mod origin;
mod parse;

pub use cache::CacheConfig;
pub use error::ConfigError;
pub use origin::OriginConfig;
pub use parse::{env_bool, env_opt, env_or, parse_duration};

/// Logging configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Log level filter (from LOG_LEVEL or RUST_LOG).
    pub filter: String,
    /// Service name for structured logging.
    pub service_name: String,
}

impl LoggingConfig {
    /// Load configuration from environment variables.
    ///
    /// LOG_LEVEL accepts simple values (trace, debug, info, warn, error)
    /// and wins over RUST_LOG, which accepts full tracing filter syntax.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            filter: Self::resolve_log_filter(),
            service_name: parse::env_or("SERVICE_NAME", "roflkit"),
        })
    }

    fn resolve_log_filter() -> String {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            let level = level.to_lowercase();
            match level.as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => {
                    return format!("roflkit={}", level);
                }
                _ => {
                    eprintln!(
                        "Warning: Invalid LOG_LEVEL '{}', expected: trace, debug, info, warn, error",
                        level
                    );
                }
            }
        }

        if let Ok(filter) = std::env::var("RUST_LOG") {
            return filter;
        }

        "roflkit=info".to_string()
    }
}

/// Complete application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Asset cache configuration.
    pub cache: CacheConfig,
    /// Asset origin configuration.
    pub origin: OriginConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            cache: CacheConfig::from_env()?,
            origin: OriginConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    /// Print configuration summary to log.
    pub fn log_summary(&self) {
        use tracing::info;

        info!("Configuration loaded:");
        info!("  Cache dir: {:?}", self.cache.cache_dir);
        info!("  Memory capacity: {}", self.cache.memory_capacity);
        match &self.origin.bundle_dir {
            Some(dir) => info!("  Origin: bundle at {:?}", dir),
            None => info!("  Origin: {}", self.origin.base_url),
        }
        info!("  Fetch timeout: {:?}", self.origin.timeout);
    }
}
