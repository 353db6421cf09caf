//! Asset cache configuration.

use std::path::PathBuf;

use super::parse::{env_or, env_parse};
use super::ConfigError;

/// Default on-disk cache location, relative to the working directory.
const DEFAULT_CACHE_DIR: &str = "cache";

/// Default memory-layer entry bound.
const DEFAULT_MEMORY_CAPACITY: usize = 256;

/// Cache configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Directory holding the disk layer (ROFLKIT_CACHE_DIR).
    pub cache_dir: PathBuf,
    /// Maximum entries held in memory (ROFLKIT_CACHE_MEMORY).
    pub memory_capacity: usize,
}

impl CacheConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let memory_capacity = env_parse("ROFLKIT_CACHE_MEMORY", DEFAULT_MEMORY_CAPACITY)?;
        if memory_capacity == 0 {
            return Err(ConfigError::Invalid {
                key: "ROFLKIT_CACHE_MEMORY".to_string(),
                message: "memory capacity must be at least 1".to_string(),
            });
        }
        Ok(Self {
            cache_dir: env_or("ROFLKIT_CACHE_DIR", DEFAULT_CACHE_DIR).into(),
            memory_capacity,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: DEFAULT_CACHE_DIR.into(),
            memory_capacity: DEFAULT_MEMORY_CAPACITY,
        }
    }
}
