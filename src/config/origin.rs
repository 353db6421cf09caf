//! Asset origin configuration.

use std::path::PathBuf;
use std::time::Duration;

use super::parse::{env_duration, env_opt, env_or};
use super::ConfigError;

/// Default remote image origin.
const DEFAULT_ORIGIN_URL: &str = "https://ddragon.leagueoflegends.com/cdn/13.1.1/img";

/// Default user agent sent to the remote origin.
const DEFAULT_USER_AGENT: &str = concat!("roflkit/", env!("CARGO_PKG_VERSION"));

/// Origin configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct OriginConfig {
    /// Remote origin base URL (ROFLKIT_ORIGIN_URL).
    pub base_url: String,
    /// Local bundle directory; preferred over the remote origin when set
    /// (ROFLKIT_BUNDLE_DIR).
    pub bundle_dir: Option<PathBuf>,
    /// Per-request timeout, None to disable (ROFLKIT_FETCH_TIMEOUT).
    pub timeout: Option<Duration>,
    /// User agent for remote requests (ROFLKIT_USER_AGENT).
    pub user_agent: String,
}

impl OriginConfig {
    /// Load configuration from environment variables.
    ///
    /// A configured bundle directory is validated up front: fetches fall
    /// back to it for every request, so a bad path should fail loading
    /// rather than fault every lookup later.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bundle_dir = match env_opt("ROFLKIT_BUNDLE_DIR") {
            Some(dir) => Some(Self::validate_bundle_dir(dir.into())?),
            None => None,
        };
        Ok(Self {
            base_url: env_or("ROFLKIT_ORIGIN_URL", DEFAULT_ORIGIN_URL),
            bundle_dir,
            timeout: env_duration("ROFLKIT_FETCH_TIMEOUT", "30s")?,
            user_agent: env_or("ROFLKIT_USER_AGENT", DEFAULT_USER_AGENT),
        })
    }

    fn validate_bundle_dir(dir: PathBuf) -> Result<PathBuf, ConfigError> {
        let metadata = std::fs::metadata(&dir).map_err(|error| ConfigError::Io {
            path: dir.display().to_string(),
            error,
        })?;
        if !metadata.is_dir() {
            return Err(ConfigError::Invalid {
                key: "ROFLKIT_BUNDLE_DIR".to_string(),
                message: format!("'{}' is not a directory", dir.display()),
            });
        }
        Ok(dir)
    }
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORIGIN_URL.to_string(),
            bundle_dir: None,
            timeout: Some(Duration::from_secs(30)),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // The only test touching ROFLKIT_BUNDLE_DIR; env vars are process-global.
    #[test]
    fn test_bundle_dir_validation() {
        let dir = tempfile::TempDir::new().unwrap();
        env::set_var("ROFLKIT_BUNDLE_DIR", dir.path());
        let config = OriginConfig::from_env().unwrap();
        assert_eq!(config.bundle_dir.as_deref(), Some(dir.path()));

        // Missing path fails with the underlying IO error
        env::set_var("ROFLKIT_BUNDLE_DIR", dir.path().join("missing"));
        assert!(matches!(
            OriginConfig::from_env(),
            Err(ConfigError::Io { .. })
        ));

        // A file where a directory is expected is rejected
        let file = dir.path().join("bundle.png");
        std::fs::write(&file, b"x").unwrap();
        env::set_var("ROFLKIT_BUNDLE_DIR", &file);
        assert!(matches!(
            OriginConfig::from_env(),
            Err(ConfigError::Invalid { .. })
        ));

        env::remove_var("ROFLKIT_BUNDLE_DIR");
    }
}
