//! Configuration error type.

use std::fmt;

/// Error raised while loading configuration from the environment.
#[derive(Debug)]
pub enum ConfigError {
    /// A variable was set but its value did not parse.
    Parse {
        key: String,
        value: String,
        error: String,
    },
    /// A variable parsed but the value is unusable.
    Invalid { key: String, message: String },
    /// A configured path could not be validated.
    Io { path: String, error: std::io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse { key, value, error } => {
                write!(f, "{}: cannot parse '{}': {}", key, value, error)
            }
            ConfigError::Invalid { key, message } => write!(f, "{}: {}", key, message),
            ConfigError::Io { path, error } => write!(f, "io error at '{}': {}", path, error),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { error, .. } => Some(error),
            _ => None,
        }
    }
}
