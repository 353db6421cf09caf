//! Environment variable parsing helpers shared by the config sections.

use std::str::FromStr;
use std::time::Duration;

use super::ConfigError;

/// Read a variable, falling back to a default when unset.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an optional variable; unset and empty both mean `None`.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a boolean flag. "1", "true", "yes", "on" (case-insensitive) enable.
pub fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

/// Read and parse a variable into any `FromStr` type.
///
/// Unset or empty falls back to the default; a present value that fails to
/// parse is a configuration error, not a silent fallback.
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v.parse().map_err(|e: T::Err| ConfigError::Parse {
            key: key.into(),
            value: v,
            error: e.to_string(),
        }),
        _ => Ok(default),
    }
}

/// Parse a duration string: "45", "45s", "3m", "1h". A bare number means
/// seconds; "off" or "0" disables the duration entirely.
pub fn parse_duration(s: &str) -> Result<Option<Duration>, String> {
    let s = s.trim().to_lowercase();

    if s.is_empty() || s == "off" || s == "0" {
        return Ok(None);
    }

    let (digits, multiplier) = match s.as_bytes().last() {
        Some(b's') => (&s[..s.len() - 1], 1),
        Some(b'm') => (&s[..s.len() - 1], 60),
        Some(b'h') => (&s[..s.len() - 1], 3600),
        _ => (s.as_str(), 1),
    };

    let count: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration: {}", s))?;

    Ok(Some(Duration::from_secs(count * multiplier)))
}

/// Read a variable as a duration with a default.
pub fn env_duration(key: &str, default: &str) -> Result<Option<Duration>, ConfigError> {
    let value = env_or(key, default);
    parse_duration(&value).map_err(|error| ConfigError::Parse {
        key: key.into(),
        value,
        error,
    })
}
