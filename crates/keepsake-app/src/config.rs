//! Host configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Path of an external manifest; the built-in one is used when unset.
pub const MANIFEST_ENV: &str = "KEEPSAKE_MANIFEST";
/// Tick interval in milliseconds.
pub const TICK_MS_ENV: &str = "KEEPSAKE_TICK_MS";
/// Directory against which audio locators are resolved.
pub const MEDIA_ROOT_ENV: &str = "KEEPSAKE_MEDIA_ROOT";
/// `json` selects JSON log output.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 50;

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// External manifest, if any.
    pub manifest_path: Option<PathBuf>,
    /// Interval between ticks.
    pub tick: Duration,
    /// Root for audio locators.
    pub media_root: PathBuf,
    /// Whether logs are emitted as JSON.
    pub json_logs: bool,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `KEEPSAKE_TICK_MS` is not a positive
    /// integer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let tick_ms = match lookup(TICK_MS_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "{TICK_MS_ENV} must be a positive integer, got {raw:?}"
                    ))
                })?,
            None => DEFAULT_TICK_MS,
        };

        Ok(Self {
            manifest_path: lookup(MANIFEST_ENV)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            tick: Duration::from_millis(tick_ms),
            media_root: lookup(MEDIA_ROOT_ENV)
                .filter(|root| !root.trim().is_empty())
                .map_or_else(|| PathBuf::from("."), PathBuf::from),
            json_logs: lookup(LOG_FORMAT_ENV).is_some_and(|format| format.eq_ignore_ascii_case("json")),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();

        assert_eq!(config.manifest_path, None);
        assert_eq!(config.tick, Duration::from_millis(DEFAULT_TICK_MS));
        assert_eq!(config.media_root, PathBuf::from("."));
        assert!(!config.json_logs);
    }

    #[test]
    fn test_reads_every_variable() {
        // Arrange
        let vars = [
            (MANIFEST_ENV, "/etc/keepsake.yaml"),
            (TICK_MS_ENV, "20"),
            (MEDIA_ROOT_ENV, "/srv/media"),
            (LOG_FORMAT_ENV, "JSON"),
        ];

        // Act
        let config = config(&vars).unwrap();

        // Assert
        assert_eq!(
            config.manifest_path,
            Some(PathBuf::from("/etc/keepsake.yaml"))
        );
        assert_eq!(config.tick, Duration::from_millis(20));
        assert_eq!(config.media_root, PathBuf::from("/srv/media"));
        assert!(config.json_logs);
    }

    #[test]
    fn test_zero_tick_is_rejected() {
        let result = config(&[(TICK_MS_ENV, "0")]);

        match result {
            Err(AppError::Config(message)) => assert!(message.contains(TICK_MS_ENV)),
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_tick_is_rejected() {
        assert!(matches!(
            config(&[(TICK_MS_ENV, "fast")]),
            Err(AppError::Config(_))
        ));
    }
}
