//! Search configuration.
//!
//! None of the searches deduplicate states and DFS never terminates on its own, so
//! every entry point in [`crate::solver`] takes a `SearchConfig` that bounds the work.
//! The default config is unbounded and leaves DFS unconfirmed.
//!
//! # Examples
//!
//! ```
//! use eight_puzzle_search::config::SearchConfig;
//! use std::time::Duration;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     max_expansions = 50000
//!     time_limit_ms = 2000
//!     confirm_dfs = true
//! "#).unwrap();
//!
//! assert_eq!(config.max_expansions, Some(50_000));
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(2)));
//! assert!(config.confirm_dfs);
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Limits and switches shared by all search entry points.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Stop after this many states have been expanded.
    #[serde(default)]
    pub max_expansions: Option<u64>,

    /// Stop once this many milliseconds have elapsed.
    #[serde(default)]
    pub time_limit_ms: Option<u64>,

    /// Depth-first search is incomplete here and only runs when this is set.
    #[serde(default)]
    pub confirm_dfs: bool,

    /// Polled before every expansion; raising it stops the search.
    #[serde(skip)]
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, contains invalid TOML, or sets a
    /// zero limit.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects zero limits, which would stop a search before its first expansion.
    ///
    /// Runs on every loaded config. Call it after overriding fields directly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == Some(0) {
            return Err(ConfigError::Invalid(
                "max_expansions must be at least 1".to_string(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "time_limit_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_max_expansions(mut self, limit: u64) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Sets the time limit, rounded up to whole milliseconds and never below 1 ms.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        let ms = limit.as_nanos().div_ceil(1_000_000).max(1);
        self.time_limit_ms = Some(u64::try_from(ms).unwrap_or(u64::MAX));
        self
    }

    /// Acknowledges that DFS may never terminate.
    pub fn with_dfs_confirmed(mut self) -> Self {
        self.confirm_dfs = true;
        self
    }

    /// Installs a flag another thread (or a signal handler) can raise to stop the search.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let config = SearchConfig::default();
        assert_eq!(config.max_expansions, None);
        assert_eq!(config.time_limit(), None);
        assert!(!config.confirm_dfs);
        assert!(!config.is_cancelled());
    }

    #[test]
    fn test_builder() {
        let flag = Arc::new(AtomicBool::new(false));
        let config = SearchConfig::new()
            .with_max_expansions(10)
            .with_time_limit(Duration::from_millis(250))
            .with_dfs_confirmed()
            .with_cancel_flag(flag.clone());
        assert_eq!(config.max_expansions, Some(10));
        assert_eq!(config.time_limit_ms, Some(250));
        assert!(config.confirm_dfs);
        assert!(!config.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(config.is_cancelled());
    }

    #[test]
    fn test_sub_millisecond_time_limit_rounds_up() {
        let config = SearchConfig::new().with_time_limit(Duration::from_micros(900));
        assert_eq!(config.time_limit_ms, Some(1));
        let config = SearchConfig::new().with_time_limit(Duration::ZERO);
        assert_eq!(config.time_limit_ms, Some(1));
        let config = SearchConfig::new().with_time_limit(Duration::from_micros(1500));
        assert_eq!(config.time_limit_ms, Some(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_limits_set_directly() {
        let mut config = SearchConfig::new().with_max_expansions(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.max_expansions = None;
        config.time_limit_ms = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config.max_expansions, None);
        assert!(!config.confirm_dfs);
    }

    #[test]
    fn test_toml_rejects_zero_limit() {
        let err = SearchConfig::from_toml_str("max_expansions = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_toml_rejects_unknown_key() {
        let err = SearchConfig::from_toml_str("max_depth = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SearchConfig::load("/nonexistent/search.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
