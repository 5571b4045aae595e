use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::DEFAULT_BASE_URL;
use crate::dashboard::{DEFAULT_ANALYSIS_SYMBOL, DEFAULT_POLL_INTERVAL};
use crate::dom::{RetentionPolicy, DEFAULT_MAX_ENTRIES};

const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub analysis_symbol: String,
    pub log: LogSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            analysis_symbol: DEFAULT_ANALYSIS_SYMBOL.to_string(),
            log: LogSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub max_entries: usize,
    pub max_age_secs: Option<u64>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_age_secs: None,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the TOML file if it exists, then `DASHBOARD__*`
    /// environment variables (e.g. `DASHBOARD__LOG__MAX_ENTRIES=100`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config
            .validate()
            .map_err(|errors| ConfigError::Invalid(errors.join(", ")))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push("base_url must start with http:// or https://".to_string());
        }
        if self.poll_interval_secs == 0 {
            errors.push("poll_interval_secs must be > 0".to_string());
        }
        if self.analysis_symbol.trim().is_empty() {
            errors.push("analysis_symbol must not be empty".to_string());
        }
        if self.log.max_entries == 0 {
            errors.push("log.max_entries must be > 0".to_string());
        }
        if self.log.max_age_secs == Some(0) {
            errors.push("log.max_age_secs must be > 0 when set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_entries: self.log.max_entries,
            max_age: self
                .log
                .max_age_secs
                .map(|secs| chrono::Duration::seconds(secs as i64)),
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // load() reads the process environment; tests that call it run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.analysis_symbol, "BTCUSDT");
        assert_eq!(config.retention(), RetentionPolicy::default());
    }

    #[test]
    fn test_validation_collects_every_error() {
        let invalid = DashboardConfig {
            base_url: "localhost:8000".to_string(),
            poll_interval_secs: 0,
            log: LogSettings {
                max_entries: 0,
                max_age_secs: Some(0),
            },
            ..DashboardConfig::default()
        };
        let errors = tokio_test::assert_err!(invalid.validate());
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_load_from_toml_file() {
        let _env = env_guard();
        let path = std::env::temp_dir().join(format!("dashboard-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "base_url = \"http://10.0.0.5:8000\"\nanalysis_symbol = \"SOLUSDT\"\n\n[log]\nmax_entries = 50\nmax_age_secs = 3600\n",
        )
        .unwrap();

        let loaded = DashboardConfig::load(Some(path.as_path()));
        std::fs::remove_file(&path).ok();
        let config = tokio_test::assert_ok!(loaded);

        assert_eq!(config.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.analysis_symbol, "SOLUSDT");
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.log.max_entries, 50);
        assert_eq!(config.retention().max_age, Some(chrono::Duration::hours(1)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let _env = env_guard();
        let path = std::env::temp_dir().join("dashboard-config-does-not-exist.toml");
        let config = tokio_test::assert_ok!(DashboardConfig::load(Some(path.as_path())));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let text = DashboardConfig::default().to_toml().unwrap();
        assert!(text.contains("poll_interval_secs = 30"));
        let parsed: DashboardConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, DashboardConfig::default());
    }

    #[test]
    fn test_environment_overrides() {
        let _env = env_guard();
        let vars = [
            ("DASHBOARD__LOG__MAX_ENTRIES", "42"),
            ("DASHBOARD__ANALYSIS_SYMBOL", "XRPUSDT"),
            ("DASHBOARD__POLL_INTERVAL_SECS", "15"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let loaded = DashboardConfig::load(None);
        for (key, _) in vars {
            std::env::remove_var(key);
        }

        let config = tokio_test::assert_ok!(loaded);
        assert_eq!(config.log.max_entries, 42);
        assert_eq!(config.analysis_symbol, "XRPUSDT");
        assert_eq!(config.poll_interval(), Duration::from_secs(15));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_environment_value_is_rejected() {
        let _env = env_guard();
        std::env::set_var("DASHBOARD__LOG__MAX_ENTRIES", "0");
        let loaded = DashboardConfig::load(None);
        std::env::remove_var("DASHBOARD__LOG__MAX_ENTRIES");

        let err = tokio_test::assert_err!(loaded);
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
