//! On-disk settings file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ConfigError, Result};

/// Environment variable overriding the API base URL.
pub const ENV_API: &str = "TAIGA_API";

/// Environment variable selecting the environment.
pub const ENV_ENVIRONMENT: &str = "TAIGA_ENVIRONMENT";

/// Environment variable overriding the remote configuration URL.
pub const ENV_CONF_URL: &str = "TAIGA_CONF_URL";

/// Where the session token is persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenStorage {
    /// The OS keyring.
    #[default]
    Keyring,
    /// A file in the local data directory.
    File,
}

/// User settings, read from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The built-in environment to start from.
    pub environment: String,
    /// Explicit API base URL; wins over every other source.
    pub api: Option<String>,
    /// URL of the remote `conf.json`.
    pub conf_url: Option<String>,
    /// Language override.
    pub default_language: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Token storage backend.
    pub token_storage: TokenStorage,
    /// Token file for the `file` backend; defaults to the local data dir.
    pub token_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: "production".to_string(),
            api: None,
            conf_url: None,
            default_language: None,
            timeout_secs: crate::api::client::DEFAULT_TIMEOUT_SECS,
            token_storage: TokenStorage::default(),
            token_path: None,
        }
    }
}

impl Settings {
    /// Default settings path: `<config dir>/taiga/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("taiga").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load settings from the default path, then apply environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self::load_from(&path)?.with_env_overrides())
    }

    /// Load settings from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Apply `TAIGA_*` environment variable overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(api) = non_empty_env(ENV_API) {
            self.api = Some(api);
        }
        if let Some(environment) = non_empty_env(ENV_ENVIRONMENT) {
            self.environment = environment;
        }
        if let Some(conf_url) = non_empty_env(ENV_CONF_URL) {
            self.conf_url = Some(conf_url);
        }
        self
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.environment, "production");
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.token_storage, TokenStorage::Keyring);
        assert!(settings.api.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "environment = \"testing\"\ntoken_storage = \"file\"\ntoken_path = \"/tmp/taiga-token\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.environment, "testing");
        assert_eq!(settings.token_storage, TokenStorage::File);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.token_path, Some(PathBuf::from("/tmp/taiga-token")));
        assert!(settings.conf_url.is_none());
    }

    #[test]
    fn test_invalid_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var(ENV_API, "https://taiga.example.com/api/v1");
        std::env::set_var(ENV_ENVIRONMENT, "development");
        std::env::set_var(ENV_CONF_URL, "");

        let settings = Settings::default().with_env_overrides();

        std::env::remove_var(ENV_API);
        std::env::remove_var(ENV_ENVIRONMENT);
        std::env::remove_var(ENV_CONF_URL);

        assert_eq!(settings.api.as_deref(), Some("https://taiga.example.com/api/v1"));
        assert_eq!(settings.environment, "development");
        assert!(settings.conf_url.is_none());
    }
}
