//! Configuration management for the Taiga client.
//!
//! This module resolves the immutable [`Config`] every API client reads its
//! base URL from. Resolution happens once, before any client is built:
//!
//! 1. An explicit `api` (settings file or `TAIGA_API`) wins outright.
//! 2. Otherwise the selected [`Environment`]'s static configuration is used.
//! 3. Otherwise the remote `conf.json` at `conf_url` is fetched.
//!
//! Any failure here is fatal to start-up.

mod environment;
mod settings;

use std::time::Duration;

use thiserror::Error;
use tracing::{info, instrument, warn};

pub use environment::{Environment, LocalConfig};
pub use settings::{Settings, TokenStorage, ENV_API, ENV_CONF_URL, ENV_ENVIRONMENT};

/// Timeout for fetching the remote configuration.
const CONF_FETCH_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    /// The settings file could not be read.
    #[error("Failed to read settings: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings file is not valid TOML.
    #[error("Failed to parse settings: {0}")]
    ParseError(#[source] toml::de::Error),

    /// The remote configuration could not be fetched or decoded.
    #[error("Failed to fetch remote configuration from {url}: {reason}")]
    FetchError {
        /// The configuration URL.
        url: String,
        /// What went wrong.
        reason: String,
    },

    /// A configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// The named environment does not exist.
    #[error("Unknown environment '{0}' (expected production, testing or development)")]
    UnknownEnvironment(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Resolved, read-only client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_url: String,
    default_language: String,
    production: bool,
}

impl Config {
    /// Create a configuration, validating and normalizing the API URL.
    pub fn new(api_url: &str, default_language: &str, production: bool) -> Result<Self> {
        let api_url = normalize_api_url(api_url)?;
        let default_language = if default_language.trim().is_empty() {
            environment::default_language()
        } else {
            default_language.trim().to_string()
        };

        Ok(Self {
            api_url,
            default_language,
            production,
        })
    }

    /// Resolve configuration from settings.
    #[instrument(skip(settings), fields(environment = %settings.environment))]
    pub async fn fetch(settings: &Settings) -> Result<Self> {
        let environment = Environment::by_name(&settings.environment)?;

        let (api, language) = if let Some(api) = &settings.api {
            info!("Using explicit API URL");
            let language = environment
                .config_local
                .map(|c| c.default_language)
                .unwrap_or_else(environment::default_language);
            (api.clone(), language)
        } else if let Some(local) = environment.config_local {
            info!("Using static environment configuration");
            (local.api, local.default_language)
        } else {
            let url = settings.conf_url.as_deref().ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "environment '{}' needs either `api` or `conf_url`",
                    environment.name
                ))
            })?;
            let remote = fetch_remote(url).await?;
            (remote.api, remote.default_language)
        };

        let language = settings.default_language.clone().unwrap_or(language);
        let config = Self::new(&api, &language, environment.production)?;
        info!(api_url = %config.api_url, "Configuration resolved");
        Ok(config)
    }

    /// The API base URL, without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The default language, sent as `Accept-Language`.
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Whether this is a production deployment.
    pub fn is_production(&self) -> bool {
        self.production
    }

    /// Build `{api_url}/{path}`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

/// Fetch `conf.json` from a remote URL.
///
/// Uses a bare client: no token exists yet, so the interceptor chain is not
/// involved.
async fn fetch_remote(url: &str) -> Result<LocalConfig> {
    let fetch_error = |reason: String| ConfigError::FetchError {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(CONF_FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(format!("HTTP {}", status)));
    }

    response
        .json::<LocalConfig>()
        .await
        .map_err(|e| fetch_error(format!("invalid conf.json: {}", e)))
}

/// Normalize the API URL by removing trailing slashes and checking the scheme.
fn normalize_api_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');

    if url.is_empty() {
        return Err(ConfigError::ValidationError(
            "API URL cannot be empty".to_string(),
        ));
    }

    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ConfigError::ValidationError(format!(
            "API URL '{}' must start with http:// or https://",
            url
        )));
    }

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("API URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    Ok(url.to_string())
}
