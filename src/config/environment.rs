//! Built-in deployment environments.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Configuration embedded in an environment instead of fetched remotely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalConfig {
    /// The API base URL.
    pub api: String,
    /// The default UI language.
    #[serde(default = "default_language")]
    pub default_language: String,
}

pub(crate) fn default_language() -> String {
    "en".to_string()
}

/// A deployment environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// The environment name.
    pub name: &'static str,
    /// Whether this is a production deployment.
    pub production: bool,
    /// Static configuration. When absent, configuration is fetched from the
    /// remote `conf.json` endpoint.
    pub config_local: Option<LocalConfig>,
}

impl Environment {
    /// Production: configuration always comes from the remote endpoint.
    pub fn production() -> Self {
        Self {
            name: "production",
            production: true,
            config_local: None,
        }
    }

    /// Testing against the hosted API.
    pub fn testing() -> Self {
        Self {
            name: "testing",
            production: false,
            config_local: Some(LocalConfig {
                api: "https://api.taiga.io/api/v1/".to_string(),
                default_language: default_language(),
            }),
        }
    }

    /// A backend running on the local machine.
    pub fn development() -> Self {
        Self {
            name: "development",
            production: false,
            config_local: Some(LocalConfig {
                api: "http://localhost:8000/api/v1/".to_string(),
                default_language: default_language(),
            }),
        }
    }

    /// Look up a built-in environment by name.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "production" | "prod" => Ok(Self::production()),
            "testing" | "test" => Ok(Self::testing()),
            "development" | "dev" => Ok(Self::development()),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_aliases() {
        assert_eq!(Environment::by_name("prod").unwrap(), Environment::production());
        assert_eq!(Environment::by_name("testing").unwrap(), Environment::testing());
        assert_eq!(Environment::by_name("dev").unwrap(), Environment::development());
    }

    #[test]
    fn test_unknown_environment() {
        let err = Environment::by_name("staging").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(ref n) if n == "staging"));
    }

    #[test]
    fn test_production_has_no_local_config() {
        let env = Environment::production();
        assert!(env.production);
        assert!(env.config_local.is_none());
    }

    #[test]
    fn test_local_config_deserializes_remote_shape() {
        let json = r#"{"api": "https://example.com/api/v1/", "defaultLanguage": "es"}"#;
        let cfg: LocalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.default_language, "es");

        let json = r#"{"api": "https://example.com/api/v1/"}"#;
        let cfg: LocalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.default_language, "en");
    }
}
