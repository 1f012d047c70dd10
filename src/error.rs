//! Centralized error types for the Taiga client.
//!
//! [`AppError`] wraps the configuration and API error hierarchies and adds
//! user-facing messages for the command line.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The top-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the settings file. Please check it is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "The settings file is invalid. Please check the TOML format.".to_string()
                }
                ConfigError::FetchError { url, .. } => {
                    format!("Could not load the instance configuration from {}.", url)
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                ConfigError::UnknownEnvironment(name) => {
                    format!("Unknown environment '{}'.", name)
                }
            },
            AppError::Api(e) => match e {
                ApiError::Unauthorized => {
                    "Your session has expired or is invalid. Please log in again.".to_string()
                }
                ApiError::Forbidden => {
                    "Access denied. You don't have permission to access this resource.".to_string()
                }
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::Validation { message, fields } => {
                    if fields.is_empty() {
                        format!("The server rejected the request: {}", message)
                    } else {
                        let detail = fields
                            .iter()
                            .map(|(field, msgs)| format!("{}: {}", field, msgs.join(" ")))
                            .collect::<Vec<_>>()
                            .join("; ");
                        format!("The server rejected the request: {}", detail)
                    }
                }
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "Taiga server error. Please try again later.".to_string()
                }
                ApiError::Http { status, .. } => {
                    format!("Unexpected response from Taiga (HTTP {}).", status.as_u16())
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid Taiga URL in configuration.".to_string(),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from Taiga. Please try again.".to_string()
                }
                ApiError::TokenStore(_) => {
                    "Could not access the stored session. Please log in again.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Other(msg) => msg.clone(),
        }
    }

    /// Check if this error prevents the client from working at all.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_)
                | AppError::Api(ApiError::Unauthorized)
                | AppError::Api(ApiError::TokenStore(_))
        )
    }

    /// Check if repeating the operation later might succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::RateLimited)
                | AppError::Api(ApiError::ServerError(_))
                | AppError::Api(ApiError::Network(_))
        )
    }

    /// Get a suggested action for the user.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ValidationError(_))
            | AppError::Config(ConfigError::UnknownEnvironment(_)) => {
                Some("Set `api` or `conf_url` in config.toml, or export TAIGA_API.")
            }
            AppError::Config(ConfigError::FetchError { .. }) => {
                Some("Check that conf_url points at a reachable conf.json.")
            }
            AppError::Api(ApiError::Unauthorized) | AppError::Api(ApiError::TokenStore(_)) => {
                Some("Run 'taiga login' to start a new session.")
            }
            AppError::Api(ApiError::RateLimited) => Some("Wait a few seconds and try again."),
            AppError::Api(ApiError::Network(_)) => {
                Some("Check your internet connection and the configured API URL.")
            }
            _ => None,
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::Unauthorized.into();
        assert!(matches!(app_err, AppError::Api(ApiError::Unauthorized)));
    }

    #[test]
    fn test_user_message_unauthorized() {
        let msg = AppError::Api(ApiError::Unauthorized).user_message();
        assert!(msg.contains("log in again"));
    }

    #[test]
    fn test_user_message_not_found() {
        let msg = AppError::Api(ApiError::NotFound("project-0".to_string())).user_message();
        assert!(msg.contains("project-0"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_user_message_lists_field_errors() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), vec!["This field is required.".to_string()]);
        let err = AppError::Api(ApiError::Validation {
            message: "name: This field is required.".to_string(),
            fields,
        });
        assert_eq!(
            err.user_message(),
            "The server rejected the request: name: This field is required."
        );
    }

    #[test]
    fn test_user_message_fetch_error_names_url() {
        let err = AppError::Config(ConfigError::FetchError {
            url: "https://taiga.example.com/conf.json".to_string(),
            reason: "HTTP 404".to_string(),
        });
        assert!(err.user_message().contains("https://taiga.example.com/conf.json"));
    }

    #[test]
    fn test_is_critical() {
        assert!(AppError::Api(ApiError::Unauthorized).is_critical());
        assert!(AppError::Config(ConfigError::NoConfigDir).is_critical());
        assert!(!AppError::Api(ApiError::Forbidden).is_critical());
        assert!(!AppError::Api(ApiError::RateLimited).is_critical());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(AppError::Api(ApiError::RateLimited).is_recoverable());
        assert!(AppError::Api(ApiError::ServerError("boom".into())).is_recoverable());
        assert!(!AppError::Api(ApiError::Unauthorized).is_recoverable());
        assert!(!AppError::Api(ApiError::NotFound("x".into())).is_recoverable());
    }

    #[test]
    fn test_suggested_action_unauthorized() {
        let action = AppError::Api(ApiError::Unauthorized).suggested_action();
        assert!(action.unwrap().contains("taiga login"));
    }

    #[test]
    fn test_suggested_action_missing_api() {
        let err = AppError::Config(ConfigError::ValidationError("no api".into()));
        assert!(err.suggested_action().unwrap().contains("TAIGA_API"));
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
        assert!(err.suggested_action().is_none());
    }
}
