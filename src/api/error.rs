//! API error types for the Taiga client.

use std::collections::BTreeMap;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with the Taiga API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - the session token is missing, invalid or expired.
    #[error("Authentication failed: log in again to refresh your session")]
    Unauthorized,

    /// Permission denied - the user lacks access to the resource.
    #[error("Permission denied: you don't have access to this resource")]
    Forbidden,

    /// Resource not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The server rejected the request body or parameters.
    #[error("Validation failed: {message}")]
    Validation {
        /// The general error message (`_error_message`), or a summary of the fields.
        message: String,
        /// Per-field messages keyed by field name.
        fields: BTreeMap<String, Vec<String>>,
    },

    /// Rate limited by the API.
    #[error("Rate limited: please wait before retrying")]
    RateLimited,

    /// Taiga server error.
    #[error("Taiga server error: {0}")]
    ServerError(String),

    /// Any other non-success HTTP status.
    #[error("Unexpected HTTP {status}: {message}")]
    Http {
        /// The response status.
        status: StatusCode,
        /// Message extracted from the body, or the request URL.
        message: String,
    },

    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The persisted auth token could not be read or written.
    #[error("Token storage error: {0}")]
    TokenStore(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: StatusCode, context: &str) -> Self {
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound(context.to_string()),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => ApiError::Http {
                status,
                message: context.to_string(),
            },
        }
    }

    /// Normalize a non-success response into an `ApiError`.
    ///
    /// Taiga reports errors as a JSON object holding an `_error_message`
    /// and/or a map of field name to messages. A 400 carrying such a body
    /// becomes [`ApiError::Validation`]; every other status goes through
    /// [`ApiError::from_status`] with the extracted message as context.
    pub fn from_response(status: StatusCode, url: &str, body: &str) -> Self {
        let parsed = parse_error_body(body);

        // An object with neither a message nor field errors carries nothing
        // worth reporting, so it is treated like a non-JSON body.
        let parsed = parsed.filter(|(message, fields)| message.is_some() || !fields.is_empty());

        if status == StatusCode::BAD_REQUEST {
            if let Some((message, fields)) = parsed {
                let message = message.unwrap_or_else(|| summarize_fields(&fields));
                return ApiError::Validation { message, fields };
            }
        }

        let context = match parsed {
            Some((Some(message), _)) => message,
            Some((None, fields)) if !fields.is_empty() => summarize_fields(&fields),
            _ => url.to_string(),
        };

        ApiError::from_status(status, &context)
    }

    /// Check if this error means the session is no longer valid.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Get the HTTP status this error was built from, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ApiError::Forbidden => Some(StatusCode::FORBIDDEN),
            ApiError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            ApiError::Validation { .. } => Some(StatusCode::BAD_REQUEST),
            ApiError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS),
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }
}

type ParsedBody = (Option<String>, BTreeMap<String, Vec<String>>);

/// Extract the general message and field errors from a Taiga error body.
///
/// Returns `None` when the body is not a JSON object.
fn parse_error_body(body: &str) -> Option<ParsedBody> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let obj = json.as_object()?;

    let mut message = None;
    let mut fields = BTreeMap::new();

    for (key, value) in obj {
        match key.as_str() {
            "_error_message" | "detail" => {
                if let Some(text) = value.as_str() {
                    message = Some(text.to_string());
                }
            }
            "_error_type" => {}
            _ => {
                let messages: Vec<String> = match value {
                    serde_json::Value::String(s) => vec![s.clone()],
                    serde_json::Value::Array(arr) => arr
                        .iter()
                        .map(|v| match v.as_str() {
                            Some(s) => s.to_string(),
                            None => v.to_string(),
                        })
                        .collect(),
                    other => vec![other.to_string()],
                };
                fields.insert(key.clone(), messages);
            }
        }
    }

    Some((message, fields))
}

fn summarize_fields(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v.join(" ")))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_status_401() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "test");
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_error_from_status_403() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, "test");
        assert!(matches!(err, ApiError::Forbidden));
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_error_from_status_404() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "project 42");
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "project 42"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_error_from_status_429() {
        let err = ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, "test");
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[test]
    fn test_error_from_status_500() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "test");
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[test]
    fn test_error_from_status_other_4xx() {
        let err = ApiError::from_status(StatusCode::CONFLICT, "busy");
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, StatusCode::CONFLICT);
                assert_eq!(message, "busy");
            }
            _ => panic!("Expected Http error"),
        }
    }

    #[test]
    fn test_from_response_validation_fields() {
        let body = r#"{"name": ["This field is required."], "slug": "Already taken"}"#;
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, "http://x/projects", body);
        match err {
            ApiError::Validation { message, fields } => {
                assert_eq!(fields["name"], vec!["This field is required."]);
                assert_eq!(fields["slug"], vec!["Already taken"]);
                assert!(message.contains("name: This field is required."));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_from_response_validation_error_message() {
        let body = r#"{"_error_message": "Invalid username or password", "_error_type": "taiga.base.exceptions.WrongArguments"}"#;
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, "http://x/auth", body);
        match err {
            ApiError::Validation { message, fields } => {
                assert_eq!(message, "Invalid username or password");
                assert!(fields.is_empty());
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_from_response_400_without_json_body() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, "http://x/auth", "bad");
        assert!(matches!(err, ApiError::Http { status, .. } if status == StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_from_response_400_with_empty_object_uses_url() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, "http://x/memberships", "{}");
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "http://x/memberships");
            }
            other => panic!("Expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_response_not_found_uses_detail() {
        let body = r#"{"_error_message": "No Project matches the given query."}"#;
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "http://x/projects/9", body);
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "No Project matches the given query."),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_from_response_empty_body_falls_back_to_url() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "http://x/projects/9", "");
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "http://x/projects/9"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(ApiError::Forbidden.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(ApiError::InvalidUrl("x".into()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("task 12".to_string());
        assert_eq!(err.to_string(), "Resource not found: task 12");
    }
}
