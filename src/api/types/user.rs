//! Users and authentication payloads.

use serde::{Deserialize, Serialize};

/// A Taiga user.
///
/// Returned by `GET /users/{id}` and `GET /users/me`; the private fields
/// (`email`, `accepted_terms`, ...) are only present for the current user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// The user ID.
    pub id: u64,
    /// The login name.
    pub username: String,
    /// The full name as entered.
    #[serde(default)]
    pub full_name: String,
    /// The name to display (full name, or username when empty).
    #[serde(default)]
    pub full_name_display: String,
    /// Email address, only visible to the user themselves.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar fallback color.
    #[serde(default)]
    pub color: Option<String>,
    /// Small avatar URL.
    #[serde(default)]
    pub photo: Option<String>,
    /// Large avatar URL.
    #[serde(default)]
    pub big_photo: Option<String>,
    /// Gravatar hash.
    #[serde(default)]
    pub gravatar_id: Option<String>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Preferred language.
    #[serde(default)]
    pub lang: Option<String>,
    /// Preferred timezone.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Short biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Whether the terms of service were accepted.
    #[serde(default)]
    pub accepted_terms: Option<bool>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// The best available display name.
    pub fn display_name(&self) -> &str {
        if self.full_name_display.is_empty() {
            &self.username
        } else {
            &self.full_name_display
        }
    }
}

/// The authenticated user plus session tokens.
///
/// Returned by `POST /auth` and `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Auth {
    /// The user profile.
    #[serde(flatten)]
    pub user: User,
    /// The session token sent as `Authorization: Bearer`.
    pub auth_token: String,
    /// Refresh token, when the server issues one.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// How the user logs in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoginType {
    /// Username and password.
    Normal,
    /// GitHub OAuth code.
    Github,
}

/// Body of `POST /auth`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginInput {
    /// The login type.
    #[serde(rename = "type")]
    pub kind: LoginType,
    /// Username or email (normal login).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password (normal login).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// OAuth code (GitHub login).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl LoginInput {
    /// Username/password login.
    pub fn normal(username: &str, password: &str) -> Self {
        Self {
            kind: LoginType::Normal,
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            code: None,
        }
    }

    /// GitHub OAuth login.
    pub fn github(code: &str) -> Self {
        Self {
            kind: LoginType::Github,
            username: None,
            password: None,
            code: Some(code.to_string()),
        }
    }
}

/// Registration on a public instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicRegistryInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
    pub accepted_terms: bool,
}

/// Registration through a project invitation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateRegistryInput {
    /// Whether the invited user already has an account.
    pub existing: bool,
    /// The invitation token.
    pub token: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

/// Body of `POST /auth/register`, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RegisterInput {
    Public(PublicRegistryInput),
    Private(PrivateRegistryInput),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_input_skips_absent_fields() {
        let body = serde_json::to_value(LoginInput::github("abc")).unwrap();
        assert_eq!(body, json!({"type": "github", "code": "abc"}));
    }

    #[test]
    fn test_register_input_is_tagged() {
        let input = RegisterInput::Public(PublicRegistryInput {
            username: "ana".into(),
            password: "secret".into(),
            email: "ana@example.com".into(),
            full_name: "Ana".into(),
            accepted_terms: true,
        });
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["type"], "public");
        assert_eq!(body["username"], "ana");
    }

    #[test]
    fn test_auth_flattens_user() {
        let auth: Auth = serde_json::from_value(json!({
            "id": 5,
            "username": "ana",
            "full_name_display": "Ana Pérez",
            "auth_token": "tok",
        }))
        .unwrap();
        assert_eq!(auth.user.id, 5);
        assert_eq!(auth.user.display_name(), "Ana Pérez");
        assert_eq!(auth.auth_token, "tok");
        assert!(auth.user.is_active);
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user: User = serde_json::from_value(json!({"id": 1, "username": "bob"})).unwrap();
        assert_eq!(user.display_name(), "bob");
    }
}
