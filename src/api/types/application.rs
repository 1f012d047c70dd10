//! External applications and their authorization tokens.

use serde::{Deserialize, Serialize};

/// A third-party application registered on the instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub web: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
}

/// An authorization granted by the current user to an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationToken {
    pub id: u64,
    pub user: u64,
    pub application: Application,
    #[serde(default)]
    pub auth_code: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Body of `POST /application-tokens/authorize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizeInput {
    /// The application ID.
    pub application: String,
    /// Opaque value echoed back to the application.
    pub state: String,
}

/// Body of `POST /application-tokens/validate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateInput {
    pub application: String,
    pub auth_code: String,
    pub state: String,
}

/// Returned by `POST /application-tokens/validate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CypheredToken {
    /// The token, encrypted with the application key.
    pub cyphered_token: String,
}
