//! Login, registration and the current user.
//!
//! This is the only writer of the persisted session token. The token is
//! stored after the response has been fully decoded, so a login that is
//! abandoned or fails midway leaves the previous session untouched.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::token_store::TokenStore;
use crate::api::types::{Auth, LoginInput, RegisterInput, User};
use crate::config::Config;

/// Client for `/auth`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            config,
            tokens,
        }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("auth")
    }

    /// Log in and persist the session token.
    #[instrument(skip(self, input), fields(kind = ?input.kind))]
    pub async fn login(&self, input: &LoginInput) -> Result<Auth> {
        let auth: Auth = self.http.post(&self.base(), input).await?;
        self.tokens.store(&auth.auth_token)?;
        info!(user = %auth.user.username, "Logged in");
        Ok(auth)
    }

    /// Register a new account and persist the session token.
    #[instrument(skip(self, input))]
    pub async fn register(&self, input: &RegisterInput) -> Result<Auth> {
        let auth: Auth = self
            .http
            .post(&format!("{}/register", self.base()), input)
            .await?;
        self.tokens.store(&auth.auth_token)?;
        info!(user = %auth.user.username, "Registered");
        Ok(auth)
    }

    /// Forget the session token. No request is made.
    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Check whether a session token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.tokens.has_token()
    }
}

/// Client for `/users`.
#[derive(Debug, Clone)]
pub struct UsersApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl UsersApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("users")
    }

    /// The authenticated user.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        self.http.get(&format!("{}/me", self.base())).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<User> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }
}
