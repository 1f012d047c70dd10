//! External applications and the tokens users grant them.

use std::sync::Arc;

use tracing::instrument;

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::types::{Application, ApplicationToken, AuthorizeInput, CypheredToken, ValidateInput};
use crate::config::Config;

/// Client for `/applications`.
#[derive(Debug, Clone)]
pub struct ApplicationsApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl ApplicationsApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("applications")
    }

    #[instrument(skip(self))]
    pub async fn get(&self, application_id: &str) -> Result<Application> {
        self.http.get(&format!("{}/{}", self.base(), application_id)).await
    }

    /// The current user's token for an application.
    #[instrument(skip(self))]
    pub async fn get_token(&self, application_id: &str) -> Result<ApplicationToken> {
        self.http
            .get(&format!("{}/{}/token", self.base(), application_id))
            .await
    }
}

/// Client for `/application-tokens`.
#[derive(Debug, Clone)]
pub struct ApplicationTokensApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl ApplicationTokensApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("application-tokens")
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ApplicationToken>> {
        self.http.get(&self.base()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, token_id: &str) -> Result<ApplicationToken> {
        self.http.get(&format!("{}/{}", self.base(), token_id)).await
    }

    /// Revoke an application's access.
    #[instrument(skip(self))]
    pub async fn delete(&self, token_id: &str) -> Result<()> {
        self.http.delete(&format!("{}/{}", self.base(), token_id)).await
    }

    /// Grant an application access; returns the token holding the auth code.
    #[instrument(skip(self, input), fields(application = %input.application))]
    pub async fn authorize(&self, input: &AuthorizeInput) -> Result<ApplicationToken> {
        self.http
            .post(&format!("{}/authorize", self.base()), input)
            .await
    }

    /// Exchange an auth code for the encrypted token.
    #[instrument(skip(self, input), fields(application = %input.application))]
    pub async fn validate(&self, input: &ValidateInput) -> Result<CypheredToken> {
        self.http
            .post(&format!("{}/validate", self.base()), input)
            .await
    }
}
