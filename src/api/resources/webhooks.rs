//! Webhooks and webhook delivery logs.

use std::sync::Arc;

use tracing::instrument;

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::query::QueryParams;
use crate::api::types::{Webhook, WebhookInput, WebhookLog};
use crate::config::Config;

/// Client for `/webhooks`.
#[derive(Debug, Clone)]
pub struct WebhooksApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl WebhooksApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("webhooks")
    }

    /// List webhooks, optionally for one project.
    #[instrument(skip(self))]
    pub async fn list(&self, project: Option<u64>) -> Result<Vec<Webhook>> {
        let query = QueryParams::new().push_opt("project", project);
        self.http.get_with_query(&self.base(), &query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Webhook> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }

    #[instrument(skip(self, input), fields(project = input.project))]
    pub async fn create(&self, input: &WebhookInput) -> Result<Webhook> {
        self.http.post(&self.base(), input).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.http.delete(&format!("{}/{}", self.base(), id)).await
    }

    /// Send a test payload and return the resulting log entry.
    #[instrument(skip(self))]
    pub async fn test(&self, id: u64) -> Result<WebhookLog> {
        self.http.post_empty(&format!("{}/{}/test", self.base(), id)).await
    }
}

/// Client for `/webhooklogs`.
#[derive(Debug, Clone)]
pub struct WebhookLogsApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl WebhookLogsApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("webhooklogs")
    }

    /// List delivery logs, optionally for one webhook.
    #[instrument(skip(self))]
    pub async fn list(&self, webhook: Option<u64>) -> Result<Vec<WebhookLog>> {
        let query = QueryParams::new().push_opt("webhook", webhook);
        self.http.get_with_query(&self.base(), &query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<WebhookLog> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }

    /// Deliver a logged payload again.
    #[instrument(skip(self))]
    pub async fn resend(&self, id: u64) -> Result<WebhookLog> {
        self.http.post_empty(&format!("{}/{}/resend", self.base(), id)).await
    }
}
