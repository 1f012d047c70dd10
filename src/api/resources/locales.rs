//! Locales and notification policies.

use std::sync::Arc;

use tracing::instrument;

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::types::{Locale, NotifyPolicyDetail, NotifyPolicyUpdate};
use crate::config::Config;

/// Client for `/locales`.
#[derive(Debug, Clone)]
pub struct LocalesApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl LocalesApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("locales")
    }

    /// Languages the instance offers.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Vec<Locale>> {
        self.http.get(&self.base()).await
    }
}

/// Client for `/notify-policies`.
#[derive(Debug, Clone)]
pub struct NotifyPoliciesApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl NotifyPoliciesApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("notify-policies")
    }

    /// The current user's policy for every project.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<NotifyPolicyDetail>> {
        self.http.get(&self.base()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<NotifyPolicyDetail> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: u64, update: &NotifyPolicyUpdate) -> Result<NotifyPolicyDetail> {
        self.http
            .patch(&format!("{}/{}", self.base(), id), update)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::MockServer;

    use crate::test_support::{anonymous, expect_one, respond};

    #[tokio::test]
    async fn test_locales_get() {
        let server = MockServer::start().await;
        respond(
            &server,
            200,
            json!([
                {"code": "en", "name": "English (US)", "bidi": false},
                {"code": "ar", "name": "العربية", "bidi": true},
            ]),
        )
        .await;
        let (http, config) = anonymous(&server);

        let locales = LocalesApi::new(http, config).get().await.unwrap();
        assert_eq!(locales.len(), 2);
        assert!(locales[1].bidi);
        expect_one(&server, "GET", "/api/v1/locales").await;
    }

    #[tokio::test]
    async fn test_notify_policies_list() {
        let server = MockServer::start().await;
        respond(&server, 200, json!([{"id": 1, "project": 3, "notify_level": 2}])).await;
        let (http, config) = anonymous(&server);

        let policies = NotifyPoliciesApi::new(http, config).list().await.unwrap();
        assert_eq!(policies[0].notify_level, Some(2));
        expect_one(&server, "GET", "/api/v1/notify-policies").await;
    }

    #[tokio::test]
    async fn test_notify_policies_update_is_patch() {
        let server = MockServer::start().await;
        respond(&server, 200, json!({"id": 1, "project": 3, "notify_level": 3})).await;
        let (http, config) = anonymous(&server);

        let update = NotifyPolicyUpdate {
            notify_level: Some(3),
            ..Default::default()
        };
        NotifyPoliciesApi::new(http, config).update(1, &update).await.unwrap();

        let request =
            expect_one(&server, "PATCH", "/api/v1/notify-policies/1").await;
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body, json!({"notify_level": 3}));
    }
}
