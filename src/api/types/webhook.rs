//! Webhooks and their delivery logs.

use serde::{Deserialize, Serialize};

/// A project webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Webhook {
    pub id: u64,
    pub project: u64,
    pub name: String,
    pub url: String,
    /// Secret used to sign payloads.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub logs_counter: u64,
}

/// Body of `POST /webhooks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookInput {
    pub project: u64,
    pub name: String,
    pub url: String,
    pub key: String,
}

/// One delivery attempt of a webhook.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookLog {
    pub id: u64,
    pub webhook: u64,
    pub url: String,
    /// The HTTP status returned by the receiver.
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub request_data: serde_json::Value,
    #[serde(default)]
    pub request_headers: serde_json::Value,
    #[serde(default)]
    pub response_data: Option<String>,
    #[serde(default)]
    pub response_headers: serde_json::Value,
    /// Round-trip time in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub created: Option<String>,
}

impl WebhookLog {
    /// Check whether the receiver answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_webhook_log_success() {
        let log: WebhookLog = serde_json::from_value(json!({
            "id": 1,
            "webhook": 7,
            "url": "https://hooks.example.com",
            "status": 204,
            "duration": 0.12,
        }))
        .unwrap();
        assert!(log.is_success());

        let failed = WebhookLog {
            status: Some(500),
            ..log.clone()
        };
        assert!(!failed.is_success());

        let unreachable = WebhookLog { status: None, ..log };
        assert!(!unreachable.is_success());
    }
}
