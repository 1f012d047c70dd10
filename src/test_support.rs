//! Shared fixtures for client tests.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::api::client::HttpClient;
use crate::api::interceptor::default_chain;
use crate::api::token_store::{MemoryTokenStore, TokenStore};
use crate::config::Config;

/// Configuration pointing at the mock server's `/api/v1`.
pub fn config(server: &MockServer) -> Config {
    Config::new(&format!("{}/api/v1", server.uri()), "en", false).unwrap()
}

/// The API base URL for the mock server.
pub fn api_url(server: &MockServer) -> String {
    format!("{}/api/v1", server.uri())
}

/// A transport with the default interceptor chain.
pub fn transport(server: &MockServer, tokens: Arc<dyn TokenStore>) -> (Arc<HttpClient>, Arc<Config>) {
    let config = config(server);
    let http = HttpClient::new(&config, Duration::from_secs(5), default_chain(tokens, None)).unwrap();
    (Arc::new(http), Arc::new(config))
}

/// A transport with no stored token.
pub fn anonymous(server: &MockServer) -> (Arc<HttpClient>, Arc<Config>) {
    transport(server, Arc::new(MemoryTokenStore::new()))
}

/// Answer every request with `status` and a JSON body.
pub async fn respond(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer every request with an empty 204.
pub async fn respond_empty(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

/// Path and query of a recorded request, e.g. `/api/v1/resolver?project=p`.
///
/// wiremock records every URL against `http://localhost`, so the host part
/// is never compared.
pub fn path_and_query(request: &Request) -> String {
    match request.url.query() {
        Some(query) => format!("{}?{}", request.url.path(), query),
        None => request.url.path().to_string(),
    }
}

/// Assert the server saw exactly one request, with this method, path and query.
pub async fn expect_one(server: &MockServer, method: &str, path: &str) -> Request {
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one request, got {:?}", requests);
    let request = requests.into_iter().next().unwrap();
    assert_eq!(request.method.as_str(), method);
    assert_eq!(path_and_query(&request), path);
    request
}
