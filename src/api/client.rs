//! HTTP transport for the Taiga REST API.
//!
//! This module provides the client every resource API shares. It owns the
//! `reqwest` client and the interceptor chain, turns a method call into a
//! single HTTP request, and decodes the response body. There is no retry:
//! a failed request surfaces to the caller exactly once.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use super::error::{ApiError, Result};
use super::interceptor::{InterceptorChain, RawResponse};
use super::query::QueryParams;
use crate::config::Config;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The shared HTTP transport.
#[derive(Debug)]
pub struct HttpClient {
    /// The underlying HTTP client.
    client: Client,
    /// Interceptors applied to every request.
    interceptors: InterceptorChain,
}

impl HttpClient {
    /// Create a transport for the given configuration.
    ///
    /// Every request carries `Accept: application/json` and an
    /// `Accept-Language` header with the configured default language.
    pub fn new(config: &Config, timeout: Duration, interceptors: InterceptorChain) -> Result<Self> {
        let client = Self::build_http_client(config, timeout)?;
        Ok(Self {
            client,
            interceptors,
        })
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client(config: &Config, timeout: Duration) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let language = HeaderValue::from_str(config.default_language()).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "default language '{}' is not a valid header: {}",
                config.default_language(),
                e
            ))
        })?;
        headers.insert(header::ACCEPT_LANGUAGE, language);

        Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Network)
    }

    /// The installed interceptor chain.
    pub fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    /// Perform a GET request.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send(Method::GET, url, None, None).await
    }

    /// Perform a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &QueryParams,
    ) -> Result<T> {
        self.send(Method::GET, url, Some(query), None).await
    }

    /// Perform a POST request with a JSON body.
    pub async fn post<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.send(Method::POST, url, None, Some(body)).await
    }

    /// Perform a POST request without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send(Method::POST, url, None, None).await
    }

    /// Perform a PATCH request with a JSON body.
    pub async fn patch<B, T>(&self, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.send(Method::PATCH, url, None, Some(body)).await
    }

    /// Perform a DELETE request, discarding any body.
    pub async fn delete(&self, url: &str) -> Result<()> {
        self.send(Method::DELETE, url, None, None).await
    }

    /// Send one request through the interceptor chain and decode the body.
    #[instrument(skip(self, query, body), fields(method = %method, url = %url))]
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        query: Option<&QueryParams>,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let full_url = match query {
            Some(q) => q.apply_to(url),
            None => url.to_string(),
        };

        let mut builder = self.client.request(method, &full_url);
        if let Some(body) = body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        let mut request = builder
            .build()
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", full_url, e)))?;

        self.interceptors.apply_request(&mut request)?;

        debug!("Sending request");
        let outcome = match self.client.execute(request).await {
            Ok(response) => read_response(response).await,
            Err(e) => Err(ApiError::Network(e)),
        };

        let response = self.interceptors.apply_response(outcome)?;

        // A chain without an error interceptor still must not hand error
        // bodies to the decoder.
        if !response.status.is_success() {
            return Err(ApiError::from_response(
                response.status,
                &response.url,
                &response.body_text(),
            ));
        }

        trace!(status = %response.status, bytes = response.body.len(), "Response received");
        decode_body(&response.body)
    }
}

/// Read status, URL and body off a `reqwest` response.
async fn read_response(response: Response) -> Result<RawResponse> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.bytes().await?.to_vec();
    Ok(RawResponse { status, url, body })
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode request body: {}", e)))
}

/// Decode a JSON body. An empty body decodes as JSON `null`, so `()` and
/// `Option<T>` targets work for endpoints that return nothing.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
}
