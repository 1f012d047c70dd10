//! Request/response interceptor chain.
//!
//! Every outbound call passes through the chain exactly once. Request-phase
//! hooks run in installation order before the request leaves the process;
//! response-phase hooks run in reverse order as the response comes back.
//! Transport failures enter the response phase as `Err`, so every
//! interceptor observes every outcome.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, StatusCode};
use tracing::{debug, warn};

use super::error::{ApiError, Result};
use super::token_store::{bearer_header, TokenStore};

/// A response as it travels back through the chain.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// The HTTP status.
    pub status: StatusCode,
    /// The final request URL.
    pub url: String,
    /// The undecoded body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// The body as lossy UTF-8 text.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A request/response transformer.
pub trait Interceptor: Send + Sync + fmt::Debug {
    /// Inspect or modify the request before it is sent.
    fn on_request(&self, request: &mut Request) -> Result<()> {
        let _ = request;
        Ok(())
    }

    /// Inspect or transform the outcome on its way back to the caller.
    fn on_response(&self, outcome: Result<RawResponse>) -> Result<RawResponse> {
        outcome
    }
}

/// An ordered list of interceptors.
#[derive(Debug, Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor, builder style.
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.push(Arc::new(interceptor));
        self
    }

    /// Append a shared interceptor.
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Number of installed interceptors.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Check whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run the request phase in installation order.
    pub fn apply_request(&self, request: &mut Request) -> Result<()> {
        for interceptor in &self.interceptors {
            interceptor.on_request(request)?;
        }
        Ok(())
    }

    /// Run the response phase in reverse installation order.
    pub fn apply_response(&self, outcome: Result<RawResponse>) -> Result<RawResponse> {
        self.interceptors
            .iter()
            .rev()
            .fold(outcome, |acc, interceptor| interceptor.on_response(acc))
    }
}

/// Callback invoked when the server rejects the session.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Attaches the bearer token and handles session expiry.
///
/// On a 401 to a request that carried a token, the stored token is cleared
/// and the session-expired hook, if any, is invoked. The error still
/// propagates to the caller. A 403 means
/// the session is valid but lacks permission, so it is passed through.
pub struct AuthInterceptor {
    tokens: Arc<dyn TokenStore>,
    on_session_expired: Option<SessionExpiredHook>,
}

impl AuthInterceptor {
    /// Create an interceptor reading tokens from `tokens`.
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            tokens,
            on_session_expired: None,
        }
    }

    /// Install a callback for the logout/redirect flow.
    pub fn on_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }
}

impl fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("tokens", &self.tokens)
            .field("has_session_hook", &self.on_session_expired.is_some())
            .finish()
    }
}

impl Interceptor for AuthInterceptor {
    fn on_request(&self, request: &mut Request) -> Result<()> {
        if let Some(token) = self.tokens.load() {
            let value = HeaderValue::from_str(&bearer_header(&token))
                .map_err(|e| ApiError::TokenStore(format!("stored token is not a valid header: {}", e)))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }
        Ok(())
    }

    fn on_response(&self, outcome: Result<RawResponse>) -> Result<RawResponse> {
        // No stored token means the request went out anonymously.
        if let Err(ApiError::Unauthorized) = &outcome {
            if !self.tokens.has_token() {
                debug!("Anonymous request rejected with 401");
                return outcome;
            }
            warn!("Session rejected by server, clearing stored token");
            if let Err(e) = self.tokens.clear() {
                warn!("Failed to clear stored token: {}", e);
            }
            if let Some(hook) = &self.on_session_expired {
                hook();
            }
        }
        outcome
    }
}

/// Maps non-success responses to a normalized [`ApiError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorInterceptor;

impl Interceptor for ErrorInterceptor {
    fn on_response(&self, outcome: Result<RawResponse>) -> Result<RawResponse> {
        let response = outcome?;
        if response.status.is_success() {
            return Ok(response);
        }

        let body = response.body_text();
        debug!(status = %response.status, "Error response body: {}", body);
        Err(ApiError::from_response(response.status, &response.url, &body))
    }
}

/// The default chain: auth first, so it sees errors after normalization.
pub fn default_chain(tokens: Arc<dyn TokenStore>, hook: Option<SessionExpiredHook>) -> InterceptorChain {
    let mut auth = AuthInterceptor::new(tokens);
    if let Some(hook) = hook {
        auth = auth.on_session_expired(hook);
    }
    InterceptorChain::new().with(auth).with(ErrorInterceptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::api::token_store::MemoryTokenStore;

    fn request() -> Request {
        reqwest::Client::new()
            .get("http://localhost/api/v1/projects")
            .build()
            .unwrap()
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            url: "http://localhost/api/v1/projects".to_string(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[derive(Debug)]
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Interceptor for Recorder {
        fn on_request(&self, _request: &mut Request) -> Result<()> {
            self.log.lock().unwrap().push(format!("req:{}", self.name));
            Ok(())
        }

        fn on_response(&self, outcome: Result<RawResponse>) -> Result<RawResponse> {
            self.log.lock().unwrap().push(format!("res:{}", self.name));
            outcome
        }
    }

    #[test]
    fn test_request_in_order_response_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new()
            .with(Recorder { name: "a", log: log.clone() })
            .with(Recorder { name: "b", log: log.clone() });

        let mut req = request();
        chain.apply_request(&mut req).unwrap();
        chain.apply_response(Ok(response(200, "{}"))).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["req:a", "req:b", "res:b", "res:a"]
        );
    }

    #[test]
    fn test_auth_attaches_bearer_when_token_present() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("tok123"));
        let chain = InterceptorChain::new().with(AuthInterceptor::new(tokens));

        let mut req = request();
        chain.apply_request(&mut req).unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Bearer tok123");
    }

    #[test]
    fn test_auth_omits_header_without_token() {
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let chain = InterceptorChain::new().with(AuthInterceptor::new(tokens));

        let mut req = request();
        chain.apply_request(&mut req).unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_error_interceptor_maps_status() {
        let outcome = ErrorInterceptor.on_response(Ok(response(404, "")));
        assert!(matches!(outcome, Err(ApiError::NotFound(_))));

        let outcome = ErrorInterceptor.on_response(Ok(response(204, "")));
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_unauthorized_clears_token_and_fires_hook() {
        let store = Arc::new(MemoryTokenStore::with_token("expired"));
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let hook: SessionExpiredHook = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let chain = default_chain(store.clone(), Some(hook));
        let outcome = chain.apply_response(Ok(response(401, "")));

        assert!(matches!(outcome, Err(ApiError::Unauthorized)));
        assert_eq!(store.load(), None);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unauthorized_without_token_skips_hook() {
        let store = Arc::new(MemoryTokenStore::new());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let hook: SessionExpiredHook = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let chain = default_chain(store, Some(hook));
        let outcome = chain.apply_response(Ok(response(401, "")));

        assert!(matches!(outcome, Err(ApiError::Unauthorized)));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_forbidden_keeps_token() {
        let store = Arc::new(MemoryTokenStore::with_token("valid"));
        let chain = default_chain(store.clone(), None);

        let outcome = chain.apply_response(Ok(response(403, "")));

        assert!(matches!(outcome, Err(ApiError::Forbidden)));
        assert_eq!(store.load().as_deref(), Some("valid"));
    }

    #[test]
    fn test_errors_pass_through_every_interceptor() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new()
            .with(Recorder { name: "outer", log: log.clone() })
            .with(ErrorInterceptor);

        let outcome = chain.apply_response(Ok(response(500, "")));
        assert!(matches!(outcome, Err(ApiError::ServerError(_))));
        assert_eq!(*log.lock().unwrap(), vec!["res:outer"]);
    }
}
