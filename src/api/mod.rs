//! Taiga API client and types.
//!
//! Requests flow through one shared [`HttpClient`]: the interceptor chain
//! attaches the session token and normalizes failures into [`ApiError`],
//! and the typed resource clients in [`resources`] build URLs and decode
//! the responses.

pub mod client;
pub mod error;
pub mod interceptor;
pub mod query;
pub mod resources;
pub mod token_store;
pub mod types;

pub use client::{HttpClient, DEFAULT_TIMEOUT_SECS};
pub use error::{ApiError, Result};
pub use interceptor::{
    default_chain, AuthInterceptor, ErrorInterceptor, Interceptor, InterceptorChain, RawResponse,
    SessionExpiredHook,
};
pub use query::QueryParams;
pub use token_store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
