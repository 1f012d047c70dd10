//! Typed client for the Taiga project-management REST API.
//!
//! [`Taiga`] wires configuration, token storage and the request pipeline
//! together and exposes one client per server resource.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(test)]
mod test_support;

pub use app::Taiga;
pub use error::{AppError, Result};
