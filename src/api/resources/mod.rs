//! Typed clients, one per server resource.
//!
//! Every client holds the shared transport and configuration and builds its
//! URLs from `Config::endpoint`, so they are cheap to clone.

mod applications;
mod auth;
mod locales;
mod memberships;
mod projects;
mod resolver;
mod statuses;
mod webhooks;
mod work_items;

pub use applications::{ApplicationTokensApi, ApplicationsApi};
pub use auth::{AuthApi, UsersApi};
pub use locales::{LocalesApi, NotifyPoliciesApi};
pub use memberships::MembershipsApi;
pub use projects::ProjectsApi;
pub use resolver::ResolverApi;
pub use statuses::{IssueStatusesApi, StatusKind, StatusesApi, TaskStatusesApi};
pub use webhooks::{WebhookLogsApi, WebhooksApi};
pub use work_items::{IssuesApi, TasksApi};
