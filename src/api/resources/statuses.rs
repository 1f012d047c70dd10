//! Issue and task statuses.
//!
//! Both endpoints share one shape, so a single generic client serves them.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::query::QueryParams;
use crate::api::types::{IssueStatus, NewStatus, TaskStatus};
use crate::config::Config;

/// A status resource and the path it lives under.
pub trait StatusKind: DeserializeOwned + Send {
    const PATH: &'static str;
}

impl StatusKind for IssueStatus {
    const PATH: &'static str = "issue-statuses";
}

impl StatusKind for TaskStatus {
    const PATH: &'static str = "task-statuses";
}

/// Client for a status collection.
#[derive(Debug)]
pub struct StatusesApi<S> {
    http: Arc<HttpClient>,
    config: Arc<Config>,
    _kind: PhantomData<fn() -> S>,
}

impl<S> Clone for StatusesApi<S> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            _kind: PhantomData,
        }
    }
}

/// Client for `/issue-statuses`.
pub type IssueStatusesApi = StatusesApi<IssueStatus>;
/// Client for `/task-statuses`.
pub type TaskStatusesApi = StatusesApi<TaskStatus>;

impl<S: StatusKind> StatusesApi<S> {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self {
            http,
            config,
            _kind: PhantomData,
        }
    }

    pub fn base(&self) -> String {
        self.config.endpoint(S::PATH)
    }

    /// List statuses, optionally for one project.
    #[instrument(skip(self), fields(path = S::PATH))]
    pub async fn list(&self, project: Option<u64>) -> Result<Vec<S>> {
        let query = QueryParams::new().push_opt("project", project);
        self.http.get_with_query(&self.base(), &query).await
    }

    #[instrument(skip(self), fields(path = S::PATH))]
    pub async fn get(&self, id: u64) -> Result<S> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }

    #[instrument(skip(self, input), fields(path = S::PATH, project = input.project))]
    pub async fn create(&self, input: &NewStatus) -> Result<S> {
        self.http.post(&self.base(), input).await
    }

    #[instrument(skip(self), fields(path = S::PATH))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.http.delete(&format!("{}/{}", self.base(), id)).await
    }
}
