//! Issues and tasks.

use std::sync::Arc;

use tracing::instrument;

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::query::QueryParams;
use crate::api::types::{Issue, Task};
use crate::config::Config;

/// Client for `/issues`.
#[derive(Debug, Clone)]
pub struct IssuesApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl IssuesApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("issues")
    }

    #[instrument(skip(self))]
    pub async fn list(&self, project: Option<u64>) -> Result<Vec<Issue>> {
        let query = QueryParams::new().push_opt("project", project);
        self.http.get_with_query(&self.base(), &query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Issue> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }

    /// Look up an issue by its project-scoped reference number.
    #[instrument(skip(self))]
    pub async fn get_by_ref(&self, project: u64, reference: u64) -> Result<Issue> {
        let query = QueryParams::new()
            .push("project", project)
            .push("ref", reference);
        self.http
            .get_with_query(&format!("{}/by_ref", self.base()), &query)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.http.delete(&format!("{}/{}", self.base(), id)).await
    }
}

/// Client for `/tasks`.
#[derive(Debug, Clone)]
pub struct TasksApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl TasksApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("tasks")
    }

    /// List tasks. Each filter is sent only when given.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        project: Option<u64>,
        milestone: Option<u64>,
        user_story: Option<u64>,
    ) -> Result<Vec<Task>> {
        let query = QueryParams::new()
            .push_opt("project", project)
            .push_opt("milestone", milestone)
            .push_opt("user_story", user_story);
        self.http.get_with_query(&self.base(), &query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Task> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_ref(&self, project: u64, reference: u64) -> Result<Task> {
        let query = QueryParams::new()
            .push("project", project)
            .push("ref", reference);
        self.http
            .get_with_query(&format!("{}/by_ref", self.base()), &query)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.http.delete(&format!("{}/{}", self.base(), id)).await
    }
}
