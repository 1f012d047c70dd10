//! Resolver: human-facing identifiers to canonical IDs.
//!
//! Every lookup is a single `GET {api}/resolver` whose query string starts
//! with `project` and then carries exactly the identifiers the caller
//! supplied. Absent identifiers are skipped, never sent empty.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::query::QueryParams;
use crate::api::types::ResolverResult;
use crate::config::Config;

/// Client for `/resolver`.
#[derive(Debug, Clone)]
pub struct ResolverApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl ResolverApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("resolver")
    }

    /// Resolve a project slug.
    #[instrument(skip(self))]
    pub async fn project(&self, project: &str) -> Result<ResolverResult> {
        self.resolve(Self::project_query(project)).await
    }

    /// Resolve a user story by reference number.
    #[instrument(skip(self))]
    pub async fn user_story(&self, project: &str, us: u64) -> Result<ResolverResult> {
        self.resolve(Self::project_query(project).push("us", us)).await
    }

    /// Resolve an issue by reference number.
    #[instrument(skip(self))]
    pub async fn issue(&self, project: &str, issue: u64) -> Result<ResolverResult> {
        self.resolve(Self::project_query(project).push("issue", issue))
            .await
    }

    /// Resolve a task by reference number.
    #[instrument(skip(self))]
    pub async fn task(&self, project: &str, task: u64) -> Result<ResolverResult> {
        self.resolve(Self::project_query(project).push("task", task)).await
    }

    /// Resolve a sprint by slug.
    #[instrument(skip(self))]
    pub async fn milestone(&self, project: &str, milestone: &str) -> Result<ResolverResult> {
        self.resolve(Self::project_query(project).push("milestone", milestone))
            .await
    }

    /// Resolve a wiki page by slug.
    #[instrument(skip(self))]
    pub async fn wiki_page(&self, project: &str, wiki_page: &str) -> Result<ResolverResult> {
        self.resolve(Self::project_query(project).push("wikipage", wiki_page))
            .await
    }

    /// Resolve several identifiers at once.
    ///
    /// Only the identifiers given are sent, always in the order `task`, `us`.
    #[instrument(skip(self))]
    pub async fn multiple(
        &self,
        project: &str,
        task: Option<u64>,
        us: Option<u64>,
    ) -> Result<ResolverResult> {
        self.resolve(Self::multiple_query(project, task, us)).await
    }

    /// Resolve a bare reference number, whatever it points to.
    #[instrument(skip(self))]
    pub async fn reference(&self, project: &str, reference: u64) -> Result<ResolverResult> {
        self.resolve(Self::project_query(project).push("ref", reference))
            .await
    }

    fn project_query(project: &str) -> QueryParams {
        QueryParams::new().push("project", project)
    }

    fn multiple_query(project: &str, task: Option<u64>, us: Option<u64>) -> QueryParams {
        Self::project_query(project)
            .push_opt("task", task)
            .push_opt("us", us)
    }

    async fn resolve(&self, query: QueryParams) -> Result<ResolverResult> {
        debug!(query = %query, "Resolving");
        self.http.get_with_query(&self.base(), &query).await
    }
}
