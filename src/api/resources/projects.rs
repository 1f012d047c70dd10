//! Projects, their tags, statistics and integrations.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::query::QueryParams;
use crate::api::types::{
    DuplicateProject, EditTag, NewProject, Project, ProjectIssueStats, ProjectListEntry,
    ProjectModules, ProjectStats, ProjectsListFilter, ProjectsListOrderBy, Tag,
};
use crate::config::Config;

/// Client for `/projects`.
#[derive(Debug, Clone)]
pub struct ProjectsApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl ProjectsApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("projects")
    }

    fn item(&self, id: u64) -> String {
        format!("{}/{}", self.base(), id)
    }

    /// List projects matching `filter`.
    #[instrument(skip(self, filter))]
    pub async fn list(
        &self,
        filter: &ProjectsListFilter,
        order_by: Option<ProjectsListOrderBy>,
    ) -> Result<Vec<ProjectListEntry>> {
        let query = filter.to_query(order_by);
        debug!(query = %query, "Listing projects");
        self.http.get_with_query(&self.base(), &query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Project> {
        self.http.get(&self.item(id)).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Project> {
        let query = QueryParams::new().push("slug", slug);
        self.http
            .get_with_query(&format!("{}/by_slug", self.base()), &query)
            .await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &NewProject) -> Result<Project> {
        self.http.post(&self.base(), input).await
    }

    /// Copy a project's configuration into a new project.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn duplicate(&self, id: u64, input: &DuplicateProject) -> Result<Project> {
        self.http
            .post(&format!("{}/duplicate", self.item(id)), input)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.http.delete(&self.item(id)).await
    }

    /// Burndown and point totals.
    #[instrument(skip(self))]
    pub async fn stats(&self, id: u64) -> Result<ProjectStats> {
        self.http.get(&format!("{}/stats", self.item(id))).await
    }

    #[instrument(skip(self))]
    pub async fn issues_stats(&self, id: u64) -> Result<ProjectIssueStats> {
        self.http.get(&format!("{}/issues_stats", self.item(id))).await
    }

    /// Tag name to color. Tags without a color map to `None`.
    #[instrument(skip(self))]
    pub async fn tags_colors(&self, id: u64) -> Result<HashMap<String, Option<String>>> {
        self.http.get(&format!("{}/tags_colors", self.item(id))).await
    }

    #[instrument(skip(self, tag), fields(tag = %tag.tag))]
    pub async fn create_tag(&self, id: u64, tag: &Tag) -> Result<()> {
        self.http
            .post(&format!("{}/create_tag", self.item(id)), tag)
            .await
    }

    /// Rename or recolor a tag.
    #[instrument(skip(self, edit), fields(from = %edit.from_tag, to = %edit.to_tag))]
    pub async fn edit_tag(&self, id: u64, edit: &EditTag) -> Result<()> {
        self.http
            .post(&format!("{}/edit_tag", self.item(id)), edit)
            .await
    }

    /// VCS integration settings.
    #[instrument(skip(self))]
    pub async fn modules(&self, id: u64) -> Result<ProjectModules> {
        self.http.get(&format!("{}/modules", self.item(id))).await
    }
}
