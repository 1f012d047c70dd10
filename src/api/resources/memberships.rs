//! Project memberships and invitations.

use std::sync::Arc;

use tracing::instrument;

use crate::api::client::HttpClient;
use crate::api::error::Result;
use crate::api::query::QueryParams;
use crate::api::types::{
    Membership, MembershipCreation, MembershipCreationInBulk, MembershipPartialInput,
};
use crate::config::Config;

/// Client for `/memberships`.
#[derive(Debug, Clone)]
pub struct MembershipsApi {
    http: Arc<HttpClient>,
    config: Arc<Config>,
}

impl MembershipsApi {
    pub fn new(http: Arc<HttpClient>, config: Arc<Config>) -> Self {
        Self { http, config }
    }

    pub fn base(&self) -> String {
        self.config.endpoint("memberships")
    }

    /// List memberships, optionally for one project.
    #[instrument(skip(self))]
    pub async fn list(&self, project: Option<u64>) -> Result<Vec<Membership>> {
        let query = QueryParams::new().push_opt("project", project);
        self.http.get_with_query(&self.base(), &query).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Membership> {
        self.http.get(&format!("{}/{}", self.base(), id)).await
    }

    /// Invite one user.
    #[instrument(skip(self, input), fields(project = input.project))]
    pub async fn create(&self, input: &MembershipCreation) -> Result<Membership> {
        self.http.post(&self.base(), input).await
    }

    /// Invite several users at once.
    #[instrument(skip(self, input), fields(project = input.project, count = input.members.len()))]
    pub async fn create_in_bulk(&self, input: &MembershipCreationInBulk) -> Result<Vec<Membership>> {
        self.http
            .post(&format!("{}/bulk_create", self.base()), input)
            .await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: u64, input: &MembershipPartialInput) -> Result<Membership> {
        self.http.patch(&format!("{}/{}", self.base(), id), input).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.http.delete(&format!("{}/{}", self.base(), id)).await
    }

    /// Send the invitation email again.
    #[instrument(skip(self))]
    pub async fn resend_invitation(&self, id: u64) -> Result<()> {
        self.http
            .post_empty(&format!("{}/{}/resend_invitation", self.base(), id))
            .await
    }
}
