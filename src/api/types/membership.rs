//! Project memberships and invitations.

use serde::{Deserialize, Serialize};

/// A user's membership in a project, or a pending invitation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Membership {
    pub id: u64,
    /// The project ID.
    pub project: u64,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub project_slug: String,
    /// The role ID.
    pub role: u64,
    #[serde(default)]
    pub role_name: String,
    /// The user ID; `None` while the invitation is pending.
    #[serde(default)]
    pub user: Option<u64>,
    #[serde(default)]
    pub user_email: Option<String>,
    /// Invitation address.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_user_active: bool,
    #[serde(default)]
    pub invited_by: Option<u64>,
    #[serde(default)]
    pub invitation_extra_text: Option<String>,
    #[serde(default)]
    pub user_order: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Membership {
    /// Check whether the invitation has not been accepted yet.
    pub fn is_pending(&self) -> bool {
        self.user.is_none()
    }
}

/// Body of `POST /memberships`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MembershipCreation {
    pub project: u64,
    pub role: u64,
    /// Username or email of the invitee.
    pub username: String,
}

/// One invitee in a bulk invitation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberInBulk {
    pub role_id: u64,
    pub username: String,
}

/// Body of `POST /memberships/bulk_create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MembershipCreationInBulk {
    pub project: u64,
    pub members: Vec<MemberInBulk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation_text: Option<String>,
}

/// Body of `PATCH /memberships/{id}`. Unset fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MembershipPartialInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_order: Option<i64>,
}
