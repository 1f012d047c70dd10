//! Taiga API request and response types.
//!
//! These mirror the server resources. Field names follow the server's
//! snake_case JSON; optional and defaulted fields tolerate the many partial
//! representations the API returns.

mod application;
mod membership;
mod project;
mod user;
mod webhook;
mod work_item;

use serde::{Deserialize, Serialize};

pub use application::{Application, ApplicationToken, AuthorizeInput, CypheredToken, ValidateInput};
pub use membership::{
    MemberInBulk, Membership, MembershipCreation, MembershipCreationInBulk, MembershipPartialInput,
};
pub use project::{
    Attribute, CountStat, CustomAttribute, CustomAttributeType, Duedate, DuplicateProject,
    EditTag, LastFourWeeks, MilestoneStats, NewProject, OpenClosedSeries, Permission, Point,
    PrivateExtraInfo, Project, ProjectIssueStats, ProjectListEntry, ProjectMember,
    ProjectMilestone, ProjectModules, ProjectOwner, ProjectStats, ProjectsListFilter,
    ProjectsListOrderBy, Role, Status, StatsByOpenClosed, Tag, VcsModule,
};
pub use user::{
    Auth, LoginInput, LoginType, PrivateRegistryInput, PublicRegistryInput, RegisterInput, User,
};
pub use webhook::{Webhook, WebhookInput, WebhookLog};
pub use work_item::{Issue, IssueStatus, NewStatus, Task, TaskStatus};

/// A UI language offered by the instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locale {
    pub code: String,
    pub name: String,
    /// Right-to-left script.
    #[serde(default)]
    pub bidi: bool,
}

/// Notification settings of the current user for one project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifyPolicyDetail {
    pub id: u64,
    /// The project ID.
    pub project: u64,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub notify_level: Option<u8>,
    #[serde(default)]
    pub live_notify_level: Option<u8>,
    #[serde(default)]
    pub web_notify_level: bool,
}

/// Body of `PATCH /notify-policies/{id}`. Unset levels are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NotifyPolicyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_notify_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_notify_level: Option<bool>,
}

/// Canonical IDs returned by `GET /resolver`.
///
/// Only the keys that were asked for (plus `project`) are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ResolverResult {
    pub project: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub us: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipage: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolver_result_sparse() {
        let result: ResolverResult =
            serde_json::from_value(json!({"project": 1, "task": 88})).unwrap();
        assert_eq!(result.task, Some(88));
        assert_eq!(result.us, None);
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"project": 1, "task": 88}));
    }

    #[test]
    fn test_locale_bidi_default() {
        let locale: Locale = serde_json::from_value(json!({"code": "en", "name": "English (US)"})).unwrap();
        assert!(!locale.bidi);
    }
}
