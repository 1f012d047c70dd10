//! Projects and their nested configuration.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::query::QueryParams;

/// A project permission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ModifyTask,
    ModifyEpic,
    AddTask,
    AdminRoles,
    CommentWikiPage,
    ViewProject,
    ModifyProject,
    ModifyWikiPage,
    AdminProjectValues,
    ModifyUs,
    ViewEpics,
    DeleteProject,
    ModifyIssue,
    ModifyWikiLink,
    AddIssue,
    DeleteMilestone,
    RemoveMember,
    DeleteEpic,
    DeleteWikiLink,
    AddEpic,
    CommentEpic,
    DeleteTask,
    CommentTask,
    CommentIssue,
    ViewIssues,
    AddUs,
    AddMember,
    AddWikiPage,
    DeleteIssue,
    ViewWikiPages,
    ViewMilestones,
    AddMilestone,
    CommentUs,
    DeleteWikiPage,
    ViewUs,
    ModifyMilestone,
    AddWikiLink,
    DeleteUs,
    ViewWikiLinks,
    ViewTasks,
    /// A permission this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A workflow status (user story, task, issue or epic).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Status {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub project_id: u64,
}

/// A due-date band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Duedate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub by_default: bool,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub days_to_due: Option<i64>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub project_id: u64,
}

/// A simple colored attribute: issue type, priority, severity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attribute {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub project_id: u64,
}

/// The value type of a custom attribute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CustomAttributeType {
    Text,
    Multiline,
    Richtext,
    Date,
    Url,
    Dropdown,
    Checkbox,
    Number,
}

/// A user-defined field on epics, stories, tasks or issues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomAttribute {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: CustomAttributeType,
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}

/// A project member as embedded in the project detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMember {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub full_name_display: String,
    #[serde(default)]
    pub role: u64,
    #[serde(default)]
    pub role_name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// The project owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectOwner {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub full_name_display: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub big_photo: Option<String>,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// A sprint, as listed on the project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMilestone {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub closed: bool,
}

/// An estimation point value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub value: Option<f64>,
}

/// A project role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub computable: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub project_id: u64,
}

/// Whether the project may switch between public and private.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PrivateExtraInfo {
    #[serde(default)]
    pub can_be_updated: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Full project detail.
///
/// Returned by `GET /projects/{id}` and `GET /projects/by_slug`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default)]
    pub owner: Option<ProjectOwner>,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub milestones: Vec<ProjectMilestone>,
    #[serde(default)]
    pub points: Vec<Point>,

    #[serde(default)]
    pub epic_statuses: Vec<Status>,
    #[serde(default)]
    pub us_statuses: Vec<Status>,
    #[serde(default)]
    pub task_statuses: Vec<Status>,
    #[serde(default)]
    pub issue_statuses: Vec<Status>,
    #[serde(default)]
    pub issue_types: Vec<Attribute>,
    #[serde(default)]
    pub priorities: Vec<Attribute>,
    #[serde(default)]
    pub severities: Vec<Attribute>,
    #[serde(default)]
    pub us_duedates: Vec<Duedate>,
    #[serde(default)]
    pub task_duedates: Vec<Duedate>,
    #[serde(default)]
    pub issue_duedates: Vec<Duedate>,
    #[serde(default)]
    pub epic_custom_attributes: Vec<CustomAttribute>,
    #[serde(default)]
    pub userstory_custom_attributes: Vec<CustomAttribute>,
    #[serde(default)]
    pub task_custom_attributes: Vec<CustomAttribute>,
    #[serde(default)]
    pub issue_custom_attributes: Vec<CustomAttribute>,

    #[serde(default)]
    pub default_epic_status: Option<u64>,
    #[serde(default)]
    pub default_us_status: Option<u64>,
    #[serde(default)]
    pub default_task_status: Option<u64>,
    #[serde(default)]
    pub default_issue_status: Option<u64>,
    #[serde(default)]
    pub default_issue_type: Option<u64>,
    #[serde(default)]
    pub default_points: Option<u64>,
    #[serde(default)]
    pub default_priority: Option<u64>,
    #[serde(default)]
    pub default_severity: Option<u64>,

    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_private_extra_info: PrivateExtraInfo,
    #[serde(default)]
    pub is_backlog_activated: bool,
    #[serde(default)]
    pub is_kanban_activated: bool,
    #[serde(default)]
    pub is_wiki_activated: bool,
    #[serde(default)]
    pub is_issues_activated: bool,
    #[serde(default)]
    pub is_epics_activated: bool,
    #[serde(default)]
    pub is_contact_activated: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_looking_for_people: bool,
    #[serde(default)]
    pub looking_for_people_note: String,
    #[serde(default)]
    pub is_out_of_owner_limits: bool,
    #[serde(default)]
    pub blocked_code: Option<String>,

    #[serde(default)]
    pub i_am_admin: bool,
    #[serde(default)]
    pub i_am_member: bool,
    #[serde(default)]
    pub i_am_owner: bool,
    #[serde(default)]
    pub is_fan: bool,
    #[serde(default)]
    pub is_watcher: bool,
    #[serde(default)]
    pub my_permissions: Vec<Permission>,
    #[serde(default)]
    pub public_permissions: Vec<Permission>,
    #[serde(default)]
    pub anon_permissions: Vec<Permission>,
    #[serde(default)]
    pub notify_level: Option<u8>,
    #[serde(default)]
    pub my_homepage: Option<serde_json::Value>,

    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tags_colors: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub logo_small_url: Option<String>,
    #[serde(default)]
    pub logo_big_url: Option<String>,
    #[serde(default)]
    pub videoconferences: Option<String>,
    #[serde(default)]
    pub videoconferences_extra_data: Option<String>,
    #[serde(default)]
    pub creation_template: Option<u64>,
    #[serde(default)]
    pub transfer_token: Option<String>,
    #[serde(default)]
    pub max_memberships: Option<u64>,

    #[serde(default)]
    pub total_milestones: Option<u64>,
    #[serde(default)]
    pub total_closed_milestones: u64,
    #[serde(default)]
    pub total_story_points: Option<f64>,
    #[serde(default)]
    pub total_memberships: u64,
    #[serde(default)]
    pub total_fans: u64,
    #[serde(default)]
    pub total_watchers: u64,
    #[serde(default)]
    pub total_activity: u64,
}

impl Project {
    /// Check whether the current user holds a permission on this project.
    pub fn can(&self, permission: Permission) -> bool {
        self.my_permissions.contains(&permission)
    }

    /// Find a user story status by ID.
    pub fn us_status(&self, id: u64) -> Option<&Status> {
        self.us_statuses.iter().find(|s| s.id == id)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.slug)
    }
}

/// A project as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectListEntry {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: Option<ProjectOwner>,
    /// Member user IDs.
    #[serde(default)]
    pub members: Vec<u64>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_looking_for_people: bool,
    #[serde(default)]
    pub i_am_member: bool,
    #[serde(default)]
    pub i_am_admin: bool,
    #[serde(default)]
    pub my_permissions: Vec<Permission>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub logo_small_url: Option<String>,
    #[serde(default)]
    pub total_fans: u64,
    #[serde(default)]
    pub total_activity: u64,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_template: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_backlog_activated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_kanban_activated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_issues_activated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_wiki_activated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videoconferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videoconferences_extra_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_milestones: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_story_points: Option<f64>,
}

/// Body of `POST /projects/{id}/duplicate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicateProject {
    pub name: String,
    pub description: String,
    pub is_private: bool,
    /// Users to carry over as members.
    pub users: Vec<u64>,
}

/// Sort orders accepted by the project list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectsListOrderBy {
    MembershipsUserOrder,
    TotalFans,
    TotalFansLastWeek,
    TotalFansLastMonth,
    TotalFansLastYear,
    TotalActivity,
    TotalActivityLastWeek,
    TotalActivityLastMonth,
    TotalActivityLastYear,
}

impl ProjectsListOrderBy {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MembershipsUserOrder => "memberships_user_order",
            Self::TotalFans => "total_fans",
            Self::TotalFansLastWeek => "total_fans_last_week",
            Self::TotalFansLastMonth => "total_fans_last_month",
            Self::TotalFansLastYear => "total_fans_last_year",
            Self::TotalActivity => "total_activity",
            Self::TotalActivityLastWeek => "total_activity_last_week",
            Self::TotalActivityLastMonth => "total_activity_last_month",
            Self::TotalActivityLastYear => "total_activity_last_year",
        }
    }
}

impl fmt::Display for ProjectsListOrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for `GET /projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectsListFilter {
    pub member: Option<u64>,
    pub members: Vec<u64>,
    pub is_looking_for_people: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_backlog_activated: Option<bool>,
    pub is_kanban_activated: Option<bool>,
}

impl ProjectsListFilter {
    /// Build the query, skipping unset filters.
    pub fn to_query(&self, order_by: Option<ProjectsListOrderBy>) -> QueryParams {
        QueryParams::new()
            .push_opt("member", self.member)
            .push_list("members", &self.members)
            .push_opt("is_looking_for_people", self.is_looking_for_people)
            .push_opt("is_featured", self.is_featured)
            .push_opt("is_backlog_activated", self.is_backlog_activated)
            .push_opt("is_kanban_activated", self.is_kanban_activated)
            .push_opt("order_by", order_by)
    }
}

/// Per-sprint burndown values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MilestoneStats {
    pub name: String,
    #[serde(default)]
    pub optimal: f64,
    #[serde(default)]
    pub evolution: Option<f64>,
    #[serde(rename = "client-increment", default)]
    pub client_increment: f64,
    #[serde(rename = "team-increment", default)]
    pub team_increment: f64,
}

/// Returned by `GET /projects/{id}/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectStats {
    pub name: String,
    #[serde(default)]
    pub total_milestones: Option<u64>,
    #[serde(default)]
    pub total_points: Option<f64>,
    #[serde(default)]
    pub closed_points: f64,
    #[serde(default)]
    pub closed_points_per_role: HashMap<String, f64>,
    #[serde(default)]
    pub defined_points: f64,
    #[serde(default)]
    pub defined_points_per_role: HashMap<String, f64>,
    #[serde(default)]
    pub assigned_points: f64,
    #[serde(default)]
    pub assigned_points_per_role: HashMap<String, f64>,
    #[serde(default)]
    pub milestones: Vec<MilestoneStats>,
    #[serde(default)]
    pub speed: f64,
}

/// Issue count for one grouping value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountStat {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub count: u64,
    /// Present when grouping by assignee.
    #[serde(default)]
    pub username: Option<String>,
}

/// Daily series for one grouping value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsByOpenClosed {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub data: Vec<u64>,
}

/// Open/closed daily series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OpenClosedSeries {
    #[serde(default)]
    pub open: Vec<u64>,
    #[serde(default)]
    pub closed: Vec<u64>,
}

/// The last four weeks of issue activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LastFourWeeks {
    #[serde(default)]
    pub by_open_closed: OpenClosedSeries,
    #[serde(default)]
    pub by_priority: HashMap<String, StatsByOpenClosed>,
    #[serde(default)]
    pub by_severity: HashMap<String, StatsByOpenClosed>,
    #[serde(default)]
    pub by_status: HashMap<String, StatsByOpenClosed>,
}

/// Returned by `GET /projects/{id}/issues_stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectIssueStats {
    #[serde(default)]
    pub total_issues: u64,
    #[serde(default)]
    pub opened_issues: u64,
    #[serde(default)]
    pub closed_issues: u64,
    #[serde(default)]
    pub issues_per_assigned_to: HashMap<String, CountStat>,
    #[serde(default)]
    pub issues_per_owner: HashMap<String, CountStat>,
    #[serde(default)]
    pub issues_per_priority: HashMap<String, CountStat>,
    #[serde(default)]
    pub issues_per_severity: HashMap<String, CountStat>,
    #[serde(default)]
    pub issues_per_status: HashMap<String, CountStat>,
    #[serde(default)]
    pub issues_per_type: HashMap<String, CountStat>,
    #[serde(default)]
    pub last_four_weeks_days: LastFourWeeks,
}

/// Body of `POST /projects/{id}/create_tag`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub tag: String,
    pub color: Option<String>,
}

/// Body of `POST /projects/{id}/edit_tag`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditTag {
    pub from_tag: String,
    pub to_tag: String,
    pub color: Option<String>,
}

/// Webhook settings of one VCS integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VcsModule {
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub webhooks_url: String,
    #[serde(default)]
    pub valid_origin_ips: Vec<String>,
}

/// Returned by `GET /projects/{id}/modules`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProjectModules {
    #[serde(default)]
    pub bitbucket: Option<VcsModule>,
    #[serde(default)]
    pub github: Option<VcsModule>,
    #[serde(default)]
    pub gitlab: Option<VcsModule>,
    #[serde(default)]
    pub gogs: Option<VcsModule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_permission_is_tolerated() {
        let perms: Vec<Permission> =
            serde_json::from_value(json!(["view_project", "modify_us", "fly_rocket"])).unwrap();
        assert_eq!(
            perms,
            vec![Permission::ViewProject, Permission::ModifyUs, Permission::Unknown]
        );
    }

    #[test]
    fn test_minimal_project_deserializes() {
        let project: Project = serde_json::from_value(json!({
            "id": 3,
            "name": "Sprinty",
            "slug": "ana-sprinty",
            "my_permissions": ["view_us", "add_us"],
            "us_statuses": [{"id": 10, "name": "New", "is_closed": false}],
        }))
        .unwrap();

        assert!(project.can(Permission::AddUs));
        assert!(!project.can(Permission::DeleteProject));
        assert_eq!(project.us_status(10).map(|s| s.name.as_str()), Some("New"));
        assert_eq!(project.to_string(), "Sprinty (ana-sprinty)");
    }

    #[test]
    fn test_list_filter_skips_unset() {
        let filter = ProjectsListFilter {
            member: Some(4),
            is_featured: Some(true),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query(Some(ProjectsListOrderBy::TotalFans)).to_string(),
            "member=4&is_featured=true&order_by=total_fans"
        );
        assert!(ProjectsListFilter::default().to_query(None).is_empty());
    }

    #[test]
    fn test_new_project_skips_optional_fields() {
        let body = serde_json::to_value(NewProject {
            name: "P".into(),
            description: "D".into(),
            is_private: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"name": "P", "description": "D", "is_private": false}));
    }

    #[test]
    fn test_milestone_stats_hyphenated_keys() {
        let stats: MilestoneStats = serde_json::from_value(json!({
            "name": "Sprint 1",
            "optimal": 10.0,
            "evolution": null,
            "client-increment": 1.5,
            "team-increment": 2.0,
        }))
        .unwrap();
        assert_eq!(stats.client_increment, 1.5);
        assert_eq!(stats.team_increment, 2.0);
        assert_eq!(stats.evolution, None);
    }
}
