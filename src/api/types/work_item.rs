//! Issues, tasks and their statuses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An issue status.
///
/// Returned by `GET /issue-statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueStatus {
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
    /// The project ID.
    pub project: u64,
}

/// A task status.
///
/// Returned by `GET /task-statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatus {
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
    /// The project ID.
    pub project: u64,
}

/// Body of `POST /issue-statuses` and `POST /task-statuses`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewStatus {
    pub project: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// A project issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub id: u64,
    /// The project-scoped reference number (`#42`).
    #[serde(rename = "ref")]
    pub reference: u64,
    pub subject: String,
    pub project: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<u64>,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default, rename = "type")]
    pub issue_type: Option<u64>,
    #[serde(default)]
    pub priority: Option<u64>,
    #[serde(default)]
    pub severity: Option<u64>,
    #[serde(default)]
    pub assigned_to: Option<u64>,
    #[serde(default)]
    pub owner: Option<u64>,
    #[serde(default)]
    pub milestone: Option<u64>,
    #[serde(default)]
    pub tags: Vec<serde_json::Value>,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.reference, self.subject)
    }
}

/// A task belonging to a user story or sprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    #[serde(rename = "ref")]
    pub reference: u64,
    pub subject: String,
    pub project: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<u64>,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub user_story: Option<u64>,
    #[serde(default)]
    pub milestone: Option<u64>,
    #[serde(default)]
    pub assigned_to: Option<u64>,
    #[serde(default)]
    pub owner: Option<u64>,
    #[serde(default)]
    pub is_iocaine: bool,
    #[serde(default)]
    pub tags: Vec<serde_json::Value>,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub us_order: i64,
    #[serde(default)]
    pub taskboard_order: i64,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.reference, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_ref_and_type_renames() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 100,
            "ref": 42,
            "subject": "Login button misaligned",
            "project": 1,
            "type": 3,
            "tags": [["ui", "#ff0000"]],
        }))
        .unwrap();
        assert_eq!(issue.reference, 42);
        assert_eq!(issue.issue_type, Some(3));
        assert_eq!(issue.to_string(), "#42 Login button misaligned");
    }

    #[test]
    fn test_new_status_skips_unset() {
        let body = serde_json::to_value(NewStatus {
            project: 1,
            name: "Blocked".into(),
            color: None,
            is_closed: Some(false),
            order: None,
        })
        .unwrap();
        assert_eq!(body, json!({"project": 1, "name": "Blocked", "is_closed": false}));
    }
}
