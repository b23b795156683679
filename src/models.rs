use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Timestamps are carried exactly as the server sends them (ISO-8601).
pub type Timestamp = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub status: IssueStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub issue_id: i64,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    ToDo,
    Active,
    OnHold,
    Resolved,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::ToDo,
        IssueStatus::Active,
        IssueStatus::OnHold,
        IssueStatus::Resolved,
    ];

    /// Wire value, as used in request and response bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::ToDo => "to_do",
            IssueStatus::Active => "active",
            IssueStatus::OnHold => "on_hold",
            IssueStatus::Resolved => "resolved",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            IssueStatus::ToDo => "To do",
            IssueStatus::Active => "Active",
            IssueStatus::OnHold => "On hold",
            IssueStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid status '{0}'. Must be one of: to_do, active, on_hold, resolved")]
pub struct UnknownStatus(pub String);

impl FromStr for IssueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IssueStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectData {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIssueData {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub status: IssueStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCommentData {
    pub text: String,
}

/// Request bodies wrap the payload under the singular resource name.
#[derive(Debug, Serialize)]
pub struct ProjectEnvelope<'a> {
    pub project: &'a CreateProjectData,
}

#[derive(Debug, Serialize)]
pub struct IssueEnvelope<'a> {
    pub issue: &'a CreateIssueData,
}

#[derive(Debug, Serialize)]
pub struct CommentEnvelope<'a> {
    pub comment: &'a CreateCommentData,
}
