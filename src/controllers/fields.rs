use std::fmt::Debug;
use thiserror::Error;

use crate::models::{CreateIssueData, CreateProjectData, Issue, IssueStatus, Project};

use super::source::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown field '{0}'")]
    Unknown(String),

    #[error("{0}")]
    Invalid(String),

    /// The form is loading, failed to load, or is mid-submit.
    #[error("Form is not accepting input")]
    Locked,
}

/// Where a successful edit leaves the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterUpdate {
    /// Back to the parent listing, which reloads.
    ReloadListing,
    /// Stay on the form with a success notice.
    Notify,
}

/// Uncommitted, editable values of one form.
pub trait FormFields: Default + Clone + Debug + Send + Sync {
    type Entity: Entity;
    type Payload: Debug + Send + Sync;

    /// Fields that must be non-blank after trimming.
    const REQUIRED: &'static [&'static str];

    const AFTER_UPDATE: AfterUpdate;

    fn from_entity(entity: &Self::Entity) -> Self;

    fn set(&mut self, name: &str, value: &str) -> Result<(), FieldError>;

    fn value(&self, name: &str) -> Option<&str>;

    fn is_complete(&self) -> bool {
        Self::REQUIRED
            .iter()
            .all(|name| self.value(name).is_some_and(|v| !v.trim().is_empty()))
    }

    /// Trimmed request payload, with defaults for anything left unset.
    fn payload(&self) -> Self::Payload;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
}

impl FormFields for ProjectFields {
    type Entity = Project;
    type Payload = CreateProjectData;

    const REQUIRED: &'static [&'static str] = &["name"];

    const AFTER_UPDATE: AfterUpdate = AfterUpdate::ReloadListing;

    fn from_entity(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "name" => self.name = value.to_string(),
            other => return Err(FieldError::Unknown(other.to_string())),
        }
        Ok(())
    }

    fn value(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            _ => None,
        }
    }

    fn payload(&self) -> CreateProjectData {
        CreateProjectData {
            name: self.name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub status: IssueStatus,
}

impl FormFields for IssueFields {
    type Entity = Issue;
    type Payload = CreateIssueData;

    const REQUIRED: &'static [&'static str] = &["title", "assigned_to"];

    const AFTER_UPDATE: AfterUpdate = AfterUpdate::Notify;

    fn from_entity(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            description: issue.description.clone(),
            assigned_to: issue.assigned_to.clone(),
            status: issue.status,
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "title" => self.title = value.to_string(),
            "description" => self.description = value.to_string(),
            "assigned_to" => self.assigned_to = value.to_string(),
            "status" => {
                self.status = value
                    .parse()
                    .map_err(|err: crate::models::UnknownStatus| FieldError::Invalid(err.to_string()))?
            }
            other => return Err(FieldError::Unknown(other.to_string())),
        }
        Ok(())
    }

    fn value(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "description" => Some(&self.description),
            "assigned_to" => Some(&self.assigned_to),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn payload(&self) -> CreateIssueData {
        CreateIssueData {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            assigned_to: self.assigned_to.trim().to_string(),
            status: self.status,
        }
    }
}
