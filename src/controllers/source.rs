use async_trait::async_trait;
use std::fmt::Debug;

use super::fields::{FormFields, IssueFields, ProjectFields};
use crate::api::{ApiError, Comments, Issues, Projects};
use crate::models::{Comment, CreateIssueData, CreateProjectData, Issue, Project};

/// A server-owned record with an immutable id.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Capitalized singular name, e.g. "Issue".
    const LABEL: &'static str;

    fn id(&self) -> i64;

    fn delete_prompt(&self) -> String;
}

impl Entity for Project {
    const LABEL: &'static str = "Project";

    fn id(&self) -> i64 {
        self.id
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.name)
    }
}

impl Entity for Issue {
    const LABEL: &'static str = "Issue";

    fn id(&self) -> i64 {
        self.id
    }

    fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.title)
    }
}

impl Entity for Comment {
    const LABEL: &'static str = "Comment";

    fn id(&self) -> i64 {
        self.id
    }

    fn delete_prompt(&self) -> String {
        "Are you sure you want to delete this comment?".to_string()
    }
}

/// What a list controller needs: list one scope, destroy one member of it.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    type Item: Entity;
    type Scope: Copy + Eq + Debug + Send + Sync;

    async fn list(&self, scope: Self::Scope) -> Result<Vec<Self::Item>, ApiError>;

    async fn destroy(&self, scope: Self::Scope, id: i64) -> Result<(), ApiError>;
}

/// What a form controller needs. `listing_path` names the view to reload after a create.
#[async_trait]
pub trait FormSource: Send + Sync {
    type Fields: FormFields;
    type Scope: Copy + Eq + Debug + Send + Sync;

    async fn get(
        &self,
        scope: Self::Scope,
        id: i64,
    ) -> Result<<Self::Fields as FormFields>::Entity, ApiError>;

    async fn create(
        &self,
        scope: Self::Scope,
        payload: &<Self::Fields as FormFields>::Payload,
    ) -> Result<<Self::Fields as FormFields>::Entity, ApiError>;

    async fn update(
        &self,
        scope: Self::Scope,
        id: i64,
        payload: &<Self::Fields as FormFields>::Payload,
    ) -> Result<<Self::Fields as FormFields>::Entity, ApiError>;

    fn listing_path(&self, scope: Self::Scope) -> String;
}

#[async_trait]
impl CollectionSource for Projects {
    type Item = Project;
    type Scope = ();

    async fn list(&self, _scope: ()) -> Result<Vec<Project>, ApiError> {
        Projects::list(self).await
    }

    async fn destroy(&self, _scope: (), id: i64) -> Result<(), ApiError> {
        Projects::destroy(self, id).await
    }
}

#[async_trait]
impl FormSource for Projects {
    type Fields = ProjectFields;
    type Scope = ();

    async fn get(&self, _scope: (), id: i64) -> Result<Project, ApiError> {
        Projects::get(self, id).await
    }

    async fn create(&self, _scope: (), payload: &CreateProjectData) -> Result<Project, ApiError> {
        Projects::create(self, payload).await
    }

    async fn update(
        &self,
        _scope: (),
        id: i64,
        payload: &CreateProjectData,
    ) -> Result<Project, ApiError> {
        Projects::update(self, id, payload).await
    }

    fn listing_path(&self, _scope: ()) -> String {
        "/projects".to_string()
    }
}

/// Scoped by project id.
#[async_trait]
impl CollectionSource for Issues {
    type Item = Issue;
    type Scope = i64;

    async fn list(&self, project_id: i64) -> Result<Vec<Issue>, ApiError> {
        Issues::list(self, project_id).await
    }

    async fn destroy(&self, project_id: i64, id: i64) -> Result<(), ApiError> {
        Issues::destroy(self, project_id, id).await
    }
}

#[async_trait]
impl FormSource for Issues {
    type Fields = IssueFields;
    type Scope = i64;

    async fn get(&self, project_id: i64, id: i64) -> Result<Issue, ApiError> {
        Issues::get(self, project_id, id).await
    }

    async fn create(&self, project_id: i64, payload: &CreateIssueData) -> Result<Issue, ApiError> {
        Issues::create(self, project_id, payload).await
    }

    async fn update(
        &self,
        project_id: i64,
        id: i64,
        payload: &CreateIssueData,
    ) -> Result<Issue, ApiError> {
        Issues::update(self, project_id, id, payload).await
    }

    fn listing_path(&self, project_id: i64) -> String {
        format!("/projects/{}", project_id)
    }
}

/// Scoped by issue id.
#[async_trait]
impl CollectionSource for Comments {
    type Item = Comment;
    type Scope = i64;

    async fn list(&self, issue_id: i64) -> Result<Vec<Comment>, ApiError> {
        Comments::list(self, issue_id).await
    }

    async fn destroy(&self, issue_id: i64, id: i64) -> Result<(), ApiError> {
        Comments::destroy(self, issue_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{comment, issue, project, FakeTransport};

    #[test]
    fn test_delete_prompts_name_the_entity() {
        assert_eq!(
            project(1, "Apollo").delete_prompt(),
            "Are you sure you want to delete \"Apollo\"?"
        );
        assert_eq!(
            issue(1, 1, "Test Issue 1").delete_prompt(),
            "Are you sure you want to delete \"Test Issue 1\"?"
        );
        assert_eq!(
            comment(1, 1, "whatever").delete_prompt(),
            "Are you sure you want to delete this comment?"
        );
    }

    #[test]
    fn test_listing_paths() {
        let transport = FakeTransport::new();
        let api = crate::api::Api::new(transport.client());
        assert_eq!(FormSource::listing_path(&api.projects, ()), "/projects");
        assert_eq!(FormSource::listing_path(&api.issues, 42), "/projects/42");
    }

    #[tokio::test]
    async fn test_collection_source_delegates_to_client() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![issue(1, 3, "A")]);
        let api = crate::api::Api::new(transport.client());

        let items = CollectionSource::list(&api.issues, 3).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            transport.last_request().url,
            "http://localhost:3000/projects/3/issues"
        );
    }
}
