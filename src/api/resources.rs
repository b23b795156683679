use super::client::{HttpClient, RequestOptions};
use super::error::ApiError;
use super::transport::Method;
use crate::models::{
    Comment, CommentEnvelope, CreateCommentData, CreateIssueData, CreateProjectData, Issue,
    IssueEnvelope, Project, ProjectEnvelope,
};

#[derive(Debug, Clone)]
pub struct Projects {
    http: HttpClient,
}

impl Projects {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.http.request("/projects", RequestOptions::get()).await
    }

    pub async fn get(&self, id: i64) -> Result<Project, ApiError> {
        self.http
            .request(&format!("/projects/{}", id), RequestOptions::get())
            .await
    }

    pub async fn create(&self, data: &CreateProjectData) -> Result<Project, ApiError> {
        let options = RequestOptions::json(Method::Post, &ProjectEnvelope { project: data })?;
        self.http.request("/projects", options).await
    }

    pub async fn update(&self, id: i64, data: &CreateProjectData) -> Result<Project, ApiError> {
        let options = RequestOptions::json(Method::Put, &ProjectEnvelope { project: data })?;
        self.http.request(&format!("/projects/{}", id), options).await
    }

    pub async fn destroy(&self, id: i64) -> Result<(), ApiError> {
        self.http
            .request_empty(&format!("/projects/{}", id), RequestOptions::delete())
            .await
    }
}

/// Issues are nested under their project.
#[derive(Debug, Clone)]
pub struct Issues {
    http: HttpClient,
}

impl Issues {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, project_id: i64) -> Result<Vec<Issue>, ApiError> {
        self.http
            .request(&collection_path(project_id), RequestOptions::get())
            .await
    }

    pub async fn get(&self, project_id: i64, id: i64) -> Result<Issue, ApiError> {
        self.http
            .request(&member_path(project_id, id), RequestOptions::get())
            .await
    }

    pub async fn create(&self, project_id: i64, data: &CreateIssueData) -> Result<Issue, ApiError> {
        let options = RequestOptions::json(Method::Post, &IssueEnvelope { issue: data })?;
        self.http.request(&collection_path(project_id), options).await
    }

    pub async fn update(
        &self,
        project_id: i64,
        id: i64,
        data: &CreateIssueData,
    ) -> Result<Issue, ApiError> {
        let options = RequestOptions::json(Method::Put, &IssueEnvelope { issue: data })?;
        self.http.request(&member_path(project_id, id), options).await
    }

    pub async fn destroy(&self, project_id: i64, id: i64) -> Result<(), ApiError> {
        self.http
            .request_empty(&member_path(project_id, id), RequestOptions::delete())
            .await
    }
}

fn collection_path(project_id: i64) -> String {
    format!("/projects/{}/issues", project_id)
}

fn member_path(project_id: i64, id: i64) -> String {
    format!("/projects/{}/issues/{}", project_id, id)
}

/// Comments hang off an issue and have no get/update endpoints.
#[derive(Debug, Clone)]
pub struct Comments {
    http: HttpClient,
}

impl Comments {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, issue_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.http
            .request(&format!("/issues/{}/comments", issue_id), RequestOptions::get())
            .await
    }

    pub async fn create(&self, issue_id: i64, data: &CreateCommentData) -> Result<Comment, ApiError> {
        let options = RequestOptions::json(Method::Post, &CommentEnvelope { comment: data })?;
        self.http
            .request(&format!("/issues/{}/comments", issue_id), options)
            .await
    }

    pub async fn destroy(&self, issue_id: i64, id: i64) -> Result<(), ApiError> {
        self.http
            .request_empty(
                &format!("/issues/{}/comments/{}", issue_id, id),
                RequestOptions::delete(),
            )
            .await
    }
}

/// The three resource clients over one shared adapter.
#[derive(Debug, Clone)]
pub struct Api {
    pub projects: Projects,
    pub issues: Issues,
    pub comments: Comments,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self {
            projects: Projects::new(http.clone()),
            issues: Issues::new(http.clone()),
            comments: Comments::new(http),
        }
    }
}
