//! In-memory transport that records every request and replays queued responses.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::client::HttpClient;
use super::error::ApiError;
use super::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::config::ClientConfig;

#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> HttpClient {
        HttpClient::new(&ClientConfig::default(), self.clone())
    }

    pub fn respond_json<T: Serialize>(&self, value: &T) {
        let body = serde_json::to_string(value).unwrap();
        self.respond(200, &body);
    }

    pub fn respond(&self, status: u16, body: &str) {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            status_text,
            body: body.to_string(),
        }));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}

pub fn project(id: i64, name: &str) -> crate::models::Project {
    crate::models::Project {
        id,
        name: name.to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn issue(id: i64, project_id: i64, title: &str) -> crate::models::Issue {
    crate::models::Issue {
        id,
        project_id,
        title: title.to_string(),
        description: "Test description".to_string(),
        assigned_to: "John Doe".to_string(),
        status: crate::models::IssueStatus::ToDo,
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn comment(id: i64, issue_id: i64, text: &str) -> crate::models::Comment {
    crate::models::Comment {
        id,
        issue_id,
        text: text.to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}
