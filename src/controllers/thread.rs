//! Comment thread: a list scoped by issue id plus an always-visible draft box.

use tracing::info;

use super::list::{ListController, ListState, ListStatus};
use crate::api::{ApiError, Comments};
use crate::models::{Comment, CreateCommentData};
use crate::ui::Ui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTicket {
    pub issue_id: i64,
    pub data: CreateCommentData,
}

pub struct CommentThread {
    list: ListController<Comments>,
    draft: String,
    submitting: bool,
    submit_error: Option<String>,
}

impl CommentThread {
    pub fn new(comments: Comments) -> Self {
        Self {
            list: ListController::new(comments),
            draft: String::new(),
            submitting: false,
            submit_error: None,
        }
    }

    pub fn list(&self) -> &ListState<Comment, i64> {
        self.list.state()
    }

    pub fn status(&self) -> ListStatus {
        self.list.state().status()
    }

    pub fn comments(&self) -> &[Comment] {
        self.list.state().items()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub async fn mount(&mut self, issue_id: i64) {
        if self.list.state().scope() != Some(issue_id) {
            self.draft.clear();
            self.submitting = false;
            self.submit_error = None;
        }
        self.list.mount(issue_id).await;
    }

    pub async fn reload(&mut self) {
        self.list.reload().await;
    }

    /// Returns `false` while a submit is in flight; the draft is not editable then.
    pub fn set_draft(&mut self, text: &str) -> bool {
        if self.submitting {
            return false;
        }
        self.draft = text.to_string();
        true
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.draft.trim().is_empty() && self.list.state().scope().is_some()
    }

    pub fn begin_submit(&mut self) -> Option<CommentTicket> {
        if !self.can_submit() {
            return None;
        }
        let issue_id = self.list.state().scope()?;
        self.submitting = true;
        self.submit_error = None;
        Some(CommentTicket {
            issue_id,
            data: CreateCommentData {
                text: self.draft.trim().to_string(),
            },
        })
    }

    /// Appends the created comment and clears the draft, or keeps the draft
    /// and records the failure.
    pub fn finish_submit(&mut self, ticket: CommentTicket, result: Result<Comment, ApiError>) -> bool {
        if self.list.state().scope() != Some(ticket.issue_id) {
            return false;
        }

        self.submitting = false;
        match result {
            Ok(comment) => {
                info!(issue_id = ticket.issue_id, id = comment.id, "comment added");
                self.list.state_mut().insert_created(comment);
                self.draft.clear();
            }
            Err(err) => self.submit_error = Some(err.to_string()),
        }
        true
    }

    /// Returns whether a create call was made.
    pub async fn submit(&mut self) -> bool {
        let Some(ticket) = self.begin_submit() else {
            return false;
        };
        let result = self.list.source().create(ticket.issue_id, &ticket.data).await;
        self.finish_submit(ticket, result);
        true
    }

    pub async fn delete(&mut self, id: i64, ui: &dyn Ui) -> bool {
        self.list.delete(id, ui).await
    }
}
