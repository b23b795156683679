use anyhow::{bail, Result};

use super::{delete_row, render};
use crate::api::Api;
use crate::controllers::{CommentThread, ListController, ListStatus};
use crate::ui::Ui;

async fn mounted_thread(api: &Api, issue_id: i64) -> Result<CommentThread> {
    let mut thread = CommentThread::new(api.comments.clone());
    thread.mount(issue_id).await;
    if thread.status() == ListStatus::Error {
        bail!("{}", thread.list().error().unwrap_or_default());
    }
    Ok(thread)
}

pub async fn list(api: &Api, issue_id: i64) -> Result<String> {
    let thread = mounted_thread(api, issue_id).await?;
    Ok(render::comment_thread(&thread))
}

/// Posts `text` and shows the thread with the new comment appended. The
/// draft box stays usable when the thread itself failed to load.
pub async fn add(api: &Api, issue_id: i64, text: &str) -> Result<String> {
    let mut thread = CommentThread::new(api.comments.clone());
    thread.mount(issue_id).await;
    thread.set_draft(text);
    if !thread.can_submit() {
        bail!("Comment text cannot be empty");
    }

    thread.submit().await;
    if let Some(err) = thread.submit_error() {
        bail!("{}", err);
    }
    Ok(render::comment_thread(&thread))
}

pub async fn delete(api: &Api, ui: &dyn Ui, issue_id: i64, id: i64) -> Result<String> {
    let mut controller = ListController::new(api.comments.clone());
    if delete_row(&mut controller, issue_id, id, ui).await? {
        Ok(format!("Deleted comment #{}", id))
    } else {
        Ok("Cancelled.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{comment, FakeTransport};
    use crate::api::Method;
    use crate::commands::render::NO_COMMENTS;
    use crate::models::Comment;
    use crate::ui::recording::RecordingUi;
    use serde_json::{json, Value};

    // ==================== Unit Tests ====================

    #[tokio::test]
    async fn test_list_empty() {
        let transport = FakeTransport::new();
        transport.respond_json(&Vec::<Comment>::new());
        let api = Api::new(transport.client());

        assert_eq!(list(&api, 5).await.unwrap(), format!("Comments:\n  {}", NO_COMMENTS));
    }

    #[tokio::test]
    async fn test_add_appends_without_refetch() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![comment(1, 5, "First")]);
        transport.respond_json(&comment(2, 5, "Second"));
        let api = Api::new(transport.client());

        let out = add(&api, 5, "  Second \n").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].url, "http://localhost:3000/issues/5/comments");
        let body: Value = serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"comment": {"text": "Second"}}));

        let first = out.find("First").unwrap();
        let second = out.find("Second").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_add_posts_even_when_thread_failed_to_load() {
        let transport = FakeTransport::new();
        transport.respond(500, "");
        transport.respond_json(&comment(7, 5, "Still here"));
        let api = Api::new(transport.client());

        let out = add(&api, 5, "Still here").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, Method::Post);
        assert_eq!(requests[1].url, "http://localhost:3000/issues/5/comments");
        assert!(out.contains("API Error: 500 Internal Server Error"));
        assert!(out.contains("Still here"));
    }

    #[tokio::test]
    async fn test_add_blank_text_is_rejected() {
        let transport = FakeTransport::new();
        transport.respond_json(&Vec::<Comment>::new());
        let api = Api::new(transport.client());

        let err = add(&api, 5, "   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Comment text cannot be empty");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_add_failure_reports_error() {
        let transport = FakeTransport::new();
        transport.respond_json(&Vec::<Comment>::new());
        transport.fail("connection refused");
        let api = Api::new(transport.client());

        let err = add(&api, 5, "hello").await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_delete_prompt_is_generic() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![comment(3, 5, "old")]);
        transport.respond(204, "");
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        assert_eq!(delete(&api, &ui, 5, 3).await.unwrap(), "Deleted comment #3");
        assert_eq!(
            ui.prompts(),
            vec!["Are you sure you want to delete this comment?".to_string()]
        );
        assert_eq!(transport.last_request().url, "http://localhost:3000/issues/5/comments/3");
    }

    #[tokio::test]
    async fn test_delete_declined() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![comment(3, 5, "old")]);
        let api = Api::new(transport.client());
        let ui = RecordingUi::declining();

        assert_eq!(delete(&api, &ui, 5, 3).await.unwrap(), "Cancelled.");
        assert_eq!(transport.requests().len(), 1);
    }
}
