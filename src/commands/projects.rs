use anyhow::{bail, Context, Result};

use super::{apply_fields, delete_row, mount_form, render, submit_form};
use crate::api::Api;
use crate::controllers::{FormController, ListController, ListStatus};
use crate::ui::Ui;

pub async fn list(api: &Api) -> Result<String> {
    let mut controller = ListController::new(api.projects.clone());
    controller.mount(()).await;
    if controller.state().status() == ListStatus::Error {
        bail!("{}", controller.state().error().unwrap_or_default());
    }
    Ok(render::project_list(controller.state()))
}

/// Project header followed by its issue table.
pub async fn show(api: &Api, id: i64) -> Result<String> {
    let mut form = FormController::edit(api.projects.clone(), (), id);
    mount_form(&mut form)
        .await
        .with_context(|| format!("Failed to load project #{}", id))?;
    let Some(project) = form.state().loaded() else {
        bail!("Project #{} not found", id);
    };

    let issues = super::issues::list(api, id).await?;
    Ok(format!(
        "Project #{}: {}\nCreated: {}\nUpdated: {}\n\nIssues:\n{}",
        project.id,
        project.name,
        render::format_datetime(&project.created_at),
        render::format_datetime(&project.updated_at),
        issues
    ))
}

/// On success the form navigates back to `/projects`, so nothing is printed here.
pub async fn create(api: &Api, ui: &dyn Ui, name: &str) -> Result<()> {
    let mut form = FormController::create(api.projects.clone(), ());
    mount_form(&mut form).await?;
    apply_fields(&mut form, &[("name", Some(name))])?;
    submit_form(&mut form, ui).await
}

pub async fn edit(api: &Api, ui: &dyn Ui, id: i64, name: Option<&str>) -> Result<String> {
    let mut form = FormController::edit(api.projects.clone(), (), id);
    mount_form(&mut form).await?;
    if name.is_none() {
        return Ok(render::project_form(form.state()));
    }

    // A successful rename navigates back to `/projects`.
    apply_fields(&mut form, &[("name", name)])?;
    submit_form(&mut form, ui).await?;
    Ok(String::new())
}

pub async fn delete(api: &Api, ui: &dyn Ui, id: i64) -> Result<String> {
    let mut controller = ListController::new(api.projects.clone());
    if delete_row(&mut controller, (), id, ui).await? {
        Ok(format!("Deleted project #{}", id))
    } else {
        Ok("Cancelled.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{issue, project, FakeTransport};
    use crate::api::Method;
    use crate::commands::render::NO_PROJECTS;
    use crate::ui::recording::RecordingUi;
    use serde_json::{json, Value};

    fn last_body(transport: &FakeTransport) -> Value {
        serde_json::from_str(transport.last_request().body.as_deref().unwrap()).unwrap()
    }

    // ==================== Unit Tests ====================

    #[tokio::test]
    async fn test_list_empty() {
        let transport = FakeTransport::new();
        transport.respond_json(&Vec::<crate::models::Project>::new());
        let api = Api::new(transport.client());

        assert_eq!(list(&api).await.unwrap(), NO_PROJECTS);
    }

    #[tokio::test]
    async fn test_list_failure_is_an_error() {
        let transport = FakeTransport::new();
        transport.respond(500, "");
        let api = Api::new(transport.client());

        let err = list(&api).await.unwrap_err();
        assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_show_includes_issue_table() {
        let transport = FakeTransport::new();
        transport.respond_json(&project(4, "Apollo"));
        transport.respond_json(&vec![issue(9, 4, "Fuel leak")]);
        let api = Api::new(transport.client());

        let out = show(&api, 4).await.unwrap();

        assert!(out.starts_with("Project #4: Apollo"));
        assert!(out.contains("Fuel leak"));
        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:3000/projects/4",
                "http://localhost:3000/projects/4/issues"
            ]
        );
    }

    #[tokio::test]
    async fn test_show_missing_project_has_context() {
        let transport = FakeTransport::new();
        transport.respond(404, "");
        let api = Api::new(transport.client());

        let err = show(&api, 4).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to load project #4");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_create_posts_trimmed_name_and_navigates() {
        let transport = FakeTransport::new();
        transport.respond_json(&project(1, "New Project"));
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        create(&api, &ui, "  New Project ").await.unwrap();

        assert_eq!(transport.last_request().method, Method::Post);
        assert_eq!(last_body(&transport), json!({"project": {"name": "New Project"}}));
        assert_eq!(ui.navigations(), vec!["/projects".to_string()]);
        assert_eq!(ui.refreshes(), 1);
    }

    #[tokio::test]
    async fn test_create_blank_name_sends_nothing() {
        let transport = FakeTransport::new();
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        let err = create(&api, &ui, "   ").await.unwrap_err();

        assert_eq!(err.to_string(), "Missing required field(s): name");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_edit_updates_and_returns_to_listing() {
        let transport = FakeTransport::new();
        transport.respond_json(&project(2, "Old"));
        transport.respond_json(&project(2, "Renamed"));
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        let out = edit(&api, &ui, 2, Some("Renamed")).await.unwrap();

        assert_eq!(transport.last_request().method, Method::Put);
        assert_eq!(transport.last_request().url, "http://localhost:3000/projects/2");
        assert_eq!(last_body(&transport), json!({"project": {"name": "Renamed"}}));
        assert_eq!(out, "");
        assert_eq!(ui.navigations(), vec!["/projects".to_string()]);
        assert_eq!(ui.refreshes(), 1);
        assert!(ui.notices().is_empty());
    }

    #[tokio::test]
    async fn test_edit_without_changes_only_shows_form() {
        let transport = FakeTransport::new();
        transport.respond_json(&project(2, "Apollo"));
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        let out = edit(&api, &ui, 2, None).await.unwrap();

        assert_eq!(out, "Edit Project\nName: Apollo");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![project(1, "Apollo"), project(2, "Gemini")]);
        transport.respond(204, "");
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        assert_eq!(delete(&api, &ui, 2).await.unwrap(), "Deleted project #2");
        assert_eq!(ui.prompts(), vec!["Are you sure you want to delete \"Gemini\"?".to_string()]);
        assert_eq!(transport.last_request().method, Method::Delete);
        assert_eq!(transport.last_request().url, "http://localhost:3000/projects/2");
    }

    #[tokio::test]
    async fn test_delete_declined_sends_no_delete() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![project(1, "Apollo")]);
        let api = Api::new(transport.client());
        let ui = RecordingUi::declining();

        assert_eq!(delete(&api, &ui, 1).await.unwrap(), "Cancelled.");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![project(1, "Apollo")]);
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        let err = delete(&api, &ui, 99).await.unwrap_err();
        assert_eq!(err.to_string(), "Project #99 not found");
        assert!(ui.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_reports_error() {
        let transport = FakeTransport::new();
        transport.respond_json(&vec![project(1, "Apollo")]);
        transport.respond(422, "");
        let api = Api::new(transport.client());
        let ui = RecordingUi::accepting();

        let err = delete(&api, &ui, 1).await.unwrap_err();
        assert_eq!(err.to_string(), "API Error: 422 Unprocessable Entity");
    }
}
