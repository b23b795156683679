use anyhow::{bail, Result};

use super::{apply_fields, delete_row, mount_form, render, submit_form};
use crate::api::Api;
use crate::controllers::{CommentThread, FormController, ListController, ListStatus};
use crate::ui::Ui;

/// Field values supplied on the command line; `None` leaves a field as it is.
#[derive(Debug, Default, Clone)]
pub struct IssueInput<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub assigned_to: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl<'a> IssueInput<'a> {
    fn edits(&self) -> [(&'static str, Option<&'a str>); 4] {
        [
            ("title", self.title),
            ("description", self.description),
            ("assigned_to", self.assigned_to),
            ("status", self.status),
        ]
    }

    fn is_empty(&self) -> bool {
        self.edits().iter().all(|(_, value)| value.is_none())
    }
}

pub async fn list(api: &Api, project_id: i64) -> Result<String> {
    let mut controller = ListController::new(api.issues.clone());
    controller.mount(project_id).await;
    if controller.state().status() == ListStatus::Error {
        bail!("{}", controller.state().error().unwrap_or_default());
    }
    Ok(render::issue_table(controller.state()))
}

/// The issue's edit view with its comment thread underneath.
pub async fn show(api: &Api, project_id: i64, id: i64) -> Result<String> {
    let mut form = FormController::edit(api.issues.clone(), project_id, id);
    mount_form(&mut form).await?;

    let mut thread = CommentThread::new(api.comments.clone());
    thread.mount(id).await;

    Ok(format!(
        "{}\n\n{}",
        render::issue_form(form.state()),
        render::comment_thread(&thread)
    ))
}

/// On success the form navigates to `/projects/{project_id}`.
pub async fn create(api: &Api, ui: &dyn Ui, project_id: i64, input: &IssueInput<'_>) -> Result<()> {
    let mut form = FormController::create(api.issues.clone(), project_id);
    mount_form(&mut form).await?;
    apply_fields(&mut form, &input.edits())?;
    submit_form(&mut form, ui).await
}

pub async fn edit(
    api: &Api,
    ui: &dyn Ui,
    project_id: i64,
    id: i64,
    input: &IssueInput<'_>,
) -> Result<String> {
    let mut form = FormController::edit(api.issues.clone(), project_id, id);
    mount_form(&mut form).await?;
    if input.is_empty() {
        return Ok(render::issue_form(form.state()));
    }

    apply_fields(&mut form, &input.edits())?;
    submit_form(&mut form, ui).await?;
    Ok(render::issue_form(form.state()))
}

pub async fn delete(api: &Api, ui: &dyn Ui, project_id: i64, id: i64) -> Result<String> {
    let mut controller = ListController::new(api.issues.clone());
    if delete_row(&mut controller, project_id, id, ui).await? {
        Ok(format!("Deleted issue #{}", id))
    } else {
        Ok("Cancelled.".to_string())
    }
}
