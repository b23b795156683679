pub mod comments;
pub mod issues;
pub mod projects;
pub mod render;
mod terminal;

pub use terminal::TerminalUi;

use anyhow::{bail, Result};
use tracing::warn;

use crate::api::Api;
use crate::controllers::{
    CollectionSource, Entity, FormController, FormFields, FormSource, FormStatus, ListController,
};
use crate::ui::Ui;

/// Views a navigation target can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Projects,
    Project(i64),
}

impl Route {
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["projects"] => Some(Route::Projects),
            ["projects", id] => id.parse().ok().map(Route::Project),
            _ => None,
        }
    }
}

/// Renders the view behind `path` with a fresh load.
pub async fn show_route(api: &Api, path: &str) -> Result<String> {
    match Route::parse(path) {
        Some(Route::Projects) => projects::list(api).await,
        Some(Route::Project(id)) => issues::list(api, id).await,
        None => {
            warn!(path, "no view for navigation target");
            Ok(String::new())
        }
    }
}

/// Mounts `scope`, then runs the confirm-gated delete of `id`.
/// Returns `false` when the user declined.
async fn delete_row<S: CollectionSource>(
    controller: &mut ListController<S>,
    scope: S::Scope,
    id: i64,
    ui: &dyn Ui,
) -> Result<bool> {
    controller.mount(scope).await;
    if let Some(err) = controller.state().error() {
        bail!("{}", err);
    }
    if !controller.state().items().iter().any(|item| item.id() == id) {
        bail!("{} #{} not found", <S::Item as Entity>::LABEL, id);
    }

    if !controller.delete(id, ui).await {
        return Ok(false);
    }
    if let Some(err) = controller.state().error() {
        bail!("{}", err);
    }
    Ok(true)
}

async fn mount_form<S: FormSource>(form: &mut FormController<S>) -> Result<()> {
    form.mount().await;
    if form.state().status() == FormStatus::LoadFailed {
        bail!("{}", form.state().error().unwrap_or_default());
    }
    Ok(())
}

/// Applies the given edits, skipping fields that were not supplied.
fn apply_fields<S: FormSource>(
    form: &mut FormController<S>,
    edits: &[(&str, Option<&str>)],
) -> Result<()> {
    for (name, value) in edits {
        if let Some(value) = value {
            form.field_changed(name, value)?;
        }
    }
    Ok(())
}

async fn submit_form<S: FormSource>(form: &mut FormController<S>, ui: &dyn Ui) -> Result<()> {
    let fields = form.state().fields();
    let missing: Vec<&str> = <S::Fields as FormFields>::REQUIRED
        .iter()
        .copied()
        .filter(|name| !fields.value(name).is_some_and(|v| !v.trim().is_empty()))
        .collect();
    if !missing.is_empty() {
        bail!("Missing required field(s): {}", missing.join(", "));
    }

    form.submit(ui).await;
    if let Some(err) = form.state().error() {
        bail!("{}", err);
    }
    Ok(())
}
