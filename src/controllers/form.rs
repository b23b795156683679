//! Dual-mode (create/edit) form controller.

use std::fmt::Debug;
use tracing::{debug, info};

use super::fields::{AfterUpdate, FieldError, FormFields};
use super::source::{Entity, FormSource};
use crate::api::ApiError;
use crate::ui::{NoticeKind, Ui};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Loading,
    LoadFailed,
    Ready,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLoadTicket {
    pub id: i64,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct SubmitTicket<P, K> {
    pub scope: K,
    pub mode: FormMode,
    pub payload: P,
    generation: u64,
}

/// How a settled submit is reconciled with the rest of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitEffect {
    /// Leave the form; the parent listing must load fresh data.
    ReloadListing,
    /// Stay on the form and tell the user.
    Notify(NoticeKind, String),
    None,
}

#[derive(Debug, Clone)]
pub struct FormState<F: FormFields, K> {
    scope: K,
    mode: FormMode,
    fields: F,
    loaded: Option<F::Entity>,
    loading: bool,
    load_failed: bool,
    submitting: bool,
    error: Option<String>,
    generation: u64,
}

impl<F: FormFields, K: Copy + Eq + Debug> FormState<F, K> {
    pub fn new(scope: K, mode: FormMode) -> Self {
        Self {
            scope,
            mode,
            fields: F::default(),
            loaded: None,
            loading: matches!(mode, FormMode::Edit(_)),
            load_failed: false,
            submitting: false,
            error: None,
            generation: 0,
        }
    }

    pub fn scope(&self) -> K {
        self.scope
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn status(&self) -> FormStatus {
        if self.loading {
            FormStatus::Loading
        } else if self.load_failed {
            FormStatus::LoadFailed
        } else if self.submitting {
            FormStatus::Submitting
        } else {
            FormStatus::Ready
        }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// The entity as last returned by the server (edit mode only).
    pub fn loaded(&self) -> Option<&F::Entity> {
        self.loaded.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switches to another scope or entity, dropping all local edits.
    pub fn reset(&mut self, scope: K, mode: FormMode) {
        let generation = self.generation + 1;
        *self = Self::new(scope, mode);
        self.generation = generation;
    }

    pub fn begin_load(&mut self) -> Option<FormLoadTicket> {
        let FormMode::Edit(id) = self.mode else {
            return None;
        };
        self.generation += 1;
        self.loading = true;
        self.load_failed = false;
        self.error = None;
        debug!(entity = label::<F>(), id, "loading form");
        Some(FormLoadTicket {
            id,
            generation: self.generation,
        })
    }

    pub fn finish_load(
        &mut self,
        ticket: FormLoadTicket,
        result: Result<F::Entity, ApiError>,
    ) -> bool {
        if self.mode != FormMode::Edit(ticket.id) || self.generation != ticket.generation {
            debug!(entity = label::<F>(), id = ticket.id, "discarding stale form load");
            return false;
        }

        self.loading = false;
        match result {
            Ok(entity) => {
                self.fields = F::from_entity(&entity);
                self.loaded = Some(entity);
            }
            Err(err) => {
                self.load_failed = true;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn field_changed(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        if self.status() != FormStatus::Ready {
            return Err(FieldError::Locked);
        }
        self.fields.set(name, value)
    }

    pub fn can_submit(&self) -> bool {
        self.status() == FormStatus::Ready && self.fields.is_complete()
    }

    pub fn begin_submit(&mut self) -> Option<SubmitTicket<F::Payload, K>> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(SubmitTicket {
            scope: self.scope,
            mode: self.mode,
            payload: self.fields.payload(),
            generation: self.generation,
        })
    }

    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket<F::Payload, K>,
        result: Result<F::Entity, ApiError>,
    ) -> SubmitEffect {
        if ticket.generation != self.generation || ticket.mode != self.mode {
            debug!(entity = label::<F>(), "discarding submit for previous form");
            return SubmitEffect::None;
        }

        self.submitting = false;
        match (result, ticket.mode) {
            (Ok(entity), FormMode::Create) => {
                info!(entity = label::<F>(), id = entity.id(), "created");
                SubmitEffect::ReloadListing
            }
            (Ok(entity), FormMode::Edit(_)) => {
                info!(entity = label::<F>(), id = entity.id(), "updated");
                self.loaded = Some(entity);
                match F::AFTER_UPDATE {
                    AfterUpdate::ReloadListing => SubmitEffect::ReloadListing,
                    AfterUpdate::Notify => SubmitEffect::Notify(
                        NoticeKind::Success,
                        format!("{} updated successfully!", label::<F>()),
                    ),
                }
            }
            (Err(err), _) => {
                self.error = Some(err.to_string());
                SubmitEffect::None
            }
        }
    }
}

fn label<F: FormFields>() -> &'static str {
    <F::Entity as Entity>::LABEL
}

/// Drives a [`FormState`] against a form source.
pub struct FormController<S: FormSource> {
    source: S,
    state: FormState<S::Fields, S::Scope>,
}

impl<S: FormSource> FormController<S> {
    pub fn create(source: S, scope: S::Scope) -> Self {
        Self {
            source,
            state: FormState::new(scope, FormMode::Create),
        }
    }

    pub fn edit(source: S, scope: S::Scope, id: i64) -> Self {
        Self {
            source,
            state: FormState::new(scope, FormMode::Edit(id)),
        }
    }

    pub fn state(&self) -> &FormState<S::Fields, S::Scope> {
        &self.state
    }

    /// Loads the entity in edit mode; a no-op in create mode.
    pub async fn mount(&mut self) {
        let Some(ticket) = self.state.begin_load() else {
            return;
        };
        let result = self.source.get(self.state.scope(), ticket.id).await;
        self.state.finish_load(ticket, result);
    }

    pub fn field_changed(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        self.state.field_changed(name, value)
    }

    /// Returns whether a create/update call was made.
    pub async fn submit(&mut self, ui: &dyn Ui) -> bool {
        let Some(ticket) = self.state.begin_submit() else {
            return false;
        };

        let result = match ticket.mode {
            FormMode::Create => self.source.create(ticket.scope, &ticket.payload).await,
            FormMode::Edit(id) => self.source.update(ticket.scope, id, &ticket.payload).await,
        };
        let scope = ticket.scope;

        match self.state.finish_submit(ticket, result) {
            SubmitEffect::ReloadListing => {
                ui.navigate(&self.source.listing_path(scope));
                ui.refresh();
            }
            SubmitEffect::Notify(kind, message) => ui.notify(kind, &message),
            SubmitEffect::None => {}
        }
        true
    }
}
