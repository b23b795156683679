//! Entity list controller: load a scoped collection, delete rows behind a confirmation.

use std::collections::BTreeSet;
use std::fmt::Debug;
use tracing::{debug, info};

use super::source::{CollectionSource, Entity};
use crate::api::ApiError;
use crate::ui::Ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Loaded,
    Empty,
    Error,
}

/// Tags a load with the scope and generation it was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket<K> {
    pub scope: K,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTicket<K> {
    pub scope: K,
    pub id: i64,
}

/// Observable state of one list view. Mutated only through the
/// `begin_*`/`finish_*` transitions.
#[derive(Debug, Clone)]
pub struct ListState<T, K> {
    scope: Option<K>,
    generation: u64,
    loading: bool,
    items: Vec<T>,
    error: Option<String>,
    deleting: BTreeSet<i64>,
}

impl<T, K> Default for ListState<T, K> {
    fn default() -> Self {
        Self {
            scope: None,
            generation: 0,
            loading: true,
            items: Vec::new(),
            error: None,
            deleting: BTreeSet::new(),
        }
    }
}

impl<T: Entity, K: Copy + Eq + Debug> ListState<T, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(&self) -> Option<K> {
        self.scope
    }

    pub fn status(&self) -> ListStatus {
        if self.loading {
            ListStatus::Loading
        } else if self.error.is_some() {
            ListStatus::Error
        } else if self.items.is_empty() {
            ListStatus::Empty
        } else {
            ListStatus::Loaded
        }
    }

    /// The collection in server order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting.contains(&id)
    }

    pub fn deleting_ids(&self) -> Vec<i64> {
        self.deleting.iter().copied().collect()
    }

    pub fn begin_load(&mut self, scope: K) -> LoadTicket<K> {
        if self.scope != Some(scope) {
            self.items.clear();
            self.deleting.clear();
        }
        self.scope = Some(scope);
        self.generation += 1;
        self.loading = true;
        self.error = None;
        debug!(entity = T::LABEL, ?scope, generation = self.generation, "loading collection");
        LoadTicket {
            scope,
            generation: self.generation,
        }
    }

    /// Applies a load result. Returns `false` and leaves state untouched when
    /// the ticket belongs to a scope or load that has since been superseded.
    pub fn finish_load(&mut self, ticket: LoadTicket<K>, result: Result<Vec<T>, ApiError>) -> bool {
        if self.scope != Some(ticket.scope) || self.generation != ticket.generation {
            debug!(entity = T::LABEL, scope = ?ticket.scope, "discarding stale load");
            return false;
        }

        self.loading = false;
        match result {
            Ok(items) => {
                debug!(entity = T::LABEL, count = items.len(), "collection loaded");
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                self.items.clear();
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Starts deleting `id` if it is present, not already deleting, and the
    /// user confirms. Nothing changes otherwise.
    pub fn begin_delete(&mut self, id: i64, ui: &dyn Ui) -> Option<DeleteTicket<K>> {
        let scope = self.scope?;
        if self.loading || self.deleting.contains(&id) {
            return None;
        }
        let item = self.items.iter().find(|item| item.id() == id)?;
        if !ui.confirm(&item.delete_prompt()) {
            return None;
        }

        self.deleting.insert(id);
        Some(DeleteTicket { scope, id })
    }

    pub fn finish_delete(&mut self, ticket: DeleteTicket<K>, result: Result<(), ApiError>) -> bool {
        if self.scope != Some(ticket.scope) {
            debug!(entity = T::LABEL, id = ticket.id, "discarding delete for previous scope");
            return false;
        }

        self.deleting.remove(&ticket.id);
        match result {
            Ok(()) => {
                info!(entity = T::LABEL, id = ticket.id, "deleted");
                self.items.retain(|item| item.id() != ticket.id);
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        true
    }

    /// Appends an entity the server just created.
    pub fn insert_created(&mut self, item: T) {
        self.items.push(item);
    }
}

/// Drives a [`ListState`] against a collection source.
pub struct ListController<S: CollectionSource> {
    source: S,
    state: ListState<S::Item, S::Scope>,
}

impl<S: CollectionSource> ListController<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: ListState::new(),
        }
    }

    pub fn state(&self) -> &ListState<S::Item, S::Scope> {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ListState<S::Item, S::Scope> {
        &mut self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads `scope`, replacing whatever was shown before.
    pub async fn mount(&mut self, scope: S::Scope) {
        let ticket = self.state.begin_load(scope);
        let result = self.source.list(scope).await;
        self.state.finish_load(ticket, result);
    }

    pub async fn reload(&mut self) {
        if let Some(scope) = self.state.scope() {
            self.mount(scope).await;
        }
    }

    /// Returns whether a destroy call was made.
    pub async fn delete(&mut self, id: i64, ui: &dyn Ui) -> bool {
        let Some(ticket) = self.state.begin_delete(id, ui) else {
            return false;
        };
        let result = self.source.destroy(ticket.scope, ticket.id).await;
        self.state.finish_delete(ticket, result);
        true
    }
}
