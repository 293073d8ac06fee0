//! Resource List State
//!
//! Per-mount cache of one resource's collection plus the loading and error
//! flags the list view renders from.
//!
//! Requests may overlap. `loading` stays up while any of them is in flight,
//! only the newest load is applied, and a load issued before a successful
//! delete is discarded so it cannot bring the deleted row back.

use log::{debug, warn};

use crate::api::{self, ResourceApi};
use crate::error::AdminError;
use crate::record::{Entity, EntityId, Record};
use crate::resources::Resource;
use crate::state::StateCell;

/// Issued by `begin_load`, handed back to `finish_load`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Issued by `confirm_delete`, handed back to `finish_delete`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTicket(EntityId);

impl DeleteTicket {
    pub fn id(&self) -> EntityId {
        self.0
    }
}

/// What the list view should render, in priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a, E = Record> {
    Loading,
    Error(&'a str),
    Empty,
    Rows(&'a [E]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState<E = Record> {
    noun: String,
    items: Vec<E>,
    error: Option<String>,
    in_flight: usize,
    /// Newest load issued
    load_generation: u64,
    /// Loads at or below this generation are stale
    stale_through: u64,
    pending_delete: Option<EntityId>,
}

impl<E: Entity> ListState<E> {
    /// `noun` is the lowercase plural used in generic errors ("quotes")
    pub fn new(noun: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            items: Vec::new(),
            error: None,
            in_flight: 0,
            load_generation: 0,
            stale_through: 0,
            pending_delete: None,
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Row awaiting delete confirmation
    pub fn pending_delete(&self) -> Option<EntityId> {
        self.pending_delete
    }

    pub fn view(&self) -> ListView<'_, E> {
        if self.is_loading() {
            ListView::Loading
        } else if let Some(error) = &self.error {
            ListView::Error(error)
        } else if self.items.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(&self.items)
        }
    }

    // ========================
    // Load
    // ========================

    pub fn begin_load(&mut self) -> LoadTicket {
        self.in_flight += 1;
        self.error = None;
        self.load_generation += 1;
        LoadTicket(self.load_generation)
    }

    /// Apply a load outcome; returns false when the ticket was superseded
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<Vec<E>, AdminError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if ticket.0 != self.load_generation || ticket.0 <= self.stale_through {
            debug!("dropping stale {} load #{}", self.noun, ticket.0);
            return false;
        }

        match outcome {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.user_message(&format!("Failed to load {}", self.noun)));
            }
        }
        true
    }

    // ========================
    // Delete
    // ========================

    /// First step of a delete: ask the user
    pub fn request_delete(&mut self, id: EntityId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// User confirmed; `None` when nothing was pending
    pub fn confirm_delete(&mut self) -> Option<DeleteTicket> {
        let id = self.pending_delete.take()?;
        self.in_flight += 1;
        self.error = None;
        Some(DeleteTicket(id))
    }

    pub fn finish_delete(&mut self, ticket: DeleteTicket, outcome: Result<(), AdminError>) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Ok(()) => {
                self.items.retain(|item| item.id() != Some(ticket.0));
                self.stale_through = self.load_generation;
            }
            Err(err) => {
                self.error = Some(err.user_message(&format!("Failed to delete {}", self.noun)));
            }
        }
    }
}

// ========================
// Drivers
// ========================

/// Fetch the collection into `state`
pub async fn load<A, C>(api: &A, resource: &Resource, state: &C)
where
    A: ResourceApi + ?Sized,
    C: StateCell<ListState>,
{
    let Some(ticket) = state.with_mut(ListState::begin_load) else {
        return;
    };

    let outcome = api::fetch_records(api, resource).await;
    if let Err(err) = &outcome {
        warn!("[{}] load failed: {}", resource.slug, err);
    }

    if state.with_mut(|s| s.finish_load(ticket, outcome)).is_none() {
        debug!("[{}] list unmounted before load settled", resource.slug);
    }
}

/// Delete the row the user confirmed (see `ListState::request_delete`)
pub async fn delete<A, C>(api: &A, resource: &Resource, state: &C)
where
    A: ResourceApi + ?Sized,
    C: StateCell<ListState>,
{
    let Some(Some(ticket)) = state.with_mut(ListState::confirm_delete) else {
        return;
    };

    let outcome = api::delete_record(api, resource, ticket.id()).await;
    match &outcome {
        Ok(()) => debug!("[{}] deleted #{}", resource.slug, ticket.id()),
        Err(err) => warn!("[{}] delete #{} failed: {}", resource.slug, ticket.id(), err),
    }

    if state.with_mut(|s| s.finish_delete(ticket, outcome)).is_none() {
        debug!("[{}] list unmounted before delete settled", resource.slug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldMap, FieldValue};

    fn row(id: EntityId) -> Record {
        let mut record = Record::draft(FieldMap::from([("content", FieldValue::Text(format!("q{}", id)))]));
        record.id = Some(id);
        record
    }

    fn ids(state: &ListState) -> Vec<EntityId> {
        state.items().iter().filter_map(|r| r.id).collect()
    }

    #[test]
    fn test_render_priority() {
        let mut state: ListState = ListState::new("quotes");
        assert_eq!(state.view(), ListView::Empty);

        let ticket = state.begin_load();
        assert_eq!(state.view(), ListView::Loading);

        state.finish_load(ticket, Err(AdminError::network("offline")));
        assert_eq!(state.view(), ListView::Error("offline"));

        let ticket = state.begin_load();
        assert_eq!(state.view(), ListView::Loading);
        state.finish_load(ticket, Ok(vec![row(1)]));
        assert!(matches!(state.view(), ListView::Rows(rows) if rows.len() == 1));
    }

    #[test]
    fn test_failed_load_keeps_items() {
        let mut state: ListState = ListState::new("quotes");
        let t = state.begin_load();
        state.finish_load(t, Ok(vec![row(1), row(2)]));

        let t = state.begin_load();
        state.finish_load(t, Err(AdminError::Server { status: 500, message: None }));

        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.error(), Some("request failed with status 500"));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_superseded_load_is_dropped() {
        let mut state: ListState = ListState::new("quotes");
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(state.finish_load(second, Ok(vec![row(2)])));
        assert!(state.is_loading());
        assert!(!state.finish_load(first, Ok(vec![row(1)])));

        assert_eq!(ids(&state), vec![2]);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state: ListState = ListState::new("quotes");
        assert!(state.confirm_delete().is_none());

        state.request_delete(3);
        assert_eq!(state.pending_delete(), Some(3));
        state.cancel_delete();
        assert!(state.confirm_delete().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_delete_invalidates_older_loads() {
        let mut state: ListState = ListState::new("quotes");
        let t = state.begin_load();
        state.finish_load(t, Ok(vec![row(1), row(2)]));

        let stale = state.begin_load();
        state.request_delete(2);
        let ticket = state.confirm_delete().unwrap();
        state.finish_delete(ticket, Ok(()));

        assert!(!state.finish_load(stale, Ok(vec![row(1), row(2)])));
        assert_eq!(ids(&state), vec![1]);

        let fresh = state.begin_load();
        assert!(state.finish_load(fresh, Ok(vec![row(1), row(4)])));
        assert_eq!(ids(&state), vec![1, 4]);
    }

    #[test]
    fn test_failed_delete_message() {
        let mut state: ListState = ListState::new("books");
        let t = state.begin_load();
        state.finish_load(t, Ok(vec![row(1)]));

        state.request_delete(1);
        let ticket = state.confirm_delete().unwrap();
        state.finish_delete(ticket, Err(AdminError::network("")));

        assert_eq!(ids(&state), vec![1]);
        assert_eq!(state.error(), Some("Failed to delete books"));
        assert!(!state.is_loading());
    }
}
