//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use crud_core::{AdminRoute, EditTarget, Record, Resource};
use leptos::prelude::*;
use reactive_stores::Store;

/// App-wide navigation and notice state
#[derive(Clone, Debug, Default, Store)]
pub struct AdminState {
    /// Current hash route
    pub route: AdminRoute,
    /// Entity handed from a list row to the edit form
    pub editing: Option<EditTarget>,
    /// Transient message ("Saved quote")
    pub notice: Option<String>,
    /// Activity log panel open
    pub show_log: bool,
}

impl AdminState {
    pub fn new(route: AdminRoute) -> Self {
        Self {
            route,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AdminStore = Store<AdminState>;

/// Get the admin store from context
pub fn use_admin_store() -> AdminStore {
    expect_context::<AdminStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Switch route and mirror it into the location hash
pub fn store_navigate(store: &AdminStore, route: AdminRoute) {
    let route = route.resolve(store.editing().get_untracked().as_ref());
    if !matches!(route, AdminRoute::Edit(..)) {
        *store.editing().write() = None;
    }
    log::debug!("[ROUTE] {}", route.path());
    let _ = window().location().set_hash(&route.path());
    *store.route().write() = route;
}

/// Open the edit form for a row; rows without an id cannot be edited
pub fn store_edit(store: &AdminStore, resource: &Resource, record: Record) {
    let Some(id) = record.id else {
        log::warn!("[ROUTE] {} row without id cannot be edited", resource.slug);
        return;
    };
    *store.editing().write() = Some(EditTarget::new(resource.slug.clone(), record));
    store_navigate(store, AdminRoute::Edit(resource.slug.clone(), id));
}

/// Route changed from outside (back button, typed hash)
pub fn store_sync_hash(store: &AdminStore, hash: &str) {
    let editing = store.editing().get_untracked();
    let route = AdminRoute::parse(hash).unwrap_or_default().resolve(editing.as_ref());
    if store.route().get_untracked() != route {
        if !matches!(route, AdminRoute::Edit(..)) {
            *store.editing().write() = None;
        }
        *store.route().write() = route;
    }
}

pub fn store_notify(store: &AdminStore, message: String) {
    *store.notice().write() = Some(message);
}

/// Clear the notice unless a newer one replaced it
pub fn store_clear_notice(store: &AdminStore, message: &str) {
    if store.notice().get_untracked().as_deref() == Some(message) {
        *store.notice().write() = None;
    }
}
