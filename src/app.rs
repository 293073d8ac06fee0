//! Folio Admin App
//!
//! Resource tabs on top, the routed list or form below.

use std::future::Future;

use crud_core::form::{self, FormMode};
use crud_core::{resources, AdminError, AdminRoute, ClientConfig, FieldMap, HttpClient, Record, Resource};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{LogPanel, NoticeBar, PersistFn, ResourceForm, ResourceList, ResourceTabs};
use crate::context::{use_admin_context, AdminContext};
use crate::store::{
    store_edit, store_navigate, store_notify, store_sync_hash, use_admin_store, AdminState, AdminStateStoreFields,
};

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    provide_context(AdminContext::new(HttpClient::new(config)));

    let hash = window().location().hash().unwrap_or_default();
    let store = Store::new(AdminState::new(AdminRoute::parse(&hash).unwrap_or_default().resolve(None)));
    provide_context(store);
    store_navigate(&store, store.route().get_untracked());

    // Back/forward and hand-edited hashes
    let _ = window_event_listener(leptos::ev::hashchange, move |_| {
        let hash = window().location().hash().unwrap_or_default();
        store_sync_hash(&store, &hash);
    });

    view! {
        <div class="admin-layout">
            <header class="admin-header">
                <h1>"Folio Admin"</h1>
                <ResourceTabs />
            </header>

            <NoticeBar />

            // Remounts on every route change; a fresh list reloads itself
            <main class="admin-content">
                {move || {
                    let route = store.route().get();
                    render_route(route, store.editing().get_untracked().map(|target| target.record))
                }}
            </main>

            <LogPanel />
        </div>
    }
}

fn render_route(route: AdminRoute, editing: Option<Record>) -> AnyView {
    let Some(resource) = resources::find(route.slug()) else {
        return view! { <p class="error">"Unknown resource"</p> }.into_any();
    };

    match route {
        AdminRoute::List(_) => view! { <ListPage resource=resource /> }.into_any(),
        AdminRoute::New(_) => view! { <FormPage resource=resource initial=None /> }.into_any(),
        AdminRoute::Edit(..) => view! { <FormPage resource=resource initial=editing /> }.into_any(),
    }
}

#[component]
fn ListPage(resource: &'static Resource) -> impl IntoView {
    let store = use_admin_store();

    view! {
        <ResourceList
            resource=resource
            on_create=Callback::new(move |_: ()| store_navigate(&store, AdminRoute::New(resource.slug.clone())))
            on_edit=Callback::new(move |record: Record| store_edit(&store, resource, record))
        />
    }
}

/// Create/edit page. Owns the in-flight flag and the persist handler; in
/// edit mode a successful save returns to the list, which re-fetches.
#[component]
fn FormPage(resource: &'static Resource, initial: Option<Record>) -> impl IntoView {
    let ctx = use_admin_context();
    let store = use_admin_store();
    let saving = RwSignal::new(false);
    let mode = FormMode::for_initial(initial.as_ref());

    let persist = PersistFn::new(move |fields: FieldMap| save(ctx, resource, mode, fields, saving, store));

    view! {
        <ResourceForm
            resource=resource
            initial=initial
            is_loading=saving
            on_submit=persist
            on_cancel=Callback::new(move |_: ()| store_navigate(&store, AdminRoute::List(resource.slug.clone())))
        />
    }
}

fn save(
    ctx: AdminContext,
    resource: &'static Resource,
    mode: FormMode,
    fields: FieldMap,
    saving: RwSignal<bool>,
    store: Store<AdminState>,
) -> impl Future<Output = Result<Record, AdminError>> {
    let client = ctx.client();
    async move {
        saving.set(true);
        let outcome = form::persist(&client, resource, mode, fields).await;
        saving.set(false);

        if outcome.is_ok() {
            store_notify(&store, format!("Saved {}", resource.singular));
            if let FormMode::Edit(_) = mode {
                store_navigate(&store, AdminRoute::List(resource.slug.clone()));
            }
        }
        outcome
    }
}
