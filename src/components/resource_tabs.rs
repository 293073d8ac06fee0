//! Resource Tab Bar Component
//!
//! One tab per registered resource; the active tab follows the route.

use crud_core::{resources, AdminRoute};
use leptos::prelude::*;

use crate::store::{store_navigate, use_admin_store, AdminStateStoreFields};

#[component]
pub fn ResourceTabs() -> impl IntoView {
    let store = use_admin_store();

    view! {
        <nav class="resource-tabs">
            <For
                each=move || resources::all().iter()
                key=|resource| resource.slug.clone()
                children=move |resource| {
                    let slug = resource.slug.clone();
                    let is_active = move || store.route().with(|route| route.slug() == slug);
                    let tab_class = move || {
                        if is_active() { "resource-tab active" } else { "resource-tab" }
                    };

                    view! {
                        <button
                            class=tab_class
                            on:click=move |_| store_navigate(&store, AdminRoute::List(resource.slug.clone()))
                        >
                            {resource.label.clone()}
                        </button>
                    }
                }
            />
        </nav>
    }
}
