//! Resource List Component
//!
//! Fetches one resource's collection on mount and renders it with the
//! loading > error > empty > rows policy. Create/edit are routing only.

use crud_core::list::{self, ListState, ListView};
use crud_core::{Record, Resource};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteConfirmButton;
use crate::context::use_admin_context;
use crate::signal_cell::SignalCell;

#[component]
pub fn ResourceList(
    resource: &'static Resource,
    #[prop(into)] on_create: Callback<()>,
    #[prop(into)] on_edit: Callback<Record>,
) -> impl IntoView {
    let ctx = use_admin_context();
    let state = SignalCell::new(ListState::<Record>::new(resource.noun()));

    let reload = move || {
        let client = ctx.client();
        spawn_local(async move {
            list::load(&client, resource, &state).await;
        });
    };
    reload();

    let busy = Signal::derive(move || state.with_state(ListState::is_loading));

    view! {
        <section class="resource-list">
            <div class="list-header">
                <h2>{resource.label.clone()}</h2>
                <div class="list-actions">
                    <button class="reload-btn" disabled=move || busy.get() on:click=move |_| reload()>
                        "Reload"
                    </button>
                    <button class="create-btn" on:click=move |_| on_create.run(())>
                        {format!("New {}", resource.singular)}
                    </button>
                </div>
            </div>

            {move || state.with_state(|s| match s.view() {
                ListView::Loading => view! {
                    <p class="list-status">{format!("Loading {}...", resource.noun())}</p>
                }.into_any(),
                ListView::Error(message) => view! {
                    <p class="error">{message.to_string()}</p>
                }.into_any(),
                ListView::Empty => view! {
                    <p class="list-status">{format!("No {} yet.", resource.noun())}</p>
                }.into_any(),
                ListView::Rows(rows) => view! {
                    <ul class="list-rows">
                        {rows.iter().cloned().map(|record| view! {
                            <ListRow resource=resource record=record state=state busy=busy on_edit=on_edit />
                        }).collect_view()}
                    </ul>
                }.into_any(),
            })}
        </section>
    }
}

#[component]
fn ListRow(
    resource: &'static Resource,
    record: Record,
    state: SignalCell<ListState>,
    busy: Signal<bool>,
    on_edit: Callback<Record>,
) -> impl IntoView {
    let ctx = use_admin_context();
    let title = record.title(resource.schema.title_field());
    let Some(id) = record.id else {
        return view! { <li class="list-row">{title}</li> }.into_any();
    };

    let on_confirm = move |_: ()| {
        let client = ctx.client();
        spawn_local(async move {
            list::delete(&client, resource, &state).await;
        });
    };

    view! {
        <li class="list-row">
            <span class="row-id">{format!("#{}", id)}</span>
            <span class="row-title">{title}</span>
            <span class="row-actions">
                <button class="edit-btn" on:click=move |_| on_edit.run(record.clone())>"Edit"</button>
                <DeleteConfirmButton
                    confirming=Signal::derive(move || state.with_state(|s| s.pending_delete() == Some(id)))
                    disabled=busy
                    on_request=move |_: ()| state.update_state(|s| s.request_delete(id))
                    on_confirm=on_confirm
                    on_cancel=move |_: ()| state.update_state(ListState::cancel_delete)
                />
            </span>
        </li>
    }.into_any()
}
