//! Resource Form Component
//!
//! Generic create/edit form driven by the resource schema. Persisting is
//! delegated to the owner through `PersistFn`; the form only tracks its
//! fields, inline errors and the submit outcome.

use std::future::Future;
use std::rc::Rc;

use crud_core::form::{self, PersistFuture};
use crud_core::{AdminError, FieldMap, FormState, Record, Resource};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::FieldInput;
use crate::signal_cell::SignalCell;

type PersistHandler = Rc<dyn Fn(FieldMap) -> PersistFuture>;

/// Async persist callback. Leptos' `Callback` cannot return a non-`Send`
/// future, so the handler sits in local storage behind a copyable handle.
#[derive(Clone, Copy)]
pub struct PersistFn(StoredValue<PersistHandler, LocalStorage>);

impl PersistFn {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(FieldMap) -> Fut + 'static,
        Fut: Future<Output = Result<Record, AdminError>> + 'static,
    {
        let handler: PersistHandler = Rc::new(move |fields| -> PersistFuture { Box::pin(handler(fields)) });
        Self(StoredValue::new_local(handler))
    }

    pub fn call(&self, fields: FieldMap) -> PersistFuture {
        self.0
            .try_with_value(|handler| handler(fields))
            .unwrap_or_else(|| Box::pin(async { Err(AdminError::network("form closed")) }))
    }
}

#[component]
pub fn ResourceForm(
    resource: &'static Resource,
    initial: Option<Record>,
    #[prop(into)] is_loading: Signal<bool>,
    on_submit: PersistFn,
    #[prop(optional, into)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let form = SignalCell::new(FormState::new(&resource.schema, initial.as_ref()));
    let is_create = form.with_state(FormState::is_create);
    let disabled = Signal::derive(move || is_loading.get() || form.with_state(FormState::is_submitting));

    let on_form_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if disabled.get_untracked() {
            return;
        }
        spawn_local(async move {
            form::submit(&form, |fields| on_submit.call(fields)).await;
        });
    };

    let heading = if is_create {
        format!("New {}", resource.singular)
    } else {
        format!("Edit {}", resource.singular)
    };

    view! {
        <form class="resource-form" on:submit=on_form_submit>
            <h2>{heading}</h2>

            {resource.schema.fields().iter().map(|spec| view! {
                <FieldInput form=form spec=spec disabled=disabled />
            }).collect_view()}

            {move || form.with_state(|f| f.error().map(str::to_string)).map(|message| view! {
                <p class="error form-error">{message}</p>
            })}

            <div class="form-actions">
                <button type="submit" class="submit-btn" disabled=move || disabled.get()>
                    {if is_create { "Create" } else { "Save" }}
                </button>
                {on_cancel.map(|cancel| view! {
                    <button type="button" class="cancel-btn" on:click=move |_| cancel.run(())>
                        "Cancel"
                    </button>
                })}
            </div>
        </form>
    }
}
