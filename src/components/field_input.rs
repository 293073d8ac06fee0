//! Field Input Components
//!
//! One input per schema field kind. Every input writes straight into the
//! form state and is disabled while the owner reports a request in flight.

use crud_core::form::FieldKey;
use crud_core::{FieldKind, FieldSpec, FieldValue, FormState, Validator};
use leptos::prelude::*;

use crate::markdown::render_markdown;
use crate::signal_cell::SignalCell;

type FormCell = SignalCell<FormState>;

#[component]
pub fn FieldInput(form: FormCell, spec: &'static FieldSpec, #[prop(into)] disabled: Signal<bool>) -> impl IntoView {
    let input_id = format!("field-{}", spec.name);

    let control = match spec.kind {
        FieldKind::Text => view! { <TextInput form=form spec=spec disabled=disabled /> }.into_any(),
        FieldKind::LongText => view! { <MarkdownInput form=form spec=spec disabled=disabled /> }.into_any(),
        FieldKind::Integer => view! { <IntegerInput form=form spec=spec disabled=disabled /> }.into_any(),
        FieldKind::Boolean => {
            return view! {
                <div class="form-field checkbox-field">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || form.with_state(|f| {
                                f.value(&spec.name).and_then(FieldValue::as_bool).unwrap_or(false)
                            })
                            disabled=move || disabled.get()
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update_state(|f| f.set_checked(&spec.name, checked));
                            }
                        />
                        {spec.label.clone()}
                    </label>
                </div>
            }
            .into_any();
        }
        FieldKind::LinkList | FieldKind::TagList => {
            view! { <ListInput form=form spec=spec disabled=disabled /> }.into_any()
        }
    };

    view! {
        <div class="form-field">
            <label for=input_id>{spec.label.clone()}</label>
            {control}
            <FieldError form=form key=FieldKey::field(&spec.name) />
        </div>
    }
    .into_any()
}

fn text_value(form: FormCell, name: &str) -> String {
    form.with_state(|f| f.value(name).map(FieldValue::display).unwrap_or_default())
}

#[component]
fn TextInput(form: FormCell, spec: &'static FieldSpec, disabled: Signal<bool>) -> impl IntoView {
    let input_type = match spec.validator {
        Some(Validator::Url) => "url",
        _ => "text",
    };

    view! {
        <input
            id=format!("field-{}", spec.name)
            type=input_type
            prop:value=move || text_value(form, &spec.name)
            disabled=move || disabled.get()
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update_state(|f| f.set_input(&spec.name, &value));
            }
        />
    }
}

#[component]
fn IntegerInput(form: FormCell, spec: &'static FieldSpec, disabled: Signal<bool>) -> impl IntoView {
    view! {
        <input
            id=format!("field-{}", spec.name)
            type="number"
            prop:value=move || text_value(form, &spec.name)
            disabled=move || disabled.get()
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update_state(|f| f.set_input(&spec.name, &value));
            }
        />
    }
}

/// Long text with a Write/Preview toggle
#[component]
fn MarkdownInput(form: FormCell, spec: &'static FieldSpec, disabled: Signal<bool>) -> impl IntoView {
    let (preview, set_preview) = signal(false);
    let tab_class = move |active: bool| if active { "editor-tab active" } else { "editor-tab" };

    view! {
        <div class="markdown-input">
            <div class="editor-tabs">
                <button type="button" class=move || tab_class(!preview.get()) on:click=move |_| set_preview.set(false)>
                    "Write"
                </button>
                <button type="button" class=move || tab_class(preview.get()) on:click=move |_| set_preview.set(true)>
                    "Preview"
                </button>
            </div>
            <Show
                when=move || preview.get()
                fallback=move || view! {
                    <textarea
                        id=format!("field-{}", spec.name)
                        rows="8"
                        prop:value=move || text_value(form, &spec.name)
                        disabled=move || disabled.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update_state(|f| f.set_input(&spec.name, &value));
                        }
                    ></textarea>
                }
            >
                <div class="markdown-preview" inner_html=move || render_markdown(&text_value(form, &spec.name))></div>
            </Show>
        </div>
    }
}

/// Link/tag list: one input per entry plus add/remove controls
#[component]
fn ListInput(form: FormCell, spec: &'static FieldSpec, disabled: Signal<bool>) -> impl IntoView {
    let name = spec.name.as_str();
    let len = Memo::new(move |_| {
        form.with_state(|f| f.value(name).and_then(FieldValue::as_list).map_or(0, <[String]>::len))
    });
    let placeholder = match spec.kind {
        FieldKind::LinkList => "https://",
        _ => "tag",
    };

    // Keyed by index so typing does not remount (and unfocus) the input
    view! {
        <div class="list-input">
            <For
                each=move || 0..len.get()
                key=|index| *index
                children=move |index| {
                    let entry = move || form.with_state(|f| {
                        f.value(name)
                            .and_then(FieldValue::as_list)
                            .and_then(|items| items.get(index).cloned())
                            .unwrap_or_default()
                    });

                    view! {
                        <div class="list-entry">
                            <input
                                type="text"
                                placeholder=placeholder
                                prop:value=entry
                                disabled=move || disabled.get()
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update_state(|f| f.set_list_entry(name, index, &value));
                                }
                            />
                            <button
                                type="button"
                                class="remove-entry-btn"
                                disabled=move || disabled.get()
                                on:click=move |_| form.update_state(|f| f.remove_list_entry(name, index))
                            >
                                "×"
                            </button>
                            <FieldError form=form key=FieldKey::entry(name, index) />
                        </div>
                    }
                }
            />
            <button
                type="button"
                class="add-entry-btn"
                disabled=move || disabled.get()
                on:click=move |_| form.update_state(|f| f.push_list_entry(name))
            >
                "+ Add"
            </button>
        </div>
    }
}

#[component]
fn FieldError(form: FormCell, key: FieldKey) -> impl IntoView {
    move || {
        form.with_state(|f| f.field_error(&key).map(str::to_string)).map(|message| view! {
            <span class="field-error">{message}</span>
        })
    }
}
