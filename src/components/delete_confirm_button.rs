//! Delete Confirm Button Component
//!
//! Inline delete confirmation with confirm/cancel actions. The confirming
//! flag lives in the caller's list state so only one row asks at a time.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows a × button initially. Once the row is pending, shows "Delete?"
/// with ✓/✗ buttons.
///
/// # Arguments
/// * `confirming` - This row is awaiting confirmation
/// * `disabled` - A request is in flight
/// * `on_request` / `on_confirm` / `on_cancel` - The three user choices
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] confirming: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_request: Callback<()>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || !confirming.get()>
            <button
                class="delete-btn"
                title="Delete"
                disabled=move || disabled.get()
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_request.run(());
                }
            >
                "×"
            </button>
        </Show>
        <Show when=move || confirming.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    disabled=move || disabled.get()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_cancel.run(());
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
