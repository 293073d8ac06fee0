//! Activity Log Panel
//!
//! Collapsible view of the console logger's recent lines.

use leptos::prelude::*;

use crate::store::{use_admin_store, AdminStateStoreFields};

#[component]
pub fn LogPanel() -> impl IntoView {
    let store = use_admin_store();
    let (lines, set_lines) = signal(Vec::<String>::new());

    let toggle = move |_| {
        let open = !store.show_log().get_untracked();
        if open {
            set_lines.set(console_logger::recent_lines());
        }
        *store.show_log().write() = open;
    };

    view! {
        <footer class="log-panel">
            <button class="log-toggle" on:click=toggle>
                {move || if store.show_log().get() { "Hide log" } else { "Show log" }}
            </button>
            <Show when=move || store.show_log().get()>
                <div class="log-actions">
                    <button on:click=move |_| set_lines.set(console_logger::recent_lines())>"Refresh"</button>
                </div>
                <pre class="log-lines">
                    {move || lines.get().join("\n")}
                </pre>
            </Show>
        </footer>
    }
}
