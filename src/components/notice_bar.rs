//! Notice Bar Component
//!
//! Shows the store's transient notice and clears it after `notice_ms`.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_admin_context;
use crate::store::{store_clear_notice, use_admin_store, AdminStateStoreFields};

#[component]
pub fn NoticeBar() -> impl IntoView {
    let ctx = use_admin_context();
    let store = use_admin_store();

    Effect::new(move |_| {
        let Some(message) = store.notice().get() else { return };
        let delay = ctx.notice_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            store_clear_notice(&store, &message);
        });
    });

    view! {
        {move || store.notice().get().map(|message| view! {
            <div class="notice-bar" on:click=move |_| *store.notice().write() = None>
                {message}
            </div>
        })}
    }
}
