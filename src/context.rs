//! Application Context
//!
//! Injected collaborators shared via the Leptos Context API.

use crud_core::HttpClient;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AdminContext {
    /// REST client; kept in local storage since its futures are not `Send`
    client: StoredValue<HttpClient, LocalStorage>,
    /// How long notices stay up
    pub notice_ms: u32,
}

impl AdminContext {
    pub fn new(client: HttpClient) -> Self {
        let notice_ms = client.config().notice_ms;
        Self {
            client: StoredValue::new_local(client),
            notice_ms,
        }
    }

    /// Owned client handle for an async task
    pub fn client(&self) -> HttpClient {
        self.client.get_value()
    }
}

pub fn use_admin_context() -> AdminContext {
    use_context::<AdminContext>().expect("AdminContext should be provided")
}
