//! Folio Admin Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod markdown;
mod signal_cell;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init(log::LevelFilter::Debug) {
        web_sys::console::warn_1(&format!("[APP] logger not installed: {}", e).into());
    }

    let config = config::load_config();
    log::info!("[APP] Folio admin starting, api base {}", config.api_base);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
