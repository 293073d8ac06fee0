//! Admin Configuration
//!
//! The hosting page may set `window.__FOLIO_ADMIN__ = { api_base, auth_token,
//! notice_ms }`. Without it the build-time `FOLIO_API_BASE` is used.

use crud_core::{ClientConfig, ConfigError};
use leptos::prelude::window;
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "__FOLIO_ADMIN__";

/// Resolved client config; never fails, bad input falls back to defaults
pub fn load_config() -> ClientConfig {
    let config = match read_global() {
        Ok(Some(config)) => config,
        Ok(None) => build_time_default(),
        Err(e) => {
            log::warn!("[CONFIG] {}; using defaults", e);
            build_time_default()
        }
    };

    match window().location().origin() {
        Ok(origin) => config.resolve_against(&origin),
        Err(_) => config,
    }
}

fn read_global() -> Result<Option<ClientConfig>, ConfigError> {
    let raw = js_sys::Reflect::get(&window(), &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| ConfigError::Parse(format!("{:?}", e)))?;
    if raw.is_undefined() || raw.is_null() {
        return Ok(None);
    }

    let config: ClientConfig =
        serde_wasm_bindgen::from_value(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validated().map(Some)
}

fn build_time_default() -> ClientConfig {
    let config = ClientConfig {
        api_base: option_env!("FOLIO_API_BASE").unwrap_or_default().to_string(),
        ..ClientConfig::default()
    };
    config.validated().unwrap_or_else(|e| {
        log::warn!("[CONFIG] {}", e);
        ClientConfig::default()
    })
}
