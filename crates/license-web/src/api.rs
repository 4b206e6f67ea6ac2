//! API Client
//!
//! Builds the [`Dashboard`] from compile-time configuration and shares it
//! with the page through context.

use std::rc::Rc;

use leptos::prelude::*;
use license_client::{ClientConfig, ClientError, Dashboard};

/// `LICENSE_*` values baked in at build time
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "LICENSE_API_URL" => option_env!("LICENSE_API_URL"),
        "LICENSE_SOURCE" => option_env!("LICENSE_SOURCE"),
        "LICENSE_RETRY_DELAY_MS" => option_env!("LICENSE_RETRY_DELAY_MS"),
        "LICENSE_MOCK_LATENCY_MS" => option_env!("LICENSE_MOCK_LATENCY_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

/// Configuration for the browser. Without an explicit API URL the API is
/// expected under `/api` on the page's own origin.
pub fn load_config() -> Result<ClientConfig, ClientError> {
    let mut config = ClientConfig::from_lookup(build_env)?;
    if build_env("LICENSE_API_URL").is_none() {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            config.api_url = format!("{origin}/api");
        }
    }
    Ok(config)
}

/// Shared dashboard service
///
/// The dashboard holds browser-only handles, so it lives in local storage
/// and is reached through a `Copy` handle.
#[derive(Clone, Copy)]
pub struct DashboardHandle {
    inner: StoredValue<Result<Rc<Dashboard>, String>, LocalStorage>,
}

impl DashboardHandle {
    pub fn new() -> Self {
        let dashboard = load_config()
            .and_then(|config| Dashboard::from_config(&config))
            .map(Rc::new)
            .map_err(|err| err.user_message("Failed to configure the license API"));

        Self {
            inner: StoredValue::new_local(dashboard),
        }
    }

    pub fn get(&self) -> Result<Rc<Dashboard>, String> {
        self.inner.get_value()
    }
}
