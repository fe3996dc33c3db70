use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const ENV_GLOBAL: &str = "__STOREFRONT_ENV";
const CONFIG_GLOBAL: &str = "__STOREFRONT_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

/// Reads `window[global][key]` for the first key that holds a string.
fn read_global(global: &str, keys: &[&str]) -> Option<String> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &global.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(&obj, &(*key).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}

fn snapshot_from_globals() -> Option<String> {
    // env.js (deploy-time) wins over a config object injected by the host page.
    read_global(ENV_GLOBAL, &["API_BASE_URL", "api_base_url"])
        .or_else(|| read_global(CONFIG_GLOBAL, &["api_base_url", "API_BASE_URL"]))
}

fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn cache_base_url(value: &str) -> String {
    let value = normalize_base_url(value);
    let _ = API_BASE_URL.set(value.clone());
    API_BASE_URL.get().cloned().unwrap_or(value)
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get(config_json_url()?).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn config_json_url() -> Option<String> {
    let origin = web_sys::window()?.location().origin().ok()?;
    Some(format!("{}/config.json", origin))
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_base_url(&existing);
    }
    match fetch_runtime_config().await.and_then(|cfg| cfg.api_base_url) {
        Some(url) => cache_base_url(&url),
        None => {
            log::warn!("no runtime config found, using {}", DEFAULT_API_BASE_URL);
            cache_base_url(DEFAULT_API_BASE_URL)
        }
    }
}

pub async fn init() {
    let url = await_api_base_url().await;
    log::info!("API base URL: {}", url);
}
