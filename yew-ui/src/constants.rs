// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime configuration.
//!
//! The deployment injects `window.__APP_CONFIG` before the wasm bundle
//! boots; every environment-driven value is read from there at call time,
//! so one build serves local and hosted deployments.

use confab_auth::cookie::{resolve_cookie_domain, CookieDomain};
use confab_types::truthy;
use serde::Deserialize;
use serde_wasm_bindgen::from_value as from_js_value;
use wasm_bindgen::JsValue;
use web_sys::window;

/// DOM id of the element the conferencing widget mounts into.
pub const MEET_CONTAINER_ID: &str = "meet-root";

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    /// Apex domain shared by the deployment's subdomains; unset in local
    /// development.
    #[serde(rename = "apexDomain")]
    #[serde(default)]
    pub apex_domain: Option<String>,
    /// Drives the cookie `Secure` attribute, the dot-prefixed cookie
    /// domain, and the callback redirect target.
    #[serde(rename = "production")]
    pub production: String,
    #[serde(rename = "authUrl")]
    pub auth_url: String,
    #[serde(rename = "authAnonKey")]
    pub auth_anon_key: String,
    #[serde(rename = "authProjectRef")]
    pub auth_project_ref: String,
    /// Origin the embed script is served from; local and hosted
    /// deployments differ.
    #[serde(rename = "meetBaseUrl")]
    pub meet_base_url: String,
    /// Signaling domain handed to the widget constructor.
    #[serde(rename = "meetDomain")]
    pub meet_domain: String,
    #[serde(rename = "roomPrefix")]
    #[serde(default)]
    pub room_prefix: Option<String>,
    /// Absolute app URL the auth callback redirects to in production.
    #[serde(rename = "appUrl")]
    #[serde(default)]
    pub app_url: Option<String>,
}

pub fn app_config() -> Result<RuntimeConfig, String> {
    let win = window().ok_or_else(|| "no window".to_string())?;
    let config = js_sys::Reflect::get(&win, &JsValue::from_str("__APP_CONFIG"))
        .unwrap_or(JsValue::UNDEFINED);
    if config.is_undefined() || config.is_null() {
        return Err("Runtime configuration not found (window.__APP_CONFIG missing)".to_string());
    }
    from_js_value::<RuntimeConfig>(config)
        .map_err(|e| format!("Failed to parse __APP_CONFIG: {e:?}"))
}

pub fn production() -> Result<bool, String> {
    app_config().map(|c| truthy(Some(c.production.as_str())))
}

/// The cookie `Domain` attribute for this deployment.
pub fn cookie_domain() -> Result<CookieDomain, String> {
    let config = app_config()?;
    let production = truthy(Some(config.production.as_str()));
    resolve_cookie_domain(config.apex_domain.as_deref(), production).map_err(|e| e.to_string())
}

pub fn meet_script_url() -> Result<String, String> {
    app_config().map(|c| {
        format!(
            "{}/external_api.js",
            c.meet_base_url.trim_end_matches('/')
        )
    })
}

pub fn meet_domain() -> Result<String, String> {
    app_config().map(|c| c.meet_domain)
}

pub fn room_prefix() -> Option<String> {
    app_config()
        .ok()
        .and_then(|c| c.room_prefix)
        .filter(|p| !p.is_empty())
}

/// Where the OAuth flow redirects back to: current origin + callback path.
pub fn auth_callback_url() -> Result<String, String> {
    let origin = window()
        .ok_or_else(|| "no window".to_string())?
        .location()
        .origin()
        .map_err(|_| "no origin".to_string())?;
    Ok(format!("{origin}/auth/callback"))
}
