// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context and persistence helpers shared across the component tree.

use crate::constants::{app_config, cookie_domain};
use confab_auth::cookie::{
    serialize_cookie, CookieAttributes, CookieDomain, CookieStore, DocumentCookieStore, SameSite,
};
use confab_auth::{AuthBridge, GoTrueClient, SessionStore};

/// The concrete bridge type the app shares through Yew context.
pub type AuthCtx = AuthBridge<GoTrueClient, DocumentCookieStore>;

/// Build the session bridge from the runtime config.
pub fn build_auth_bridge() -> Result<AuthCtx, String> {
    let config = app_config()?;
    let domain = cookie_domain()?;
    let production = crate::constants::production()?;
    let host = web_sys::window()
        .ok_or_else(|| "no window".to_string())?
        .location()
        .hostname()
        .map_err(|_| "no hostname".to_string())?;

    let store = SessionStore::new(DocumentCookieStore::new(), domain, production, &host);
    let api = GoTrueClient::new(&config.auth_url, &config.auth_anon_key);
    Ok(AuthBridge::new(api, store, &config.auth_project_ref))
}

// -----------------------------------------------------------------------------
// Theme persistence
// -----------------------------------------------------------------------------

const THEME_COOKIE: &str = "confab-theme";
const ONE_YEAR_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Read the theme preference cookie; defaults to dark.
pub fn load_theme() -> Theme {
    let jar = DocumentCookieStore::new();
    let prefix = format!("{THEME_COOKIE}=");
    jar.read()
        .split("; ")
        .find_map(|row| row.strip_prefix(prefix.as_str()))
        .and_then(|v| match v {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        })
        .unwrap_or(Theme::Dark)
}

/// Persist the theme preference for a year. Host-scoped on purpose: the
/// theme is a per-app preference, not shared session state.
pub fn save_theme(theme: Theme) {
    let attrs = CookieAttributes {
        domain: CookieDomain::HostOnly,
        path: "/".to_string(),
        same_site: SameSite::Lax,
        secure: false,
        max_age: Some(ONE_YEAR_SECS),
    };
    let jar = DocumentCookieStore::new();
    jar.write(&serialize_cookie(THEME_COOKIE, theme.as_str(), &attrs));
}

/// Reflect the theme on the document root so styles can key off it.
pub fn apply_theme(theme: Theme) {
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let classes = root.class_list();
        let _ = match theme {
            Theme::Dark => classes.add_1("dark"),
            Theme::Light => classes.remove_1("dark"),
        };
    }
}
