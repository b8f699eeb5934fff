/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Cookie-backed storage adapter for provider session state.
//!
//! The auth provider's JS client persists sessions through a pluggable
//! `getItem`/`setItem`/`removeItem` storage interface. This adapter is the
//! Rust side of that contract: values are JSON-serialized, URL-encoded, and
//! written as cookies under the resolved domain so every subdomain of the
//! deployment sees the same session.

use crate::cookie::{
    serialize_cookie, serialize_removal, CookieAttributes, CookieDomain, CookieStore,
};
use serde_json::Value;

/// Session-token cookie name, bit-exact with the provider's own client so
/// a session written here is readable by the JS client on a sibling
/// subdomain and vice versa.
pub fn auth_token_cookie(project_ref: &str) -> String {
    format!("sb-{project_ref}-auth-token")
}

/// PKCE code-verifier cookie name, pending the authorization-code exchange.
pub fn code_verifier_cookie(project_ref: &str) -> String {
    format!("sb-{project_ref}-auth-token-code-verifier")
}

/// Storage adapter over a raw [`CookieStore`].
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    jar: S,
    domain: CookieDomain,
    secure: bool,
    host: String,
}

impl<S: CookieStore> SessionStore<S> {
    /// `host` is the current location's hostname; removals are also issued
    /// under its bare and dot-prefixed variants.
    pub fn new(jar: S, domain: CookieDomain, secure: bool, host: &str) -> Self {
        Self {
            jar,
            domain,
            secure,
            host: host.to_string(),
        }
    }

    /// Read a cookie named `key`, URL-decode and JSON-parse it.
    ///
    /// Missing or malformed data is `None`, never an error: a corrupt
    /// session cookie is the same as no session.
    pub fn get_item(&self, key: &str) -> Option<Value> {
        let all = self.jar.read();
        let raw = all
            .split("; ")
            .find_map(|row| row.split_once('=').filter(|(name, _)| *name == key))
            .map(|(_, value)| value)?;
        let decoded = urlencoding::decode(raw).ok()?;
        serde_json::from_str(&decoded).ok()
    }

    /// JSON-serialize and URL-encode `value`, write it under the resolved
    /// domain with `Path=/`, `SameSite=Lax`, and `Secure` in production.
    pub fn set_item(&self, key: &str, value: &Value) {
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        let attrs = CookieAttributes::session(self.domain.clone(), self.secure);
        self.jar.write(&serialize_cookie(key, &encoded, &attrs));
    }

    /// Expire the cookie under every plausible domain variant.
    ///
    /// A deletion only evicts a cookie whose domain matches the one it was
    /// set under, so a single delete under the resolved domain can leave a
    /// stale copy alive under the bare or dot-prefixed host. That stale
    /// copy is exactly the "session survives sign-out" bug; issuing the
    /// whole variant set closes it.
    pub fn remove_item(&self, key: &str) {
        for variant in self.removal_variants() {
            self.jar.write(&serialize_removal(key, &variant));
        }
    }

    /// Whether a cookie named `key` is still visible after removal.
    pub fn contains(&self, key: &str) -> bool {
        self.jar
            .read()
            .split("; ")
            .any(|row| row.split_once('=').is_some_and(|(name, _)| name == key))
    }

    pub fn jar(&self) -> &S {
        &self.jar
    }

    fn removal_variants(&self) -> Vec<CookieDomain> {
        let variants = [
            self.domain.clone(),
            CookieDomain::HostOnly,
            CookieDomain::Named(self.host.clone()),
            CookieDomain::Named(format!(".{}", self.host)),
        ];
        let mut unique = Vec::new();
        for v in variants {
            if !unique.contains(&v) {
                unique.push(v);
            }
        }
        unique
    }
}
