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

//! Cookie model: attributes, serialization, and the raw jar capability.
//!
//! The jar is deliberately `document.cookie`-shaped — a flat read of the
//! visible cookies plus a write of one serialized cookie — because that is
//! the only capability the browser actually gives client-side code. All
//! higher-level behavior (JSON round-tripping, domain-variant removal)
//! lives in [`SessionStore`](crate::SessionStore) on top of this trait.

pub mod domain;
mod memory;

#[cfg(target_arch = "wasm32")]
mod document;

pub use domain::{resolve_cookie_domain, CookieDomain, DomainError};
pub use memory::MemoryCookieStore;

#[cfg(target_arch = "wasm32")]
pub use document::DocumentCookieStore;

use std::fmt;

/// `SameSite` cookie attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Lax => write!(f, "Lax"),
            SameSite::Strict => write!(f, "Strict"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// Attributes applied when writing a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieAttributes {
    pub domain: CookieDomain,
    pub path: String,
    pub same_site: SameSite,
    /// `Secure` requires HTTPS; writing it on plain-HTTP localhost makes the
    /// cookie silently fail to persist, so it is set from the production
    /// flag, never unconditionally.
    pub secure: bool,
    /// Lifetime in seconds. `None` makes a session cookie.
    pub max_age: Option<i64>,
}

impl CookieAttributes {
    /// Attributes for session-token cookies: path `/`, `SameSite=Lax`,
    /// `Secure` in production, lifetime left to the provider's tokens.
    pub fn session(domain: CookieDomain, secure: bool) -> Self {
        Self {
            domain,
            path: "/".to_string(),
            same_site: SameSite::Lax,
            secure,
            max_age: None,
        }
    }
}

/// Serialize `name=value` plus attributes into a `document.cookie` write.
///
/// A [`CookieDomain::HostOnly`] domain omits the `Domain` attribute
/// entirely so the browser scopes the cookie to the current host.
pub fn serialize_cookie(name: &str, value: &str, attrs: &CookieAttributes) -> String {
    let mut out = format!("{name}={value}");
    if let Some(domain) = attrs.domain.attribute() {
        out.push_str("; Domain=");
        out.push_str(domain);
    }
    out.push_str("; Path=");
    out.push_str(&attrs.path);
    if let Some(max_age) = attrs.max_age {
        out.push_str(&format!("; Max-Age={max_age}"));
    }
    if attrs.secure {
        out.push_str("; Secure");
    }
    out.push_str(&format!("; SameSite={}", attrs.same_site));
    out
}

/// Epoch timestamp understood by every browser as "already expired".
pub(crate) const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Serialize a deletion: empty value, expiry in the past, under the given
/// domain variant. The browser only evicts a cookie when the deletion's
/// domain matches the one it was set under, which is why callers issue one
/// of these per plausible variant.
pub fn serialize_removal(name: &str, domain: &CookieDomain) -> String {
    let mut out = format!("{name}=");
    if let Some(d) = domain.attribute() {
        out.push_str("; Domain=");
        out.push_str(d);
    }
    out.push_str("; Path=/; Expires=");
    out.push_str(EXPIRED);
    out
}

/// Raw cookie-jar capability.
///
/// Implemented by [`DocumentCookieStore`] over the real
/// `document.cookie` in the browser and by [`MemoryCookieStore`] for tests.
pub trait CookieStore {
    /// All cookies visible to the current document, `name=a; other=b`.
    fn read(&self) -> String;

    /// Apply one serialized cookie write (set or removal).
    fn write(&self, serialized: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_only_omits_domain_attribute() {
        let attrs = CookieAttributes::session(CookieDomain::HostOnly, false);
        let s = serialize_cookie("k", "v", &attrs);
        assert_eq!(s, "k=v; Path=/; SameSite=Lax");
    }

    #[test]
    fn production_attributes_include_domain_and_secure() {
        let attrs =
            CookieAttributes::session(CookieDomain::Named(".confab.example".into()), true);
        let s = serialize_cookie("k", "v", &attrs);
        assert_eq!(
            s,
            "k=v; Domain=.confab.example; Path=/; Secure; SameSite=Lax"
        );
    }

    #[test]
    fn removal_is_expired_and_domain_scoped() {
        let s = serialize_removal("k", &CookieDomain::Named("confab.example".into()));
        assert_eq!(
            s,
            "k=; Domain=confab.example; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT"
        );
    }
}
