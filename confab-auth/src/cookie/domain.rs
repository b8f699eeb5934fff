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

//! Cookie `Domain` attribute resolution.
//!
//! A session cookie written on one host is only visible on a sibling
//! subdomain when its `Domain` attribute is the dot-prefixed apex. A wrong
//! value does not error anywhere — the cookie just quietly stops matching
//! and cross-subdomain sign-on breaks. Every call site in the app resolves
//! the attribute through this one function.

use thiserror::Error;

/// Resolved cookie domain scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieDomain {
    /// Omit the `Domain` attribute; the browser scopes the cookie to the
    /// exact current host. Used in local development — `localhost` is not a
    /// valid `Domain` value and must be omitted rather than set.
    HostOnly,
    /// Write `Domain=<value>` verbatim.
    Named(String),
}

impl CookieDomain {
    /// The value for the `Domain` attribute, or `None` to omit it.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            CookieDomain::HostOnly => None,
            CookieDomain::Named(d) => Some(d),
        }
    }
}

/// The configured apex was not a bare hostname.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cookie apex domain must be a bare hostname, got {0:?}")]
pub struct DomainError(pub String);

/// Compute the cookie `Domain` attribute for this deployment.
///
/// | `configured_apex` | `production` | result                  |
/// |-------------------|--------------|-------------------------|
/// | unset / empty     | any          | host-only (no attribute)|
/// | `confab.example`  | `true`       | `.confab.example`       |
/// | `confab.example`  | `false`      | `confab.example`        |
///
/// The dot prefix makes the cookie visible to every subdomain of the apex;
/// outside production the bare value is used so staging hosts that happen
/// to share the apex don't receive production cookies.
///
/// The input must be a bare hostname. A single leading or trailing dot is
/// normalized away; a scheme, path separator, port, or whitespace is
/// rejected.
pub fn resolve_cookie_domain(
    configured_apex: Option<&str>,
    production: bool,
) -> Result<CookieDomain, DomainError> {
    let apex = match configured_apex {
        None => return Ok(CookieDomain::HostOnly),
        Some(raw) if raw.trim().is_empty() => return Ok(CookieDomain::HostOnly),
        Some(raw) => normalize_apex(raw)?,
    };

    if production {
        Ok(CookieDomain::Named(format!(".{apex}")))
    } else {
        Ok(CookieDomain::Named(apex))
    }
}

fn normalize_apex(raw: &str) -> Result<String, DomainError> {
    let mut candidate = raw.trim();
    candidate = candidate.strip_prefix('.').unwrap_or(candidate);
    candidate = candidate.strip_suffix('.').unwrap_or(candidate);

    let bare_hostname = !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        && !candidate.contains("..");

    if bare_hostname {
        Ok(candidate.to_string())
    } else {
        Err(DomainError(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_apex_is_host_only() {
        assert_eq!(
            resolve_cookie_domain(None, true).unwrap(),
            CookieDomain::HostOnly
        );
        assert_eq!(
            resolve_cookie_domain(Some(""), false).unwrap(),
            CookieDomain::HostOnly
        );
        assert_eq!(
            resolve_cookie_domain(Some("   "), true).unwrap(),
            CookieDomain::HostOnly
        );
    }

    #[test]
    fn production_prefixes_a_dot() {
        assert_eq!(
            resolve_cookie_domain(Some("confab.example"), true).unwrap(),
            CookieDomain::Named(".confab.example".into())
        );
    }

    #[test]
    fn non_production_uses_the_bare_value() {
        assert_eq!(
            resolve_cookie_domain(Some("confab.example"), false).unwrap(),
            CookieDomain::Named("confab.example".into())
        );
    }

    #[test]
    fn leading_and_trailing_dots_are_normalized() {
        assert_eq!(
            resolve_cookie_domain(Some(".confab.example"), true).unwrap(),
            CookieDomain::Named(".confab.example".into())
        );
        assert_eq!(
            resolve_cookie_domain(Some("confab.example."), false).unwrap(),
            CookieDomain::Named("confab.example".into())
        );
    }

    #[test]
    fn schemes_ports_and_paths_are_rejected() {
        for bad in [
            "https://confab.example",
            "confab.example/app",
            "confab.example:443",
            "confab example",
            "confab..example",
        ] {
            assert!(
                resolve_cookie_domain(Some(bad), true).is_err(),
                "accepted {bad:?}"
            );
        }
    }
}
