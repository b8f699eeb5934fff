// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory cookie jar emulating the browser behavior the session store
//! depends on: entries are keyed by `(name, domain)`, so a cookie set under
//! one domain variant is a distinct entry from — and is not deleted by —
//! the same name under another variant.
//!
//! Understands the attribute subset this crate emits (`Domain`, `Path`,
//! `Max-Age`, `Expires`, `Secure`, `SameSite`); anything else is ignored.

use super::{CookieStore, EXPIRED};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredCookie {
    name: String,
    value: String,
    domain: Option<String>,
}

/// Cloneable handle over a shared jar, so tests can keep inspecting the
/// entries after handing the store to a bridge.
#[derive(Debug, Clone, Default)]
pub struct MemoryCookieStore {
    entries: Rc<RefCell<Vec<StoredCookie>>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Domain variants under which a cookie with this name is still live.
    pub fn domains_for(&self, name: &str) -> Vec<Option<String>> {
        self.entries
            .borrow()
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.domain.clone())
            .collect()
    }
}

impl CookieStore for MemoryCookieStore {
    fn read(&self) -> String {
        self.entries
            .borrow()
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, serialized: &str) {
        let mut parts = serialized.split("; ");
        let Some((name, value)) = parts.next().and_then(|nv| nv.split_once('=')) else {
            return;
        };

        let mut domain = None;
        let mut expired = false;
        for attr in parts {
            if let Some(d) = attr.strip_prefix("Domain=") {
                domain = Some(d.to_string());
            } else if let Some(age) = attr.strip_prefix("Max-Age=") {
                expired = age.parse::<i64>().map(|a| a <= 0).unwrap_or(false);
            } else if let Some(when) = attr.strip_prefix("Expires=") {
                expired = when == EXPIRED;
            }
        }

        let mut entries = self.entries.borrow_mut();
        entries.retain(|c| !(c.name == name && c.domain == domain));
        if !expired {
            entries.push(StoredCookie {
                name: name.to_string(),
                value: value.to_string(),
                domain,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_read_back() {
        let jar = MemoryCookieStore::new();
        jar.write("a=1; Path=/; SameSite=Lax");
        jar.write("b=2; Domain=.confab.example; Path=/; SameSite=Lax");
        assert_eq!(jar.read(), "a=1; b=2");
    }

    #[test]
    fn deletion_only_hits_the_matching_domain_variant() {
        let jar = MemoryCookieStore::new();
        jar.write("tok=x; Domain=.confab.example; Path=/; SameSite=Lax");
        jar.write("tok=; Domain=confab.example; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        // Wrong variant: the dot-domain cookie survives.
        assert_eq!(
            jar.domains_for("tok"),
            vec![Some(".confab.example".to_string())]
        );

        jar.write("tok=; Domain=.confab.example; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
        assert!(jar.domains_for("tok").is_empty());
    }

    #[test]
    fn same_name_and_domain_overwrites() {
        let jar = MemoryCookieStore::new();
        jar.write("a=1; Path=/; SameSite=Lax");
        jar.write("a=2; Path=/; SameSite=Lax");
        assert_eq!(jar.read(), "a=2");
    }
}
