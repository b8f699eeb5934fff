// SPDX-License-Identifier: MIT OR Apache-2.0

//! `document.cookie` backed jar for the browser.

use super::CookieStore;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// The real browser jar. Reads and writes go straight through
/// `document.cookie`; failures (detached document, sandboxed frame) degrade
/// to an empty read or a dropped write rather than a panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookieStore;

impl DocumentCookieStore {
    pub fn new() -> Self {
        Self
    }

    fn html_document() -> Option<HtmlDocument> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
    }
}

impl CookieStore for DocumentCookieStore {
    fn read(&self) -> String {
        Self::html_document()
            .and_then(|d| d.cookie().ok())
            .unwrap_or_default()
    }

    fn write(&self, serialized: &str) {
        if let Some(doc) = Self::html_document() {
            if doc.set_cookie(serialized).is_err() {
                log::warn!("cookie write rejected by the document");
            }
        }
    }
}
