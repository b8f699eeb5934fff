// Copyright 2025 Security Union LLC
// Licensed under MIT OR Apache-2.0
//
// Browser test for the DOM platform's script-tag ownership: however many
// views ask for the embed script, the document ends up with exactly one
// tag for that source.

#![cfg(all(target_arch = "wasm32", not(target_os = "wasi")))]

use confab_embed::{DomPlatform, ScriptStatus, WidgetPlatform};
use confab_types::Callback;
use wasm_bindgen_test::*;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const URL: &str = "https://meet.invalid/external_api.js";

fn tag_count() -> u32 {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .query_selector_all(&format!("script[src=\"{URL}\"]"))
        .unwrap()
        .length()
}

#[wasm_bindgen_test]
fn concurrent_injections_create_a_single_tag() {
    let platform = DomPlatform::new();

    platform.inject_script(URL, Callback::noop(), Callback::noop());
    platform.inject_script(URL, Callback::noop(), Callback::noop());

    assert_eq!(tag_count(), 1);
    assert_eq!(platform.script_status(), ScriptStatus::Loading);

    platform.remove_script(URL);
    assert_eq!(tag_count(), 0);
    assert_eq!(platform.script_status(), ScriptStatus::NotLoaded);
}
