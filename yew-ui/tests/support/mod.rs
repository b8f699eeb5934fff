// Copyright 2025 Security Union LLC
// Licensed under MIT OR Apache-2.0
//
// Shared test harness for confab-ui component tests.
//
// Each test file that does `mod support;` compiles its own copy, so not
// every function is used in every compilation unit.
#![allow(dead_code)]

/// Create a fresh `<div>`, attach it to `<body>`, and return it.
pub fn create_mount_point() -> web_sys::Element {
    let document = gloo_utils::document();
    let div = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

/// Remove the mount-point from `<body>` so subsequent tests start clean.
pub fn cleanup(mount: &web_sys::Element) {
    gloo_utils::document()
        .body()
        .unwrap()
        .remove_child(mount)
        .ok();
}

/// Inject a `window.__APP_CONFIG` with every `RuntimeConfig` field. Call
/// before rendering any component that reads the runtime config.
pub fn inject_app_config() {
    let config = js_sys::Object::new();
    let set = |key: &str, val: &wasm_bindgen::JsValue| {
        js_sys::Reflect::set(&config, &key.into(), val).unwrap();
    };
    set("apexDomain", &wasm_bindgen::JsValue::NULL);
    set("production", &"false".into());
    set("authUrl", &"http://test:9999".into());
    set("authAnonKey", &"test-anon-key".into());
    set("authProjectRef", &"testproj".into());
    set("meetBaseUrl", &"https://meet.test:8443".into());
    set("meetDomain", &"meet.test".into());
    set("roomPrefix", &"".into());
    set("appUrl", &wasm_bindgen::JsValue::NULL);

    let frozen = js_sys::Object::freeze(&config);
    let window = gloo_utils::window();
    js_sys::Reflect::set(&window, &"__APP_CONFIG".into(), &frozen).unwrap();
}

/// Remove `window.__APP_CONFIG` so tests don't leak state.
pub fn remove_app_config() {
    let window = gloo_utils::window();
    let _ = js_sys::Reflect::delete_property(&window.into(), &"__APP_CONFIG".into());
}
