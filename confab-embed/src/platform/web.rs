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

//! Browser implementation of the widget platform.
//!
//! The meeting server ships its embed library as `external_api.js`, which
//! installs a `JitsiMeetExternalAPI` constructor on `window`. All access
//! to that global goes through here.

use super::{ScriptStatus, WidgetHandle, WidgetPlatform};
use crate::config::MeetingOptions;
use crate::events::{WidgetEvent, EXTERNAL_EVENT_NAMES};
use crate::EmbedError;
use confab_types::Callback;
use js_sys::{Array, Function, Reflect};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlScriptElement};

const GLOBAL_API: &str = "JitsiMeetExternalAPI";

thread_local! {
    /// Process-wide script state. The tag and the global constructor are
    /// shared by every view; this cell is their single owner.
    static SCRIPT_STATUS: Cell<ScriptStatus> = const { Cell::new(ScriptStatus::NotLoaded) };
}

/// The real browser platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomPlatform;

impl DomPlatform {
    pub fn new() -> Self {
        Self
    }
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn api_constructor() -> Option<Function> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(GLOBAL_API))
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
}

fn script_tag(document: &Document, url: &str) -> Option<HtmlScriptElement> {
    document
        .query_selector(&format!("script[src=\"{url}\"]"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

impl WidgetPlatform for DomPlatform {
    fn script_status(&self) -> ScriptStatus {
        let status = SCRIPT_STATUS.with(|s| s.get());
        // Another page of the app may have loaded the script already.
        if status == ScriptStatus::NotLoaded && api_constructor().is_some() {
            SCRIPT_STATUS.with(|s| s.set(ScriptStatus::Loaded));
            return ScriptStatus::Loaded;
        }
        status
    }

    fn inject_script(&self, url: &str, on_load: Callback<()>, on_error: Callback<String>) {
        if self.script_status() == ScriptStatus::Loaded {
            on_load.emit(());
            return;
        }
        // A tag left over from a failed load never fires again; replace it
        // so a fresh mount gets a real attempt.
        if self.script_status() == ScriptStatus::Failed {
            self.remove_script(url);
        }

        let Some(document) = document() else {
            on_error.emit("no document to inject the script into".to_string());
            return;
        };

        // Attach to an in-flight tag instead of appending a second one.
        let script = match script_tag(&document, url) {
            Some(existing) => existing,
            None => {
                let Some(body) = document.body() else {
                    on_error.emit("document has no body".to_string());
                    return;
                };
                let el = match document.create_element("script") {
                    Ok(el) => el,
                    Err(e) => {
                        on_error.emit(js_error_message(&e));
                        return;
                    }
                };
                let script: HtmlScriptElement = match el.dyn_into() {
                    Ok(s) => s,
                    Err(_) => {
                        on_error.emit("script element has an unexpected type".to_string());
                        return;
                    }
                };
                script.set_src(url);
                script.set_async(true);
                if let Err(e) = body.append_child(&script) {
                    on_error.emit(js_error_message(&e));
                    return;
                }
                SCRIPT_STATUS.with(|s| s.set(ScriptStatus::Loading));
                script
            }
        };

        let load = Closure::<dyn FnMut()>::new(move || {
            SCRIPT_STATUS.with(|s| s.set(ScriptStatus::Loaded));
            on_load.emit(());
        });
        let error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_| {
            SCRIPT_STATUS.with(|s| s.set(ScriptStatus::Failed));
            on_error.emit("remote script failed to load".to_string());
        });
        let _ = script.add_event_listener_with_callback("load", load.as_ref().unchecked_ref());
        let _ = script.add_event_listener_with_callback("error", error.as_ref().unchecked_ref());
        // The tag outlives this call; the listeners live with it.
        load.forget();
        error.forget();
    }

    fn remove_script(&self, url: &str) {
        if let Some(document) = document() {
            if let Some(script) = script_tag(&document, url) {
                script.remove();
            }
        }
        SCRIPT_STATUS.with(|s| s.set(ScriptStatus::NotLoaded));
    }

    fn create_widget(
        &self,
        domain: &str,
        options: &MeetingOptions,
        on_event: Callback<WidgetEvent>,
    ) -> Result<Box<dyn WidgetHandle>, EmbedError> {
        let constructor = api_constructor().ok_or(EmbedError::ApiUnavailable)?;
        let document = document().ok_or(EmbedError::ApiUnavailable)?;
        let container = document
            .get_element_by_id(&options.parent_container_id)
            .ok_or_else(|| EmbedError::ContainerMissing(options.parent_container_id.clone()))?;

        let options_js = serde_wasm_bindgen::to_value(options)
            .map_err(|e| EmbedError::Construction(e.to_string()))?;
        Reflect::set(&options_js, &JsValue::from_str("parentNode"), &container)
            .map_err(|e| EmbedError::Construction(js_error_message(&e)))?;

        let args = Array::of2(&JsValue::from_str(domain), &options_js);
        let api = Reflect::construct(&constructor, &args)
            .map_err(|e| EmbedError::Construction(js_error_message(&e)))?;

        let handle = DomWidgetHandle::new(api);
        handle.wire_events(on_event);
        Ok(Box::new(handle))
    }
}

/// Wrapper around the live external API object.
struct DomWidgetHandle {
    api: JsValue,
    /// Event closures must stay alive as long as the widget can call them.
    listeners: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
    disposed: Cell<bool>,
}

impl DomWidgetHandle {
    fn new(api: JsValue) -> Self {
        Self {
            api,
            listeners: RefCell::new(Vec::new()),
            disposed: Cell::new(false),
        }
    }

    /// Register the fixed event set, mapping each callback through the
    /// closed [`WidgetEvent`] type into the single dispatcher.
    fn wire_events(&self, on_event: Callback<WidgetEvent>) {
        for name in EXTERNAL_EVENT_NAMES {
            let dispatcher = on_event.clone();
            let closure = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
                let payload: Value =
                    serde_wasm_bindgen::from_value(payload).unwrap_or(Value::Null);
                if let Some(event) = WidgetEvent::from_external(name, payload) {
                    dispatcher.emit(event);
                }
            });
            if let Err(e) = self.call(
                "addEventListener",
                &Array::of2(&JsValue::from_str(name), closure.as_ref()),
            ) {
                log::warn!("failed to register widget listener {name}: {e}");
            }
            self.listeners.borrow_mut().push(closure);
        }
    }

    fn call(&self, method: &str, args: &Array) -> Result<JsValue, String> {
        let f: Function = Reflect::get(&self.api, &JsValue::from_str(method))
            .map_err(|e| js_error_message(&e))?
            .dyn_into()
            .map_err(|_| format!("widget API has no {method} method"))?;
        Reflect::apply(&f, &self.api, args).map_err(|e| js_error_message(&e))
    }
}

impl WidgetHandle for DomWidgetHandle {
    fn execute_command(&self, name: &str, args: &[Value]) {
        let js_args = Array::new();
        js_args.push(&JsValue::from_str(name));
        for arg in args {
            match serde_wasm_bindgen::to_value(arg) {
                Ok(v) => {
                    js_args.push(&v);
                }
                Err(e) => {
                    log::warn!("unserializable command argument for {name}: {e}");
                    return;
                }
            }
        }
        if let Err(e) = self.call("executeCommand", &js_args) {
            log::warn!("widget command {name} failed: {e}");
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Err(e) = self.call("dispose", &Array::new()) {
            log::warn!("widget dispose failed: {e}");
        }
        self.listeners.borrow_mut().clear();
    }
}
