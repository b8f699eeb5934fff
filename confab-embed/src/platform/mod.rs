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

//! The widget platform capability.
//!
//! The conferencing library arrives as a remote script that installs a
//! constructor on the global namespace — ambient state the controller must
//! not touch directly. [`WidgetPlatform`] wraps that capability so the
//! controller receives it by injection and tests substitute a fake.

use crate::config::MeetingOptions;
use crate::events::WidgetEvent;
use crate::EmbedError;
use confab_types::Callback;
use serde_json::Value;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Load state of the remote widget script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// A live widget instance.
///
/// Owned exclusively by the controller for the lifetime of one mounted
/// view. The event listeners are registered before the handle is returned
/// from [`WidgetPlatform::create_widget`], so no event can be missed.
pub trait WidgetHandle {
    /// Invoke a widget command, e.g. `hangup`.
    fn execute_command(&self, name: &str, args: &[Value]);

    /// Release the widget and its media connections. Must be safe to call
    /// more than once.
    fn dispose(&self);
}

/// Capability object over the remote script and global constructor.
///
/// Implementations own the process-wide "is the script injected" state;
/// [`inject_script`](WidgetPlatform::inject_script) must never create a
/// second tag for a source that is already present, even when several
/// views mount in quick succession.
pub trait WidgetPlatform {
    fn script_status(&self) -> ScriptStatus;

    /// Begin loading the remote script, or attach to an in-flight load.
    /// Exactly one of the callbacks fires per call, also when the script
    /// was already loaded.
    fn inject_script(&self, url: &str, on_load: Callback<()>, on_error: Callback<String>);

    /// Remove the script tag for `url`, if present.
    fn remove_script(&self, url: &str);

    /// Construct the widget against `domain` with the event listeners
    /// already wired to `on_event`.
    fn create_widget(
        &self,
        domain: &str,
        options: &MeetingOptions,
        on_event: Callback<WidgetEvent>,
    ) -> Result<Box<dyn WidgetHandle>, EmbedError>;
}
