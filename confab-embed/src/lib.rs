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

//! Lifecycle controller for the embedded conferencing widget.
//!
//! The actual multi-party call — media, signaling, lobby admission,
//! moderation — runs inside a hosted widget loaded from the meeting server
//! as a remote script. This crate only manages that widget's lifecycle:
//! load the script exactly once, construct at most one widget per mounted
//! view once every precondition holds, forward its events as a typed
//! stream, and guarantee disposal on teardown.
//!
//! The widget factory is injected as a [`WidgetPlatform`] capability
//! instead of read from the global namespace, so the controller is
//! testable against a fake.
//!
//! # Outline of usage
//!
//! ```ignore
//! let controller = EmbedController::new(platform, options);
//! controller.mount();                   // injects the remote script once
//! controller.set_room(meeting_id);      // from the URL
//! controller.set_identity(identity);    // from the session bridge
//! // widget constructs itself once script + room + identity are all in
//! controller.dispose();                 // on unmount; idempotent
//! ```

pub mod config;
pub mod controller;
pub mod events;
pub mod platform;

pub use config::{MeetingOptions, UserIdentity};
pub use controller::{ControllerState, EmbedController, EmbedOptions};
pub use events::WidgetEvent;
pub use platform::{ScriptStatus, WidgetHandle, WidgetPlatform};

#[cfg(target_arch = "wasm32")]
pub use platform::web::DomPlatform;

use thiserror::Error;

/// Errors surfaced by widget construction and script loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmbedError {
    /// The remote script did not load; the meeting server may be down.
    #[error("Conferencing script failed to load: {0}. Check the meeting server.")]
    ScriptLoad(String),

    /// The script loaded but the widget constructor is missing.
    #[error("Conferencing API is not available on this page")]
    ApiUnavailable,

    /// The container element to mount into does not exist.
    #[error("Widget container #{0} not found in the document")]
    ContainerMissing(String),

    /// The widget constructor threw.
    #[error("Widget construction failed: {0}")]
    Construction(String),
}
