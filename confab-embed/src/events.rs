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

//! Typed events from the embedded widget.
//!
//! The widget reports through string-named callbacks; we close them into
//! one tagged variant dispatched through a single handler, instead of
//! scattering untyped callback signatures across the UI.

use serde_json::Value;

/// Events the controller subscribes to on every widget it constructs.
///
/// Lobby admission is owned by the meeting server; the lobby variants are
/// informational passthroughs and never drive a local access decision.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The local user joined the conference.
    Joined,
    /// A participant is waiting in the lobby.
    Knocking(Value),
    /// The moderator admitted a lobby participant.
    AdmissionGranted(Value),
    /// The moderator denied a lobby participant.
    AdmissionDenied(Value),
    /// The widget lost its server connection.
    ConnectionFailed(String),
    /// The widget asks to be closed; the owning view should navigate away
    /// and dispose.
    ReadyToClose,
}

/// External callback names, as registered on the widget handle.
pub const EXTERNAL_EVENT_NAMES: [&str; 6] = [
    "videoConferenceJoined",
    "participantKnocking",
    "lobby.participant-access-granted",
    "lobby.participant-access-denied",
    "connectionFailed",
    "readyToClose",
];

impl WidgetEvent {
    /// Map an external callback into the closed event type. Unknown names
    /// are dropped (`None`); the widget emits many events we don't wire.
    pub fn from_external(name: &str, payload: Value) -> Option<Self> {
        match name {
            "videoConferenceJoined" => Some(WidgetEvent::Joined),
            "participantKnocking" => Some(WidgetEvent::Knocking(payload)),
            "lobby.participant-access-granted" => Some(WidgetEvent::AdmissionGranted(payload)),
            "lobby.participant-access-denied" => Some(WidgetEvent::AdmissionDenied(payload)),
            "connectionFailed" => Some(WidgetEvent::ConnectionFailed(failure_message(&payload))),
            "readyToClose" => Some(WidgetEvent::ReadyToClose),
            _ => None,
        }
    }
}

fn failure_message(payload: &Value) -> String {
    payload
        .get("message")
        .and_then(|m| m.as_str())
        .map(String::from)
        .unwrap_or_else(|| "connection to the meeting server failed".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_registered_name_maps_to_a_variant() {
        for name in EXTERNAL_EVENT_NAMES {
            assert!(
                WidgetEvent::from_external(name, Value::Null).is_some(),
                "unmapped event {name}"
            );
        }
    }

    #[test]
    fn unknown_names_are_dropped() {
        assert_eq!(WidgetEvent::from_external("tileViewChanged", Value::Null), None);
    }

    #[test]
    fn connection_failure_extracts_the_message() {
        let event =
            WidgetEvent::from_external("connectionFailed", json!({ "message": "ice failed" }));
        assert_eq!(event, Some(WidgetEvent::ConnectionFailed("ice failed".into())));

        let event = WidgetEvent::from_external("connectionFailed", Value::Null);
        assert!(matches!(event, Some(WidgetEvent::ConnectionFailed(_))));
    }
}
