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

//! Widget configuration builder.
//!
//! The widget constructor takes one options object. Policy defaults are
//! fixed here (audio muted on entry, lobby with auto-knock, trimmed
//! toolbar); only the room name and the user identity vary per meeting.
//! Serialization matches the widget's contract, which mixes camelCase
//! config keys with SCREAMING_SNAKE interface keys.

use confab_types::{AuthUser, MeetingId};
use serde::Serialize;

/// Display identity fed to the widget, resolved from the session bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn from_user(user: &AuthUser) -> Self {
        Self {
            display_name: user.display_name().to_string(),
            email: Some(user.email.clone()),
        }
    }

    /// Identity when no profile is available (should not happen behind the
    /// auth gate, but the widget requires a display name).
    pub fn guest() -> Self {
        Self {
            display_name: "Guest".to_string(),
            email: None,
        }
    }
}

/// The complete constructor options object.
///
/// `parentNode` is a live DOM element and is attached by the platform at
/// construction time; everything here serializes as plain data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingOptions {
    pub room_name: String,
    pub width: String,
    pub height: String,
    pub user_info: UserIdentity,
    pub config_overwrite: ConfigOverwrite,
    pub interface_config_overwrite: InterfaceConfigOverwrite,
    /// DOM id of the container the platform mounts `parentNode` from.
    #[serde(skip)]
    pub parent_container_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverwrite {
    pub prejoin_page_enabled: bool,
    pub start_with_audio_muted: bool,
    pub start_with_video_muted: bool,
    pub disable_deep_linking: bool,
    pub require_display_name: bool,
    pub enable_insecure_room_name_warning: bool,
    pub enable_close_page: bool,
    pub enable_lobby_chat: bool,
    pub lobby: LobbyConfig,
    pub toolbar_buttons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyConfig {
    pub enabled: bool,
    pub auto_knock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceConfigOverwrite {
    #[serde(rename = "TOOLBAR_BUTTONS")]
    pub toolbar_buttons: Vec<String>,
    #[serde(rename = "TOOLBAR_ALWAYS_VISIBLE")]
    pub toolbar_always_visible: bool,
    #[serde(rename = "SHOW_CHROME_EXTENSION_BANNER")]
    pub show_chrome_extension_banner: bool,
}

fn toolbar() -> Vec<String> {
    [
        "microphone",
        "camera",
        "desktop",
        "hangup",
        "chat",
        "participants-pane",
        "tileview",
        "raisehand",
        "videoquality",
        "filmstrip",
        "security",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl MeetingOptions {
    /// Build the options for one meeting: policy defaults plus the room
    /// (with the deployment's optional name prefix) and the user identity.
    pub fn build(
        room: &MeetingId,
        room_prefix: Option<&str>,
        identity: UserIdentity,
        parent_container_id: &str,
    ) -> Self {
        let room_name = match room_prefix {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}{room}"),
            _ => room.to_string(),
        };
        Self {
            room_name,
            width: "100%".to_string(),
            height: "100%".to_string(),
            user_info: identity,
            config_overwrite: ConfigOverwrite {
                prejoin_page_enabled: true,
                start_with_audio_muted: true,
                start_with_video_muted: false,
                disable_deep_linking: true,
                require_display_name: true,
                enable_insecure_room_name_warning: false,
                enable_close_page: false,
                enable_lobby_chat: false,
                lobby: LobbyConfig {
                    enabled: true,
                    auto_knock: true,
                },
                toolbar_buttons: toolbar(),
            },
            interface_config_overwrite: InterfaceConfigOverwrite {
                toolbar_buttons: toolbar(),
                toolbar_always_visible: true,
                show_chrome_extension_banner: false,
            },
            parent_container_id: parent_container_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::{AuthUser, UserMetadata};

    fn room() -> MeetingId {
        MeetingId::parse("abc12-def34").unwrap()
    }

    #[test]
    fn serializes_with_the_widget_key_conventions() {
        let options = MeetingOptions::build(&room(), None, UserIdentity::guest(), "meet-root");
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["roomName"], "abc12-def34");
        assert_eq!(json["userInfo"]["displayName"], "Guest");
        assert_eq!(json["configOverwrite"]["startWithAudioMuted"], true);
        assert_eq!(json["configOverwrite"]["lobby"]["autoKnock"], true);
        assert_eq!(
            json["interfaceConfigOverwrite"]["TOOLBAR_BUTTONS"][0],
            "microphone"
        );
        // The DOM container id never reaches the widget as data.
        assert!(json.get("parentContainerId").is_none());
    }

    #[test]
    fn room_prefix_is_applied_when_configured() {
        let options = MeetingOptions::build(
            &room(),
            Some("confab-"),
            UserIdentity::guest(),
            "meet-root",
        );
        assert_eq!(options.room_name, "confab-abc12-def34");

        let options = MeetingOptions::build(&room(), Some(""), UserIdentity::guest(), "meet-root");
        assert_eq!(options.room_name, "abc12-def34");
    }

    #[test]
    fn identity_resolves_name_then_email() {
        let user = AuthUser {
            id: "u-1".into(),
            email: "ada@confab.example".into(),
            user_metadata: UserMetadata::default(),
        };
        let identity = UserIdentity::from_user(&user);
        assert_eq!(identity.display_name, "ada@confab.example");
        assert_eq!(identity.email.as_deref(), Some("ada@confab.example"));
    }
}
