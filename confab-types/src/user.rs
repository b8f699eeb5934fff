// SPDX-License-Identifier: MIT OR Apache-2.0

//! User and session records as returned by the hosted auth provider.
//!
//! The session's token material is opaque to this codebase: we persist and
//! forward it, never decode it. Only the embedded `user` record is read,
//! to populate the widget display identity.

use serde::{Deserialize, Serialize};

/// Optional profile metadata attached to a user by sign-up or later edits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// The authenticated user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable provider-assigned identifier.
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    /// Name shown in the meeting widget: profile name when set, else email.
    pub fn display_name(&self) -> &str {
        self.user_metadata
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }
}

/// An access/refresh token pair plus the user it belongs to.
///
/// Serialized verbatim into the session cookie so the provider's own JS
/// client running on a sibling subdomain can read the same session back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds; absent when the provider omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}
