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

//! Error types for the session bridge.

use thiserror::Error;

/// Errors returned by [`AuthBridge`](crate::AuthBridge) and
/// [`GoTrueClient`](crate::GoTrueClient) operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No valid session (HTTP 401, or no session cookie present).
    #[error("Not authenticated. Please sign in.")]
    NotAuthenticated,

    /// The provider rejected the request with a status and message.
    #[error("Auth provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The configured cookie apex domain is not a bare hostname.
    #[error(transparent)]
    Domain(#[from] crate::cookie::DomainError),
}
