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

//! Session bridge for the Confab front end.
//!
//! The hosted auth provider owns the actual authentication protocol
//! (password, OAuth, token refresh). This crate makes the resulting session
//! usable across every subdomain of the deployment by persisting it through
//! cookies with an explicitly resolved `Domain` attribute, instead of the
//! provider client's default storage.
//!
//! # Outline of usage
//!
//! ```no_run
//! use confab_auth::cookie::{resolve_cookie_domain, MemoryCookieStore};
//! use confab_auth::{AuthBridge, GoTrueClient, SessionStore};
//!
//! # async fn example() -> Result<(), confab_auth::cookie::DomainError> {
//! let domain = resolve_cookie_domain(Some("confab.example"), true)?;
//! let store = SessionStore::new(MemoryCookieStore::new(), domain, true, "app.confab.example");
//! let api = GoTrueClient::new("https://auth.confab.example", "anon-key");
//! let bridge = AuthBridge::new(api, store, "confabproj");
//!
//! // Resolve Loading -> Authenticated | Unauthenticated.
//! bridge.refresh().await;
//! let _user = bridge.current_user();
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod cookie;
pub mod error;
pub mod provider;
pub mod session_store;

pub use bridge::{AuthBridge, GateDecision, SessionState, SubscriptionId};
pub use error::AuthError;
pub use provider::{AuthApi, GoTrueClient, OAuthProvider};
pub use session_store::SessionStore;
