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

//! The session bridge proper: provider calls routed through cookie
//! persistence, plus a client-side view of the session state.
//!
//! From this client's perspective a session is
//! `Loading -> Authenticated(user) | Unauthenticated`. `Loading` covers the
//! window where the first `get_user` round-trip is outstanding; the auth
//! gate must not make access decisions until it resolves.

use crate::cookie::CookieStore;
use crate::error::AuthError;
use crate::provider::{AuthApi, OAuthProvider};
use crate::session_store::{auth_token_cookie, code_verifier_cookie, SessionStore};
use confab_types::{AuthSession, AuthUser, Callback, UserMetadata};
use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by [`AuthBridge::subscribe`]; pass it back to
/// [`AuthBridge::unsubscribe`] to detach exactly that subscriber.
pub type SubscriptionId = usize;

/// Client-side session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The initial `get_user` resolution is still in flight.
    Loading,
    Authenticated(AuthUser),
    Unauthenticated,
}

/// What a guarded action (start/join a meeting) should do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session still resolving: hold the action, do not redirect yet.
    Wait,
    /// No session: send the user to sign-in. The original action is not
    /// replayed after sign-in; the user re-invokes it.
    RedirectToSignIn,
    /// Proceed as this user.
    Allow(AuthUser),
}

struct Inner<S> {
    store: SessionStore<S>,
    token_cookie: String,
    verifier_cookie: String,
    state: SessionState,
    subscribers: Vec<(SubscriptionId, Callback<Option<AuthUser>>)>,
    next_subscriber_id: SubscriptionId,
    /// The redirect-back URL carries the code exactly once; re-renders of
    /// the callback view must not re-run the exchange.
    code_exchanged: bool,
}

/// Cloneable handle over the bridge state, in the same shape as the other
/// client handles in this codebase: the provider client lives outside the
/// `RefCell` so async calls never hold a borrow across an await.
pub struct AuthBridge<A, S> {
    api: Rc<A>,
    inner: Rc<RefCell<Inner<S>>>,
}

impl<A, S> Clone for AuthBridge<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A, S> PartialEq for AuthBridge<A, S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<A: AuthApi, S: CookieStore> AuthBridge<A, S> {
    /// `project_ref` namespaces the cookie names, matching the provider's
    /// own client on sibling subdomains.
    pub fn new(api: A, store: SessionStore<S>, project_ref: &str) -> Self {
        Self {
            api: Rc::new(api),
            inner: Rc::new(RefCell::new(Inner {
                store,
                token_cookie: auth_token_cookie(project_ref),
                verifier_cookie: code_verifier_cookie(project_ref),
                state: SessionState::Loading,
                subscribers: Vec::new(),
                next_subscriber_id: 0,
                code_exchanged: false,
            })),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.borrow().state.clone()
    }

    /// Gate a user-initiated action on the session state.
    pub fn gate(&self) -> GateDecision {
        match self.state() {
            SessionState::Loading => GateDecision::Wait,
            SessionState::Unauthenticated => GateDecision::RedirectToSignIn,
            SessionState::Authenticated(user) => GateDecision::Allow(user),
        }
    }

    /// The authenticated user, or `None` while loading or signed out.
    pub fn current_user(&self) -> Option<AuthUser> {
        match &self.inner.borrow().state {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// The persisted session, read back from the cookie store.
    pub fn session(&self) -> Option<AuthSession> {
        let inner = self.inner.borrow();
        let value = inner.store.get_item(&inner.token_cookie)?;
        serde_json::from_value(value).ok()
    }

    /// Register a session-change subscriber. The callback fires with the
    /// new user (or `None`) on every state transition; it does not fire for
    /// the current state at subscribe time.
    pub fn subscribe(&self, callback: Callback<Option<AuthUser>>) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_subscriber_id;
        inner.next_subscriber_id += 1;
        inner.subscribers.push((id, callback));
        id
    }

    /// Detach exactly the subscriber registered under `id`.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .subscribers
            .retain(|(sub_id, _)| *sub_id != id);
    }

    /// Resolve `Loading` by validating the persisted session against the
    /// provider. Also sound to call later to re-sync after tab focus.
    pub async fn refresh(&self) {
        let Some(access_token) = self.access_token() else {
            self.set_state(SessionState::Unauthenticated);
            return;
        };
        match self.api.get_user(&access_token).await {
            Ok(user) => self.set_state(SessionState::Authenticated(user)),
            Err(e) => {
                log::info!("persisted session rejected by provider: {e}");
                self.set_state(SessionState::Unauthenticated);
            }
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthUser, AuthError> {
        let session = self.api.sign_up(email, password, name).await?;
        Ok(self.install_session(session))
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let session = self.api.sign_in_with_password(email, password).await?;
        Ok(self.install_session(session))
    }

    /// Where to send the browser to start an OAuth sign-in.
    pub fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        self.api.authorize_url(provider, redirect_to)
    }

    /// One-shot authorization-code exchange for the callback route.
    ///
    /// Failure is logged, not raised: the callback route redirects to the
    /// app either way, and a failed exchange simply lands the user
    /// unauthenticated, where the auth gate re-prompts sign-in.
    pub async fn exchange_code(&self, code: &str) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.code_exchanged {
                log::debug!("authorization code already exchanged, skipping");
                return;
            }
            inner.code_exchanged = true;
        }

        let verifier = {
            let inner = self.inner.borrow();
            inner
                .store
                .get_item(&inner.verifier_cookie)
                .and_then(|v| v.as_str().map(String::from))
        };

        match self
            .api
            .exchange_code_for_session(code, verifier.as_deref())
            .await
        {
            Ok(session) => {
                {
                    let inner = self.inner.borrow();
                    let verifier_cookie = inner.verifier_cookie.clone();
                    inner.store.remove_item(&verifier_cookie);
                }
                self.install_session(session);
            }
            Err(e) => {
                log::warn!("authorization code exchange failed: {e}");
                self.set_state(SessionState::Unauthenticated);
            }
        }
    }

    /// Provider sign-out plus local cookie purge.
    ///
    /// The purge runs even when the provider call fails, and removal is
    /// issued under every domain variant; any cookie that survives the
    /// purge is re-read and logged, since it would keep a session alive on
    /// sibling subdomains.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let result = match self.access_token() {
            Some(token) => self.api.sign_out(&token).await,
            None => Ok(()),
        };
        if let Err(e) = &result {
            log::warn!("provider sign-out failed, purging local session anyway: {e}");
        }

        {
            let inner = self.inner.borrow();
            for name in [inner.token_cookie.clone(), inner.verifier_cookie.clone()] {
                inner.store.remove_item(&name);
                if inner.store.contains(&name) {
                    log::warn!("auth cookie {name} survived sign-out purge");
                }
            }
        }

        self.set_state(SessionState::Unauthenticated);
        result
    }

    pub async fn update_user_metadata(
        &self,
        metadata: &UserMetadata,
    ) -> Result<AuthUser, AuthError> {
        let token = self.access_token().ok_or(AuthError::NotAuthenticated)?;
        let user = self.api.update_user_metadata(&token, metadata).await?;
        self.set_state(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    fn access_token(&self) -> Option<String> {
        self.session().map(|s| s.access_token)
    }

    /// Persist the session through the cookie store and flip to
    /// `Authenticated`. Persisting first means a subscriber that reads the
    /// session back inside its callback sees the new cookie.
    fn install_session(&self, session: AuthSession) -> AuthUser {
        let user = session.user.clone();
        {
            let inner = self.inner.borrow();
            let token_cookie = inner.token_cookie.clone();
            match serde_json::to_value(&session) {
                Ok(value) => inner.store.set_item(&token_cookie, &value),
                Err(e) => log::error!("session could not be serialized: {e}"),
            }
        }
        self.set_state(SessionState::Authenticated(user.clone()));
        user
    }

    /// Apply a transition and notify subscribers outside the borrow.
    fn set_state(&self, next: SessionState) {
        let subscribers = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == next {
                return;
            }
            inner.state = next.clone();
            inner.subscribers.clone()
        };
        let user = match next {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        };
        for (_, callback) in subscribers {
            callback.emit(user.clone());
        }
    }
}
