// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auth gate for guarded views.
//!
//! While the session is still resolving the gate holds (no redirect, no
//! render of the guarded content); once resolved it either redirects to
//! sign-in or renders the content with the user. The originally intended
//! action is not replayed after sign-in — the user re-invokes it.

use crate::context::AuthCtx;
use crate::routing::Route;
use confab_auth::{GateDecision, SessionState};
use confab_types::AuthUser;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AuthGateProps {
    /// Renders the guarded content once the user is resolved.
    pub render: Callback<AuthUser, Html>,
}

#[function_component(AuthGate)]
pub fn auth_gate(props: &AuthGateProps) -> Html {
    let bridge = use_context::<AuthCtx>().expect("AuthCtx provider missing");
    let navigator = use_navigator().expect("Navigator context missing");
    let session = use_state(|| bridge.state());

    // Track the bridge for the lifetime of this gate. The subscriber maps
    // the notification payload directly so it does not capture the bridge.
    {
        let session = session.clone();
        let bridge = bridge.clone();
        use_effect_with((), move |_| {
            let session_for_sub = session.clone();
            let id = bridge.subscribe(confab_types::Callback::from(
                move |user: Option<AuthUser>| {
                    session_for_sub.set(match user {
                        Some(user) => SessionState::Authenticated(user),
                        None => SessionState::Unauthenticated,
                    });
                },
            ));
            // A freshly built bridge still has to resolve its first
            // get_user round-trip.
            if bridge.state() == SessionState::Loading {
                let bridge_for_refresh = bridge.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    bridge_for_refresh.refresh().await;
                });
            } else {
                session.set(bridge.state());
            }
            let bridge = bridge.clone();
            move || bridge.unsubscribe(id)
        });
    }

    let decision = match &*session {
        SessionState::Loading => GateDecision::Wait,
        SessionState::Unauthenticated => GateDecision::RedirectToSignIn,
        SessionState::Authenticated(user) => GateDecision::Allow(user.clone()),
    };

    // Redirect as an effect, not during render.
    {
        let redirect = decision == GateDecision::RedirectToSignIn;
        use_effect_with(redirect, move |redirect| {
            if *redirect {
                log::info!("no active session, redirecting to sign-in");
                navigator.push(&Route::SignIn);
            }
            || ()
        });
    }

    match decision {
        GateDecision::Wait => html! {
            <div class="auth-gate-status">
                <p>{"Checking authentication..."}</p>
            </div>
        },
        GateDecision::RedirectToSignIn => html! {
            <div class="auth-gate-status">
                <p>{"Please sign in to continue."}</p>
            </div>
        },
        GateDecision::Allow(user) => props.render.emit(user),
    }
}
