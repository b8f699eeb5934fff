// SPDX-License-Identifier: MIT OR Apache-2.0

//! OAuth redirect target.
//!
//! Performs the one-time code exchange, then sends the user on to the app
//! regardless of the outcome: a failed exchange just lands them signed
//! out, where the auth gate re-prompts.

use crate::constants::{app_config, production};
use crate::context::AuthCtx;
use crate::routing::Route;
use web_sys::UrlSearchParams;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(AuthCallback)]
pub fn auth_callback() -> Html {
    let bridge = use_context::<AuthCtx>().expect("AuthCtx provider missing");
    let navigator = use_navigator().expect("Navigator context missing");

    use_effect_with((), move |_| {
        let code = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("code"));

        wasm_bindgen_futures::spawn_local(async move {
            match code {
                Some(code) => bridge.exchange_code(&code).await,
                None => log::warn!("auth callback reached without a code parameter"),
            }

            // Hosted deployments bounce to the canonical app URL so the
            // session cookie is read back under the apex; locally a route
            // push is enough.
            let app_url = app_config().ok().and_then(|c| c.app_url);
            match (production().unwrap_or(false), app_url) {
                (true, Some(url)) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&url);
                    }
                }
                _ => navigator.push(&Route::Home),
            }
        });
        || ()
    });

    html! {
        <div class="auth-callback">
            <p>{"Completing sign-in..."}</p>
        </div>
    }
}
