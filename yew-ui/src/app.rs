// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application root: session bridge context, router, and route switch.

use crate::context::{apply_theme, build_auth_bridge, load_theme, AuthCtx};
use crate::pages::auth_callback::AuthCallback;
use crate::pages::home::Home;
use crate::pages::meeting::MeetingPage;
use crate::pages::sign_in::SignIn;
use crate::routing::Route;
use yew::prelude::*;
use yew_router::prelude::*;

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::SignIn => html! { <SignIn /> },
        Route::AuthCallback => html! { <AuthCallback /> },
        Route::Meeting { id } => html! { <MeetingPage id={id} /> },
        Route::NotFound => html! { <h1>{"404"}</h1> },
    }
}

#[function_component(AppRoot)]
pub fn app_root() -> Html {
    let bridge = use_state(|| build_auth_bridge());

    // Resolve the persisted session once at boot; pages react through
    // their own subscriptions.
    {
        let bridge = bridge.clone();
        use_effect_with((), move |_| {
            apply_theme(load_theme());
            if let Ok(bridge) = &*bridge {
                let bridge = bridge.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    bridge.refresh().await;
                });
            }
            || ()
        });
    }

    match &*bridge {
        Ok(bridge) => html! {
            <ContextProvider<AuthCtx> context={bridge.clone()}>
                <BrowserRouter>
                    <Switch<Route> render={switch} />
                </BrowserRouter>
            </ContextProvider<AuthCtx>>
        },
        Err(e) => html! {
            <div class="config-error">
                <h1>{"Confab"}</h1>
                <p>{ format!("This deployment is misconfigured: {e}") }</p>
            </div>
        },
    }
}
