// SPDX-License-Identifier: MIT OR Apache-2.0

//! App header: theme toggle and the signed-in profile dropdown.

use crate::context::{apply_theme, load_theme, save_theme, AuthCtx};
use crate::routing::Route;
use confab_types::AuthUser;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Header)]
pub fn header() -> Html {
    let bridge = use_context::<AuthCtx>().expect("AuthCtx provider missing");
    let navigator = use_navigator().expect("Navigator context missing");
    let theme = use_state(load_theme);
    let user = use_state(|| bridge.current_user());
    let show_dropdown = use_state(|| false);

    {
        let user = user.clone();
        let bridge = bridge.clone();
        use_effect_with((), move |_| {
            let user_for_sub = user.clone();
            let id = bridge.subscribe(confab_types::Callback::from(
                move |u: Option<AuthUser>| user_for_sub.set(u),
            ));
            user.set(bridge.current_user());
            let bridge_for_cleanup = bridge.clone();
            move || bridge_for_cleanup.unsubscribe(id)
        });
    }

    {
        let theme = *theme;
        use_effect_with(theme, move |theme| {
            apply_theme(*theme);
            || ()
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = theme.toggled();
            save_theme(next);
            theme.set(next);
        })
    };

    let on_toggle_dropdown = {
        let show_dropdown = show_dropdown.clone();
        Callback::from(move |_: MouseEvent| show_dropdown.set(!*show_dropdown))
    };

    let on_sign_out = {
        let bridge = bridge.clone();
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            let bridge = bridge.clone();
            let navigator = navigator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = bridge.sign_out().await {
                    log::warn!("sign-out reported an error: {e}");
                }
                navigator.push(&Route::SignIn);
            });
        })
    };

    let on_go_sign_in = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| navigator.push(&Route::SignIn))
    };

    let account_html = if let Some(user) = (*user).clone() {
        html! {
            <div class="profile-menu">
                <button class="profile-button" onclick={on_toggle_dropdown}>
                    { user.display_name() }
                </button>
                {
                    if *show_dropdown {
                        html! {
                            <div class="profile-dropdown">
                                <p class="profile-name">{ user.display_name() }</p>
                                <p class="profile-email">{ user.email.clone() }</p>
                                <button class="sign-out-button" onclick={on_sign_out}>
                                    {"Sign out"}
                                </button>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    } else {
        html! {
            <button class="sign-in-link" onclick={on_go_sign_in}>{"Sign in"}</button>
        }
    };

    html! {
        <header class="app-header">
            <Link<Route> to={Route::Home} classes="app-title">{"Confab"}</Link<Route>>
            <div class="header-actions">
                <button class="theme-toggle" onclick={on_toggle_theme}>
                    { if *theme == crate::context::Theme::Dark { "Light mode" } else { "Dark mode" } }
                </button>
                { account_html }
            </div>
        </header>
    }
}
