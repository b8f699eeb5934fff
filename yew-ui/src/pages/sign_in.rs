// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sign-in / sign-up page.
//!
//! Password flows resolve in-page; OAuth hands the browser to the
//! provider, which redirects back through `/auth/callback?code=...`.

use crate::constants::auth_callback_url;
use crate::context::AuthCtx;
use crate::routing::Route;
use confab_auth::OAuthProvider;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(SignIn)]
pub fn sign_in() -> Html {
    let bridge = use_context::<AuthCtx>().expect("AuthCtx provider missing");
    let navigator = use_navigator().expect("Navigator context missing");

    let is_sign_up = use_state(|| false);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let name = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(|| None as Option<String>);

    let on_email = field_setter(&email);
    let on_password = field_setter(&password);
    let on_name = field_setter(&name);

    let on_toggle_mode = {
        let is_sign_up = is_sign_up.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            is_sign_up.set(!*is_sign_up);
        })
    };

    let on_submit = {
        let bridge = bridge.clone();
        let navigator = navigator.clone();
        let is_sign_up = *is_sign_up;
        let email = email.clone();
        let password = password.clone();
        let name = name.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            busy.set(true);
            error.set(None);

            let bridge = bridge.clone();
            let navigator = navigator.clone();
            let email = (*email).clone();
            let password = (*password).clone();
            let name = (*name).clone();
            let busy = busy.clone();
            let error = error.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = if is_sign_up {
                    let name = (!name.trim().is_empty()).then_some(name.trim());
                    bridge.sign_up(&email, &password, name).await
                } else {
                    bridge.sign_in_with_password(&email, &password).await
                };
                busy.set(false);
                match result {
                    Ok(_) => navigator.push(&Route::Home),
                    Err(e) => {
                        log::warn!("sign-in failed: {e}");
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let oauth_button = |provider: OAuthProvider| {
        let bridge = bridge.clone();
        let error = error.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            let redirect = match auth_callback_url() {
                Ok(url) => url,
                Err(e) => {
                    error.set(Some(e));
                    return;
                }
            };
            let url = bridge.authorize_url(provider, &redirect);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&url);
            }
        });
        html! {
            <button type="button" class={format!("oauth-button oauth-{}", provider.as_str())} {onclick}>
                { format!("Continue with {}", provider_label(provider)) }
            </button>
        }
    };

    let error_html = if let Some(text) = &*error {
        html! { <p class="error">{ text }</p> }
    } else {
        html! {}
    };

    html! {
        <div class="sign-in-page">
            <form class="sign-in-form" onsubmit={on_submit}>
                <h1>{ if *is_sign_up { "Create your account" } else { "Sign in to Confab" } }</h1>
                {
                    if *is_sign_up {
                        html! {
                            <input
                                id="name"
                                placeholder="Your name"
                                value={(*name).clone()}
                                oninput={on_name}
                            />
                        }
                    } else {
                        html! {}
                    }
                }
                <input
                    id="email"
                    type="email"
                    placeholder="Email"
                    required=true
                    value={(*email).clone()}
                    oninput={on_email}
                />
                <input
                    id="password"
                    type="password"
                    placeholder="Password"
                    required=true
                    value={(*password).clone()}
                    oninput={on_password}
                />
                { error_html }
                <button class="cta-button" type="submit" disabled={*busy}>
                    { if *is_sign_up { "Sign up" } else { "Sign in" } }
                </button>
                <div class="oauth-buttons">
                    { for OAuthProvider::ALL.iter().map(|p| oauth_button(*p)) }
                </div>
                <button type="button" class="link-button" onclick={on_toggle_mode}>
                    {
                        if *is_sign_up {
                            "Already have an account? Sign in"
                        } else {
                            "New here? Create an account"
                        }
                    }
                </button>
            </form>
        </div>
    }
}

fn provider_label(provider: OAuthProvider) -> &'static str {
    match provider {
        OAuthProvider::Github => "GitHub",
        OAuthProvider::Google => "Google",
        OAuthProvider::Discord => "Discord",
        OAuthProvider::Apple => "Apple",
    }
}

fn field_setter(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}
