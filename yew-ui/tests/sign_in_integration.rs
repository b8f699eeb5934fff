// Copyright 2025 Security Union LLC
// Licensed under MIT OR Apache-2.0
//
// Integration test for the sign-in page: form fields and the OAuth
// provider buttons must be present.

#![cfg(all(target_arch = "wasm32", not(target_os = "wasi")))]

mod support;

use std::time::Duration;

use support::{cleanup, create_mount_point, inject_app_config, remove_app_config};
use wasm_bindgen_test::*;
use yew::platform::time::sleep;
use yew::prelude::*;
use yew_router::prelude::*;

use confab_ui::context::{build_auth_bridge, AuthCtx};
use confab_ui::pages::sign_in::SignIn;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

#[function_component(SignInTestWrapper)]
fn sign_in_test_wrapper() -> Html {
    let bridge = use_state(|| build_auth_bridge().expect("config injected"));
    html! {
        <ContextProvider<AuthCtx> context={(*bridge).clone()}>
            <BrowserRouter>
                <SignIn />
            </BrowserRouter>
        </ContextProvider<AuthCtx>>
    }
}

#[wasm_bindgen_test]
async fn sign_in_page_renders_form_and_oauth_buttons() {
    inject_app_config();

    let mount = create_mount_point();
    yew::Renderer::<SignInTestWrapper>::with_root(mount.clone()).render();
    sleep(Duration::ZERO).await;

    assert!(
        mount.query_selector("#email").unwrap().is_some(),
        "email input missing"
    );
    assert!(
        mount.query_selector("#password").unwrap().is_some(),
        "password input missing"
    );

    let text = mount.text_content().unwrap_or_default();
    assert!(text.contains("Sign in to Confab"), "heading missing");
    for provider in ["GitHub", "Google", "Discord", "Apple"] {
        assert!(
            text.contains(&format!("Continue with {provider}")),
            "{provider} button missing"
        );
    }

    cleanup(&mount);
    remove_app_config();
}
