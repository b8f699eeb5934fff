// SPDX-License-Identifier: MIT OR Apache-2.0

//! Landing page: start a new meeting or join one by id.

use crate::components::header::Header;
use crate::context::AuthCtx;
use crate::routing::Route;
use confab_auth::GateDecision;
use confab_types::MeetingId;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(Home)]
pub fn home() -> Html {
    let bridge = use_context::<AuthCtx>().expect("AuthCtx provider missing");
    let navigator = use_navigator().expect("Navigator context missing");
    let join_input = use_state(String::new);
    let notice = use_state(|| None as Option<String>);

    // Starting a meeting is gated: no session means no room id is ever
    // generated, just a redirect to sign-in.
    let on_new_meeting = {
        let bridge = bridge.clone();
        let navigator = navigator.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| match bridge.gate() {
            GateDecision::Wait => {
                notice.set(Some("Still checking your session, try again in a moment.".into()));
            }
            GateDecision::RedirectToSignIn => {
                notice.set(Some("Sign in to start a meeting.".into()));
                navigator.push(&Route::SignIn);
            }
            GateDecision::Allow(_) => {
                let id = MeetingId::generate();
                navigator.push(&Route::Meeting { id: id.to_string() });
            }
        })
    };

    let on_join_input = {
        let join_input = join_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            join_input.set(input.value());
        })
    };

    let on_join = {
        let join_input = join_input.clone();
        let navigator = navigator.clone();
        let notice = notice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match MeetingId::parse(&join_input) {
                Some(id) => navigator.push(&Route::Meeting { id: id.to_string() }),
                None => notice.set(Some("Enter a meeting ID to join.".into())),
            }
        })
    };

    let notice_html = if let Some(text) = &*notice {
        html! { <p class="notice">{ text }</p> }
    } else {
        html! {}
    };

    html! {
        <div class="home-page">
            <Header />
            <main class="hero-container">
                <h1>{"Video calls and meetings for everyone"}</h1>
                <p>{"Connect, collaborate, and celebrate from anywhere with Confab"}</p>
                <div class="meeting-actions">
                    <button class="cta-button" onclick={on_new_meeting}>
                        {"New meeting"}
                    </button>
                    <form class="join-form" onsubmit={on_join}>
                        <input
                            id="meeting-id"
                            placeholder="Enter meeting ID"
                            value={(*join_input).clone()}
                            oninput={on_join_input}
                        />
                        <button type="submit" disabled={join_input.trim().is_empty()}>
                            {"Join"}
                        </button>
                    </form>
                </div>
                { notice_html }
            </main>
        </div>
    }
}
