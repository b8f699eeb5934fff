// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meeting view: auth-gated host for the embedded conferencing widget.
//!
//! The view owns one [`EmbedController`] per mount. The container div is
//! rendered first, the controller mounts in the post-render effect, and
//! the effect's cleanup disposes it — navigation away can never leave a
//! live widget or its script tag behind.

use crate::auth_gate::AuthGate;
use crate::constants::{meet_domain, meet_script_url, room_prefix, MEET_CONTAINER_ID};
use crate::routing::Route;
use confab_embed::{
    ControllerState, DomPlatform, EmbedController, EmbedOptions, UserIdentity, WidgetEvent,
};
use confab_types::{AuthUser, MeetingId};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MeetingPageProps {
    pub id: String,
}

#[function_component(MeetingPage)]
pub fn meeting_page(props: &MeetingPageProps) -> Html {
    let id = props.id.clone();
    let render = Callback::from(move |user: AuthUser| {
        html! { <MeetingRoom id={id.clone()} user={user} /> }
    });
    html! { <AuthGate render={render} /> }
}

#[derive(Properties, PartialEq, Clone)]
struct MeetingRoomProps {
    id: String,
    user: AuthUser,
}

fn build_controller(
    state_sink: UseStateHandle<ControllerState>,
    navigator: Navigator,
) -> Result<EmbedController<DomPlatform>, String> {
    let script_url = meet_script_url()?;
    let widget_domain = meet_domain()?;
    Ok(EmbedController::new(
        DomPlatform::new(),
        EmbedOptions {
            script_url,
            widget_domain,
            room_prefix: room_prefix(),
            parent_container_id: MEET_CONTAINER_ID.to_string(),
            on_event: confab_types::Callback::from(move |event: WidgetEvent| {
                if event == WidgetEvent::ReadyToClose {
                    // Leaving the route unmounts this view, and the mount
                    // effect's cleanup disposes the widget.
                    navigator.push(&Route::Home);
                }
            }),
            on_state_change: confab_types::Callback::from(move |state: ControllerState| {
                state_sink.set(state);
            }),
        },
    ))
}

#[function_component(MeetingRoom)]
fn meeting_room(props: &MeetingRoomProps) -> Html {
    let navigator = use_navigator().expect("Navigator context missing");
    let state = use_state(|| ControllerState::Idle);

    let controller = {
        let state = state.clone();
        let navigator = navigator.clone();
        use_state(move || build_controller(state, navigator))
    };

    {
        let controller = controller.clone();
        let room = props.id.clone();
        let user = props.user.clone();
        use_effect_with((), move |_| {
            if let Ok(ctrl) = &*controller {
                ctrl.mount();
                match MeetingId::parse(&room) {
                    Some(room) => ctrl.set_room(room),
                    None => log::warn!("meeting route with an empty id"),
                }
                ctrl.set_identity(UserIdentity::from_user(&user));
            }
            let controller = controller.clone();
            move || {
                if let Ok(ctrl) = &*controller {
                    ctrl.dispose();
                }
            }
        });
    }

    let on_leave = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            if let Ok(ctrl) = &*controller {
                ctrl.hang_up();
            }
        })
    };

    let on_return_home = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| navigator.push(&Route::Home))
    };

    if let Err(e) = &*controller {
        return html! {
            <div class="meeting-error">
                <p>{ format!("Meeting is not configured: {e}") }</p>
                <button class="cta-button" onclick={on_return_home}>{"Return home"}</button>
            </div>
        };
    }

    let status_html = match &*state {
        ControllerState::Idle | ControllerState::ScriptLoading => html! {
            <p class="meeting-status">{"Loading conference..."}</p>
        },
        ControllerState::ScriptLoaded => html! {
            <p class="meeting-status">{"Starting the meeting..."}</p>
        },
        ControllerState::Error(message) => html! {
            <div class="meeting-error">
                <p>{ message.clone() }</p>
                <button class="cta-button" onclick={on_return_home.clone()}>
                    {"Return home"}
                </button>
            </div>
        },
        ControllerState::WidgetActive | ControllerState::Disposed => html! {},
    };

    html! {
        <div class="meeting-page">
            <div class="meeting-toolbar">
                <span class="meeting-id">{ props.id.clone() }</span>
                <button class="leave-button" onclick={on_leave}>{"End meeting"}</button>
            </div>
            { status_html }
            <div id={MEET_CONTAINER_ID} class="meeting-container"></div>
        </div>
    }
}
