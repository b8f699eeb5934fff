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

//! Widget lifecycle state machine.
//!
//! `Idle -> ScriptLoading -> ScriptLoaded -> WidgetActive -> Disposed`,
//! with `Error` reachable from loading and from a live widget. The widget
//! is constructed only when all of: script loaded, room known, identity
//! resolved, and no live handle. Those signals arrive independently, so
//! the conjunction is re-checked on every one of them rather than once.
//!
//! A mounted view owns exactly one controller; unmounting must call
//! [`EmbedController::dispose`], which also invalidates any in-flight
//! platform callbacks so a script-load completing after teardown cannot
//! construct an orphan widget.

use crate::config::{MeetingOptions, UserIdentity};
use crate::events::WidgetEvent;
use crate::platform::{ScriptStatus, WidgetHandle, WidgetPlatform};
use confab_types::{Callback, MeetingId};
use std::cell::RefCell;
use std::rc::Rc;

/// Controller lifecycle state, surfaced to the owning view for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    ScriptLoading,
    ScriptLoaded,
    WidgetActive,
    /// Terminal for this mount; recoverable only by leaving the view and
    /// coming back.
    Error(String),
    Disposed,
}

/// Static configuration for one controller.
pub struct EmbedOptions {
    /// Where the remote embed script lives; differs between local and
    /// hosted deployments.
    pub script_url: String,
    /// Signaling domain handed to the widget constructor.
    pub widget_domain: String,
    /// Optional deployment-wide room name prefix.
    pub room_prefix: Option<String>,
    /// DOM id of the element the widget renders into.
    pub parent_container_id: String,
    /// Widget events, after internal handling (logging, error capture).
    pub on_event: Callback<WidgetEvent>,
    /// Fired on every lifecycle transition.
    pub on_state_change: Callback<ControllerState>,
}

struct Inner {
    options: EmbedOptions,
    state: ControllerState,
    /// Bumped on dispose; platform callbacks carry the generation they
    /// were created under and no-op when it no longer matches.
    generation: u64,
    room: Option<MeetingId>,
    identity: Option<UserIdentity>,
    handle: Option<Box<dyn WidgetHandle>>,
}

/// Cloneable handle over one mounted view's widget lifecycle.
pub struct EmbedController<P> {
    platform: Rc<P>,
    inner: Rc<RefCell<Inner>>,
}

impl<P> Clone for EmbedController<P> {
    fn clone(&self) -> Self {
        Self {
            platform: Rc::clone(&self.platform),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P> PartialEq for EmbedController<P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<P: WidgetPlatform + 'static> EmbedController<P> {
    pub fn new(platform: P, options: EmbedOptions) -> Self {
        Self {
            platform: Rc::new(platform),
            inner: Rc::new(RefCell::new(Inner {
                options,
                state: ControllerState::Idle,
                generation: 0,
                room: None,
                identity: None,
                handle: None,
            })),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.inner.borrow().state.clone()
    }

    /// Begin the lifecycle: load the remote script, or skip straight to
    /// `ScriptLoaded` when another view already loaded it. Calling mount
    /// again in any later state is a no-op.
    pub fn mount(&self) {
        {
            let inner = self.inner.borrow();
            if inner.state != ControllerState::Idle {
                log::debug!("mount ignored in state {:?}", inner.state);
                return;
            }
        }

        if self.platform.script_status() == ScriptStatus::Loaded {
            self.set_state(ControllerState::ScriptLoaded);
            self.try_activate();
            return;
        }

        self.set_state(ControllerState::ScriptLoading);
        let (url, generation) = {
            let inner = self.inner.borrow();
            (inner.options.script_url.clone(), inner.generation)
        };

        let this = self.clone();
        let on_load = Callback::from(move |()| {
            if this.inner.borrow().generation != generation {
                log::debug!("script loaded after teardown, ignoring");
                return;
            }
            this.handle_script_loaded();
        });
        let this = self.clone();
        let on_error = Callback::from(move |message: String| {
            if this.inner.borrow().generation != generation {
                return;
            }
            log::error!("conferencing script failed to load: {message}");
            this.set_state(ControllerState::Error(message));
        });
        self.platform.inject_script(&url, on_load, on_error);
    }

    /// Provide the room identifier (from the URL). May arrive before or
    /// after the script finishes loading.
    pub fn set_room(&self, room: MeetingId) {
        self.inner.borrow_mut().room = Some(room);
        self.try_activate();
    }

    /// Provide the resolved user identity (from the session bridge).
    pub fn set_identity(&self, identity: UserIdentity) {
        self.inner.borrow_mut().identity = Some(identity);
        self.try_activate();
    }

    /// Ask the widget to hang up; it answers with `readyToClose`.
    pub fn hang_up(&self) {
        if let Some(handle) = &self.inner.borrow().handle {
            handle.execute_command("hangup", &[]);
        }
    }

    /// Tear down: dispose the widget, drop the script tag, and invalidate
    /// any callbacks still in flight. Safe to call any number of times.
    pub fn dispose(&self) {
        let (handle, url) = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            (inner.handle.take(), inner.options.script_url.clone())
        };
        if let Some(handle) = handle {
            handle.dispose();
        }
        self.platform.remove_script(&url);
        self.set_state(ControllerState::Disposed);
    }

    fn handle_script_loaded(&self) {
        {
            let inner = self.inner.borrow();
            // A load arriving after an error (or any other state) must not
            // restart the machine.
            if inner.state != ControllerState::ScriptLoading {
                return;
            }
        }
        self.set_state(ControllerState::ScriptLoaded);
        self.try_activate();
    }

    /// Construct the widget iff every precondition holds. Guarded by the
    /// handle presence check: a second start while one is active is a
    /// no-op, never a queued or replaced widget.
    fn try_activate(&self) {
        let (domain, options, generation) = {
            let inner = self.inner.borrow();
            if inner.state != ControllerState::ScriptLoaded || inner.handle.is_some() {
                return;
            }
            let (Some(room), Some(identity)) = (&inner.room, &inner.identity) else {
                return;
            };
            let options = MeetingOptions::build(
                room,
                inner.options.room_prefix.as_deref(),
                identity.clone(),
                &inner.options.parent_container_id,
            );
            (
                inner.options.widget_domain.clone(),
                options,
                inner.generation,
            )
        };

        let dispatcher = self.dispatcher(generation);
        match self.platform.create_widget(&domain, &options, dispatcher) {
            Ok(handle) => {
                self.inner.borrow_mut().handle = Some(handle);
                self.set_state(ControllerState::WidgetActive);
            }
            Err(e) => {
                log::error!("widget construction failed: {e}");
                self.set_state(ControllerState::Error(e.to_string()));
            }
        }
    }

    /// The single internal event handler every widget listener feeds.
    fn dispatcher(&self, generation: u64) -> Callback<WidgetEvent> {
        let this = self.clone();
        Callback::from(move |event: WidgetEvent| {
            if this.inner.borrow().generation != generation {
                log::debug!("widget event after teardown, ignoring");
                return;
            }
            match &event {
                WidgetEvent::Joined => log::info!("joined the conference"),
                WidgetEvent::Knocking(participant) => {
                    log::info!("participant waiting in lobby: {participant}");
                }
                WidgetEvent::AdmissionGranted(participant) => {
                    log::info!("participant admitted from lobby: {participant}");
                }
                WidgetEvent::AdmissionDenied(participant) => {
                    log::info!("participant denied from lobby: {participant}");
                }
                WidgetEvent::ConnectionFailed(message) => {
                    // The handle stays alive for explicit teardown; only
                    // the state flips, which also blocks re-activation.
                    log::error!("widget connection failed: {message}");
                    this.set_state(ControllerState::Error(message.clone()));
                }
                WidgetEvent::ReadyToClose => {
                    log::info!("widget requested close");
                }
            }
            let outward = this.inner.borrow().options.on_event.clone();
            outward.emit(event);
        })
    }

    fn set_state(&self, next: ControllerState) {
        let notify = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == next {
                return;
            }
            inner.state = next.clone();
            inner.options.on_state_change.clone()
        };
        notify.emit(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmbedError;
    use serde_json::Value;
    use std::cell::Cell;

    const SCRIPT_URL: &str = "https://meet.confab.example/external_api.js";

    struct FakeInner {
        status: ScriptStatus,
        injected: Vec<String>,
        removed: Vec<String>,
        pending_load: Vec<Callback<()>>,
        pending_error: Vec<Callback<String>>,
        widgets_created: u32,
        fail_create: bool,
        event_sinks: Vec<Callback<WidgetEvent>>,
        last_options: Option<MeetingOptions>,
        disposals: Rc<Cell<u32>>,
        commands: Rc<RefCell<Vec<String>>>,
    }

    impl Default for FakeInner {
        fn default() -> Self {
            Self {
                status: ScriptStatus::NotLoaded,
                injected: Vec::new(),
                removed: Vec::new(),
                pending_load: Vec::new(),
                pending_error: Vec::new(),
                widgets_created: 0,
                fail_create: false,
                event_sinks: Vec::new(),
                last_options: None,
                disposals: Rc::new(Cell::new(0)),
                commands: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    /// Platform fake mirroring the DOM contract: one tag per source, late
    /// callbacks attach to the in-flight load.
    #[derive(Clone, Default)]
    struct FakePlatform {
        inner: Rc<RefCell<FakeInner>>,
    }

    impl FakePlatform {
        fn fire_load(&self) {
            let callbacks = {
                let mut inner = self.inner.borrow_mut();
                inner.status = ScriptStatus::Loaded;
                std::mem::take(&mut inner.pending_load)
            };
            for cb in callbacks {
                cb.emit(());
            }
        }

        fn fire_error(&self, message: &str) {
            let callbacks = {
                let mut inner = self.inner.borrow_mut();
                inner.status = ScriptStatus::Failed;
                std::mem::take(&mut inner.pending_error)
            };
            for cb in callbacks {
                cb.emit(message.to_string());
            }
        }

        fn emit_widget_event(&self, event: WidgetEvent) {
            let sinks = self.inner.borrow().event_sinks.clone();
            for sink in sinks {
                sink.emit(event.clone());
            }
        }
    }

    struct FakeHandle {
        disposals: Rc<Cell<u32>>,
        commands: Rc<RefCell<Vec<String>>>,
    }

    impl WidgetHandle for FakeHandle {
        fn execute_command(&self, name: &str, _args: &[Value]) {
            self.commands.borrow_mut().push(name.to_string());
        }

        fn dispose(&self) {
            self.disposals.set(self.disposals.get() + 1);
        }
    }

    impl WidgetPlatform for FakePlatform {
        fn script_status(&self) -> ScriptStatus {
            self.inner.borrow().status
        }

        fn inject_script(&self, url: &str, on_load: Callback<()>, on_error: Callback<String>) {
            let mut inner = self.inner.borrow_mut();
            if !inner.injected.iter().any(|u| u == url) {
                inner.injected.push(url.to_string());
                inner.status = ScriptStatus::Loading;
            }
            inner.pending_load.push(on_load);
            inner.pending_error.push(on_error);
        }

        fn remove_script(&self, url: &str) {
            let mut inner = self.inner.borrow_mut();
            inner.removed.push(url.to_string());
            inner.injected.retain(|u| u != url);
            inner.status = ScriptStatus::NotLoaded;
        }

        fn create_widget(
            &self,
            _domain: &str,
            options: &MeetingOptions,
            on_event: Callback<WidgetEvent>,
        ) -> Result<Box<dyn WidgetHandle>, EmbedError> {
            let mut inner = self.inner.borrow_mut();
            if inner.fail_create {
                return Err(EmbedError::ApiUnavailable);
            }
            inner.widgets_created += 1;
            inner.event_sinks.push(on_event);
            inner.last_options = Some(options.clone());
            Ok(Box::new(FakeHandle {
                disposals: inner.disposals.clone(),
                commands: inner.commands.clone(),
            }))
        }
    }

    struct Harness {
        platform: FakePlatform,
        controller: EmbedController<FakePlatform>,
        states: Rc<RefCell<Vec<ControllerState>>>,
        events: Rc<RefCell<Vec<WidgetEvent>>>,
    }

    fn harness() -> Harness {
        let platform = FakePlatform::default();
        let states = Rc::new(RefCell::new(Vec::new()));
        let events = Rc::new(RefCell::new(Vec::new()));
        let state_sink = states.clone();
        let event_sink = events.clone();
        let controller = EmbedController::new(
            platform.clone(),
            EmbedOptions {
                script_url: SCRIPT_URL.to_string(),
                widget_domain: "meet.confab.example".to_string(),
                room_prefix: Some("confab-".to_string()),
                parent_container_id: "meet-root".to_string(),
                on_event: Callback::from(move |e| event_sink.borrow_mut().push(e)),
                on_state_change: Callback::from(move |s| state_sink.borrow_mut().push(s)),
            },
        );
        Harness {
            platform,
            controller,
            states,
            events,
        }
    }

    fn room() -> MeetingId {
        MeetingId::parse("abc12-def34").unwrap()
    }

    fn activate(h: &Harness) {
        h.controller.mount();
        h.platform.fire_load();
        h.controller.set_room(room());
        h.controller.set_identity(UserIdentity::guest());
    }

    #[test]
    fn full_lifecycle_reaches_widget_active() {
        let h = harness();
        activate(&h);
        assert_eq!(h.controller.state(), ControllerState::WidgetActive);
        assert_eq!(
            *h.states.borrow(),
            vec![
                ControllerState::ScriptLoading,
                ControllerState::ScriptLoaded,
                ControllerState::WidgetActive,
            ]
        );
        let inner = h.platform.inner.borrow();
        assert_eq!(inner.widgets_created, 1);
        let options = inner.last_options.as_ref().unwrap();
        assert_eq!(options.room_name, "confab-abc12-def34");
        assert_eq!(options.parent_container_id, "meet-root");
    }

    #[test]
    fn concurrent_mounts_inject_one_script_tag() {
        let h = harness();
        let second = EmbedController::new(
            h.platform.clone(),
            EmbedOptions {
                script_url: SCRIPT_URL.to_string(),
                widget_domain: "meet.confab.example".to_string(),
                room_prefix: None,
                parent_container_id: "meet-root-2".to_string(),
                on_event: Callback::noop(),
                on_state_change: Callback::noop(),
            },
        );
        h.controller.mount();
        second.mount();
        assert_eq!(h.platform.inner.borrow().injected, vec![SCRIPT_URL]);

        // Both mounts still resolve when the one load completes.
        h.platform.fire_load();
        assert_eq!(h.controller.state(), ControllerState::ScriptLoaded);
        assert_eq!(second.state(), ControllerState::ScriptLoaded);
    }

    #[test]
    fn mounting_twice_is_a_guarded_noop() {
        let h = harness();
        h.controller.mount();
        h.controller.mount();
        assert_eq!(h.platform.inner.borrow().pending_load.len(), 1);
    }

    #[test]
    fn activation_waits_for_every_precondition() {
        let h = harness();
        h.controller.mount();
        h.platform.fire_load();
        assert_eq!(h.platform.inner.borrow().widgets_created, 0);

        h.controller.set_room(room());
        assert_eq!(h.platform.inner.borrow().widgets_created, 0);

        h.controller.set_identity(UserIdentity::guest());
        assert_eq!(h.platform.inner.borrow().widgets_created, 1);
    }

    #[test]
    fn preconditions_arriving_before_the_script_also_activate() {
        let h = harness();
        h.controller.set_room(room());
        h.controller.set_identity(UserIdentity::guest());
        h.controller.mount();
        assert_eq!(h.platform.inner.borrow().widgets_created, 0);

        h.platform.fire_load();
        assert_eq!(h.platform.inner.borrow().widgets_created, 1);
    }

    #[test]
    fn mount_skips_loading_when_script_is_already_present() {
        let h = harness();
        h.platform.inner.borrow_mut().status = ScriptStatus::Loaded;
        h.controller.set_room(room());
        h.controller.set_identity(UserIdentity::guest());
        h.controller.mount();
        assert_eq!(h.controller.state(), ControllerState::WidgetActive);
        assert!(h.platform.inner.borrow().injected.is_empty());
    }

    #[test]
    fn late_load_after_dispose_does_not_create_a_widget() {
        let h = harness();
        h.controller.set_room(room());
        h.controller.set_identity(UserIdentity::guest());
        h.controller.mount();
        h.controller.dispose();

        h.platform.fire_load();
        assert_eq!(h.platform.inner.borrow().widgets_created, 0);
        assert_eq!(h.controller.state(), ControllerState::Disposed);
    }

    #[test]
    fn script_error_is_terminal_for_the_mount() {
        let h = harness();
        h.controller.mount();
        h.platform.fire_error("backend unreachable");
        assert_eq!(
            h.controller.state(),
            ControllerState::Error("backend unreachable".to_string())
        );

        // A stray load signal afterwards must not restart the machine.
        h.platform.fire_load();
        assert_eq!(
            h.controller.state(),
            ControllerState::Error("backend unreachable".to_string())
        );
    }

    #[test]
    fn widget_construction_failure_sets_error_without_retry() {
        let h = harness();
        h.platform.inner.borrow_mut().fail_create = true;
        activate(&h);
        assert!(matches!(h.controller.state(), ControllerState::Error(_)));

        // Further signals don't re-attempt construction in this mount.
        h.controller.set_room(room());
        assert_eq!(h.platform.inner.borrow().widgets_created, 0);
    }

    #[test]
    fn connection_failure_keeps_the_handle_for_explicit_teardown() {
        let h = harness();
        activate(&h);
        h.platform
            .emit_widget_event(WidgetEvent::ConnectionFailed("ice failed".to_string()));

        assert_eq!(
            h.controller.state(),
            ControllerState::Error("ice failed".to_string())
        );
        assert_eq!(h.platform.inner.borrow().disposals.get(), 0);

        h.controller.dispose();
        assert_eq!(h.platform.inner.borrow().disposals.get(), 1);
    }

    #[test]
    fn ready_to_close_reaches_the_owner() {
        let h = harness();
        activate(&h);
        h.platform.emit_widget_event(WidgetEvent::ReadyToClose);
        assert_eq!(*h.events.borrow(), vec![WidgetEvent::ReadyToClose]);
        // Navigation and disposal are the owner's move.
        assert_eq!(h.controller.state(), ControllerState::WidgetActive);
    }

    #[test]
    fn dispose_is_idempotent_and_removes_the_script() {
        let h = harness();
        activate(&h);
        h.controller.dispose();
        h.controller.dispose();

        let inner = h.platform.inner.borrow();
        assert_eq!(inner.disposals.get(), 1);
        assert!(inner.removed.contains(&SCRIPT_URL.to_string()));
        assert_eq!(h.controller.state(), ControllerState::Disposed);
    }

    #[test]
    fn dispose_before_any_widget_is_safe() {
        let h = harness();
        h.controller.dispose();
        assert_eq!(h.platform.inner.borrow().disposals.get(), 0);
        assert_eq!(h.controller.state(), ControllerState::Disposed);
    }

    #[test]
    fn events_after_dispose_are_dropped() {
        let h = harness();
        activate(&h);
        h.controller.dispose();
        h.platform.emit_widget_event(WidgetEvent::Joined);
        assert!(h.events.borrow().is_empty());
    }

    #[test]
    fn hang_up_sends_the_command_to_the_widget() {
        let h = harness();
        activate(&h);
        h.controller.hang_up();
        assert_eq!(*h.platform.inner.borrow().commands.borrow(), vec!["hangup"]);
    }
}
