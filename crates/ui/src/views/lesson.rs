use std::sync::Arc;

use dioxus::prelude::*;
use futures::StreamExt;
use tracing::warn;

use lesson_core::LessonConfig;
use lesson_core::model::LessonEvent;
use services::LessonController;

use crate::context::AppContext;
use crate::platform::scripts::PREVIEW_ELEMENT_ID;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonControls, LessonIntent, LessonVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn LessonView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = use_signal(|| None::<LessonController>);

    // Single consumer: platform callbacks and timers are applied in arrival order.
    let events = use_coroutine(move |mut rx: UnboundedReceiver<LessonEvent>| {
        let mut controller = controller;
        async move {
            while let Some(event) = rx.next().await {
                if let Some(lesson) = controller.write().as_mut() {
                    lesson.handle(event);
                }
            }
        }
    });

    let config = ctx.config();
    let platform = ctx.platform();
    let resource = use_resource(move || {
        let config = Arc::clone(&config);
        let platform = Arc::clone(&platform);
        let mut controller = controller;
        async move {
            let ports = platform.connect(&config, events).await.map_err(|err| {
                warn!(%err, "lesson platform unavailable");
                ViewError::Platform
            })?;
            let mut lesson = LessonController::new(LessonConfig::clone(&config), ports);
            // A refusal is logged and raised as a notice by the controller.
            let _ = lesson.request_media();
            controller.set(Some(lesson));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = use_callback(move |intent: LessonIntent| {
        let mut controller = controller;
        if let Some(lesson) = controller.write().as_mut() {
            intent.apply(lesson);
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<LessonTestHandles>() {
                handles.register(dispatch_intent, events);
            }
        }
    }

    let vm = controller.read().as_ref().map(LessonVm::from_controller);
    let status_class = vm.as_ref().map_or("idle", |vm| vm.status_class);

    rsx! {
        div { class: "app {status_class}", id: "lesson-root",
            video {
                id: PREVIEW_ELEMENT_ID,
                autoplay: true,
                playsinline: true,
                muted: true,
            }
            div { class: "overlay",
                match state {
                    ViewState::Loading => rsx! {
                        p { class: "lesson-status", "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "lesson-status", "{err.message()}" }
                        button {
                            class: "demoButton",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(vm) = vm {
                            LessonBox { vm, on_intent: dispatch_intent }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn LessonBox(vm: LessonVm, on_intent: EventHandler<LessonIntent>) -> Element {
    rsx! {
        if let Some(notice) = vm.notice {
            div { class: "notice", role: "alert",
                p { "{notice}" }
                if vm.show_camera_retry {
                    button {
                        class: "notice-retry",
                        r#type: "button",
                        onclick: move |_| on_intent.call(LessonIntent::RetryCamera),
                        "Try camera again"
                    }
                }
                button {
                    class: "notice-dismiss",
                    r#type: "button",
                    onclick: move |_| on_intent.call(LessonIntent::DismissNotice),
                    "Dismiss"
                }
            }
        }
        div { class: "road",
            div { class: "box {vm.status_class}",
                if vm.controls == LessonControls::EnterDemo {
                    button {
                        class: "demoButton",
                        r#type: "button",
                        onclick: move |_| on_intent.call(LessonIntent::EnterDemo),
                        "Enter demo mode"
                    }
                } else {
                    div { class: "word jump", "{vm.prompt}" }
                    if let Some(heard) = vm.heard_label.as_ref() {
                        div { class: "heard", "{heard}" }
                    }
                    LessonButtons { controls: vm.controls, on_intent }
                    p { class: "progress", "{vm.progress_label}" }
                }
            }
        }
    }
}

#[component]
fn LessonButtons(controls: LessonControls, on_intent: EventHandler<LessonIntent>) -> Element {
    match controls {
        LessonControls::Mic => rsx! {
            button {
                class: "mic",
                r#type: "button",
                onclick: move |_| on_intent.call(LessonIntent::StartListening),
                "🎤 SAY IT"
            }
        },
        LessonControls::Listening => rsx! {
            button { class: "mic listening", r#type: "button", disabled: true, "👂 СЛУШАЮ…" }
            button {
                class: "cancelButton",
                r#type: "button",
                onclick: move |_| on_intent.call(LessonIntent::StopListening),
                "отмена"
            }
        },
        LessonControls::EnterDemo | LessonControls::Feedback => rsx! {},
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LessonTestHandles {
    dispatch: Rc<RefCell<Option<Callback<LessonIntent>>>>,
    events: Rc<RefCell<Option<Coroutine<LessonEvent>>>>,
}

#[cfg(test)]
impl LessonTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<LessonIntent>, events: Coroutine<LessonEvent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.events.borrow_mut() = Some(events);
    }

    pub(crate) fn dispatch(&self) -> Callback<LessonIntent> {
        (*self.dispatch.borrow()).expect("lesson dispatch registered")
    }

    pub(crate) fn events(&self) -> Coroutine<LessonEvent> {
        (*self.events.borrow()).expect("lesson events registered")
    }
}
