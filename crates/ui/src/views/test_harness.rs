use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use lesson_core::{LessonConfig, LessonError};
use services::LessonPorts;
use services::fakes::FakePlatform;

use crate::context::{UiApp, build_app_context};
use crate::platform::{EventSink, LessonPlatform, LessonPlatformRef};
use crate::views::LessonView;
use crate::views::lesson::LessonTestHandles;

/// Connects recording fakes; nothing ever calls back on its own.
#[derive(Clone, Copy)]
enum TestPlatform {
    Full,
    WithoutSpeech,
    Unreachable,
}

#[async_trait(?Send)]
impl LessonPlatform for TestPlatform {
    async fn connect(
        &self,
        _config: &LessonConfig,
        _events: EventSink,
    ) -> Result<LessonPorts, LessonError> {
        match self {
            TestPlatform::Full => Ok(FakePlatform::new().ports()),
            TestPlatform::WithoutSpeech => Ok(FakePlatform::new().without_speech().ports()),
            TestPlatform::Unreachable => {
                Err(LessonError::Platform("bridge closed".to_string()))
            }
        }
    }
}

#[derive(Clone)]
struct TestApp {
    config: LessonConfig,
    platform: LessonPlatformRef,
}

impl UiApp for TestApp {
    fn lesson_config(&self) -> LessonConfig {
        self.config.clone()
    }

    fn platform(&self) -> LessonPlatformRef {
        Arc::clone(&self.platform)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: LessonTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn LessonHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let handles = props.handles.clone();
    use_context_provider(|| handles);
    rsx! { LessonView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: LessonTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until the platform resource and any queued events have landed.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(config: LessonConfig) -> ViewHarness {
    setup_with_platform(config, TestPlatform::Full)
}

pub fn setup_view_harness_without_speech() -> ViewHarness {
    setup_with_platform(LessonConfig::default(), TestPlatform::WithoutSpeech)
}

pub fn setup_view_harness_unreachable() -> ViewHarness {
    setup_with_platform(LessonConfig::default(), TestPlatform::Unreachable)
}

fn setup_with_platform(config: LessonConfig, platform: TestPlatform) -> ViewHarness {
    let handles = LessonTestHandles::default();
    let app = Arc::new(TestApp {
        config,
        platform: Arc::new(platform),
    });
    let dom = VirtualDom::new_with_props(
        LessonHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}
