use std::sync::Arc;

use lesson_core::LessonConfig;

use crate::platform::LessonPlatformRef;

pub trait UiApp: Send + Sync {
    fn lesson_config(&self) -> LessonConfig;
    fn platform(&self) -> LessonPlatformRef;
}

#[derive(Clone)]
pub struct AppContext {
    config: Arc<LessonConfig>,
    platform: LessonPlatformRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            config: Arc::new(app.lesson_config()),
            platform: app.platform(),
        }
    }

    #[must_use]
    pub fn config(&self) -> Arc<LessonConfig> {
        Arc::clone(&self.config)
    }

    #[must_use]
    pub fn platform(&self) -> LessonPlatformRef {
        Arc::clone(&self.platform)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
