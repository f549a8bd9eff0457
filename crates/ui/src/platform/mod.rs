use std::sync::Arc;

use async_trait::async_trait;
use dioxus::prelude::Coroutine;

use lesson_core::{LessonConfig, LessonError};
use lesson_core::model::LessonEvent;
use services::LessonPorts;

mod browser;
pub mod scripts;

/// Provider callbacks and timer completions are sent here and applied to
/// the controller one at a time.
pub type EventSink = Coroutine<LessonEvent>;

/// Builds the capabilities a lesson runs against.
#[async_trait(?Send)]
pub trait LessonPlatform: Send + Sync {
    /// # Errors
    ///
    /// Returns `LessonError::Platform` if the platform cannot be queried for
    /// its capabilities.
    async fn connect(
        &self,
        config: &LessonConfig,
        events: EventSink,
    ) -> Result<LessonPorts, LessonError>;
}

pub type LessonPlatformRef = Arc<dyn LessonPlatform>;

pub use browser::BrowserPlatform;
