use lesson_core::model::{Device, Notice, Status};
use services::LessonController;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonIntent {
    EnterDemo,
    StartListening,
    StopListening,
    RetryCamera,
    DismissNotice,
}

impl LessonIntent {
    /// Apply a user action to the controller.
    ///
    /// Refusals are already logged and surfaced as notices by the controller.
    pub fn apply(self, controller: &mut LessonController) {
        match self {
            LessonIntent::EnterDemo => controller.enter_fullscreen(),
            LessonIntent::StartListening => {
                if let Err(err) = controller.start_listening() {
                    debug!(%err, "start refused");
                }
            }
            LessonIntent::StopListening => controller.stop_listening(),
            LessonIntent::RetryCamera => {
                if let Err(err) = controller.request_media() {
                    debug!(%err, "camera retry refused");
                }
            }
            LessonIntent::DismissNotice => controller.dismiss_notice(),
        }
    }
}

/// Which buttons the lesson box shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonControls {
    /// Before demo mode: only the entry button.
    EnterDemo,
    Mic,
    Listening,
    /// Success or error feedback is playing; no input.
    Feedback,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub status_class: &'static str,
    pub prompt: String,
    pub heard_label: Option<String>,
    pub controls: LessonControls,
    pub notice: Option<&'static str>,
    pub show_camera_retry: bool,
    pub progress_label: String,
}

impl LessonVm {
    #[must_use]
    pub fn from_controller(controller: &LessonController) -> Self {
        let state = controller.state();
        let controls = if !state.presenting() {
            LessonControls::EnterDemo
        } else {
            match state.status() {
                Status::Idle => LessonControls::Mic,
                Status::Listening => LessonControls::Listening,
                Status::Success | Status::Error => LessonControls::Feedback,
            }
        };
        let heard_label =
            (!state.transcript().is_empty()).then(|| format!("You said: {}", state.transcript()));
        let show_camera_retry = !state.camera_ready()
            && matches!(
                state.notice(),
                Some(Notice::PermissionDenied(Device::Camera))
            );

        Self {
            status_class: state.status().as_str(),
            prompt: controller.current_word().foreign.clone(),
            heard_label,
            controls,
            notice: state.notice().map(Notice::message),
            show_camera_retry,
            progress_label: format!(
                "{} / {}",
                state.current_index() + 1,
                controller.config().words().len()
            ),
        }
    }
}
