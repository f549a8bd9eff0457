//! Capabilities the lesson controller drives.
//!
//! Each platform API is injected behind a trait so the controller can run
//! against a browser bridge in the app and against recording fakes in tests.
//! Calls are fire-and-forget; outcomes come back as `LessonEvent`s.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lesson_core::LessonError;
use lesson_core::config::{MediaConstraints, RecognitionSettings};
use lesson_core::model::{ListenTicket, StreamHandle, TimerToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    #[must_use]
    pub fn from_supported(supported: bool) -> Self {
        if supported {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Audio cue played on an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Success,
    Fail,
}

impl Cue {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Cue::Success => "success",
            Cue::Fail => "fail",
        }
    }
}

/// Camera (and optionally microphone) access.
///
/// Answers with `LessonEvent::MediaGranted` or `LessonEvent::MediaDenied`.
pub trait MediaCapture {
    fn availability(&self) -> Availability;
    fn request_stream(&mut self, constraints: MediaConstraints);
    fn attach_preview(&mut self, stream: &StreamHandle);
}

/// Speech recognition sessions.
///
/// Every event for a session carries the ticket passed to `start`.
pub trait SpeechRecognizer {
    fn availability(&self) -> Availability;

    /// # Errors
    ///
    /// Returns `LessonError` if the provider refuses to start synchronously.
    fn start(
        &mut self,
        ticket: ListenTicket,
        settings: &RecognitionSettings,
    ) -> Result<(), LessonError>;

    fn stop(&mut self, ticket: ListenTicket);
}

/// Best-effort fullscreen presentation.
///
/// Answers with `LessonEvent::FullscreenEntered` or `LessonEvent::FullscreenFailed`.
pub trait PresentationSurface {
    fn availability(&self) -> Availability;
    fn request_fullscreen(&mut self);
}

pub trait FeedbackPlayer {
    fn play(&mut self, cue: Cue);
}

/// Deferred transitions.
///
/// A scheduled token is answered with `LessonEvent::TimerElapsed` unless it
/// is cancelled first.
pub trait Scheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration);
    fn cancel(&mut self, token: TimerToken);
}

/// The set of capabilities owned by one controller.
pub struct LessonPorts {
    pub media: Box<dyn MediaCapture>,
    pub speech: Box<dyn SpeechRecognizer>,
    pub presentation: Box<dyn PresentationSurface>,
    pub feedback: Box<dyn FeedbackPlayer>,
    pub scheduler: Box<dyn Scheduler>,
}
