use crate::model::{ListenTicket, StreamHandle, TimerToken};

//
// ─── RECOGNITION FAILURES ─────────────────────────────────────────────────────
//

/// Classified error reported by the speech recognition provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionFailure {
    /// The platform refused microphone access.
    NotAllowed,
    /// Anything else: no speech, network, aborted, audio capture, ...
    Other(String),
}

impl RecognitionFailure {
    /// Classifies a browser speech error code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" => Self::NotAllowed,
            other => Self::Other(other.to_string()),
        }
    }
}

//
// ─── EVENTS ───────────────────────────────────────────────────────────────────
//

/// Asynchronous input to the lesson controller.
///
/// Provider callbacks and timer completions are delivered as values so the
/// controller can be driven deterministically from tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonEvent {
    MediaGranted(StreamHandle),
    MediaDenied { reason: String },
    FullscreenEntered,
    FullscreenFailed { reason: String },
    RecognitionStarted(ListenTicket),
    RecognitionResult {
        ticket: ListenTicket,
        transcript: String,
        is_final: bool,
    },
    RecognitionEnded(ListenTicket),
    RecognitionFailed {
        ticket: ListenTicket,
        failure: RecognitionFailure,
    },
    TimerElapsed(TimerToken),
}

impl LessonEvent {
    /// The recognition session this event belongs to, if any.
    #[must_use]
    pub fn ticket(&self) -> Option<ListenTicket> {
        match self {
            LessonEvent::RecognitionStarted(ticket)
            | LessonEvent::RecognitionEnded(ticket)
            | LessonEvent::RecognitionResult { ticket, .. }
            | LessonEvent::RecognitionFailed { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}
