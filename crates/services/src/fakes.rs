//! Recording capability fakes.
//!
//! Every fake appends to a shared `CallLog` so a test can hand the ports to a
//! controller and still inspect what the controller asked the platform to do.
//! Provider answers are injected by calling `LessonController::handle`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use lesson_core::LessonError;
use lesson_core::config::{MediaConstraints, RecognitionSettings};
use lesson_core::model::{ListenTicket, StreamHandle, TimerToken};

use crate::lesson::{
    Availability, Cue, FeedbackPlayer, LessonPorts, MediaCapture, PresentationSurface, Scheduler,
    SpeechRecognizer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortCall {
    RequestStream(MediaConstraints),
    AttachPreview(StreamHandle),
    StartRecognition {
        ticket: ListenTicket,
        language: String,
    },
    StopRecognition(ListenTicket),
    RequestFullscreen,
    Play(Cue),
    Schedule(TimerToken, Duration),
    Cancel(TimerToken),
}

#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<PortCall>>>);

impl CallLog {
    fn push(&self, call: PortCall) {
        self.0.borrow_mut().push(call);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<PortCall> {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn contains(&self, call: &PortCall) -> bool {
        self.0.borrow().contains(call)
    }

    #[must_use]
    pub fn scheduled(&self) -> Vec<(TimerToken, Duration)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                PortCall::Schedule(token, delay) => Some((*token, *delay)),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn started_tickets(&self) -> Vec<ListenTicket> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                PortCall::StartRecognition { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count_stops(&self) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|call| matches!(call, PortCall::StopRecognition(_)))
            .count()
    }

    #[must_use]
    pub fn played(&self) -> Vec<Cue> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                PortCall::Play(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }
}

/// Builder for a set of recording fakes.
#[derive(Debug, Clone)]
pub struct FakePlatform {
    log: CallLog,
    media: Availability,
    speech: Availability,
    presentation: Availability,
    start_error: Option<LessonError>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePlatform {
    /// Every capability available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            media: Availability::Available,
            speech: Availability::Available,
            presentation: Availability::Available,
            start_error: None,
        }
    }

    #[must_use]
    pub fn without_media(mut self) -> Self {
        self.media = Availability::Unavailable;
        self
    }

    #[must_use]
    pub fn without_speech(mut self) -> Self {
        self.speech = Availability::Unavailable;
        self
    }

    #[must_use]
    pub fn without_fullscreen(mut self) -> Self {
        self.presentation = Availability::Unavailable;
        self
    }

    /// Make every `SpeechRecognizer::start` call fail with `err`.
    #[must_use]
    pub fn with_start_error(mut self, err: LessonError) -> Self {
        self.start_error = Some(err);
        self
    }

    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    #[must_use]
    pub fn ports(&self) -> LessonPorts {
        LessonPorts {
            media: Box::new(FakeMedia {
                log: self.log.clone(),
                availability: self.media,
            }),
            speech: Box::new(FakeSpeech {
                log: self.log.clone(),
                availability: self.speech,
                start_error: self.start_error.clone(),
            }),
            presentation: Box::new(FakePresentation {
                log: self.log.clone(),
                availability: self.presentation,
            }),
            feedback: Box::new(FakeFeedback {
                log: self.log.clone(),
            }),
            scheduler: Box::new(FakeScheduler {
                log: self.log.clone(),
            }),
        }
    }
}

struct FakeMedia {
    log: CallLog,
    availability: Availability,
}

impl MediaCapture for FakeMedia {
    fn availability(&self) -> Availability {
        self.availability
    }

    fn request_stream(&mut self, constraints: MediaConstraints) {
        self.log.push(PortCall::RequestStream(constraints));
    }

    fn attach_preview(&mut self, stream: &StreamHandle) {
        self.log.push(PortCall::AttachPreview(stream.clone()));
    }
}

struct FakeSpeech {
    log: CallLog,
    availability: Availability,
    start_error: Option<LessonError>,
}

impl SpeechRecognizer for FakeSpeech {
    fn availability(&self) -> Availability {
        self.availability
    }

    fn start(
        &mut self,
        ticket: ListenTicket,
        settings: &RecognitionSettings,
    ) -> Result<(), LessonError> {
        if let Some(err) = self.start_error.clone() {
            return Err(err);
        }
        self.log.push(PortCall::StartRecognition {
            ticket,
            language: settings.language.clone(),
        });
        Ok(())
    }

    fn stop(&mut self, ticket: ListenTicket) {
        self.log.push(PortCall::StopRecognition(ticket));
    }
}

struct FakePresentation {
    log: CallLog,
    availability: Availability,
}

impl PresentationSurface for FakePresentation {
    fn availability(&self) -> Availability {
        self.availability
    }

    fn request_fullscreen(&mut self) {
        self.log.push(PortCall::RequestFullscreen);
    }
}

struct FakeFeedback {
    log: CallLog,
}

impl FeedbackPlayer for FakeFeedback {
    fn play(&mut self, cue: Cue) {
        self.log.push(PortCall::Play(cue));
    }
}

struct FakeScheduler {
    log: CallLog,
}

impl Scheduler for FakeScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.log.push(PortCall::Schedule(token, delay));
    }

    fn cancel(&mut self, token: TimerToken) {
        self.log.push(PortCall::Cancel(token));
    }
}
