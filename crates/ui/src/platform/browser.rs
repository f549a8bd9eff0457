use std::time::Duration;

use async_trait::async_trait;
use dioxus::document::eval;
use dioxus::prelude::{Task, spawn};
use tracing::{debug, info, warn};

use lesson_core::config::{CueSources, MediaConstraints, RecognitionSettings};
use lesson_core::model::{LessonEvent, ListenTicket, StreamHandle, TimerToken};
use lesson_core::{LessonConfig, LessonError};
use services::{
    Availability, Cue, FeedbackPlayer, LessonPorts, MediaCapture, PresentationSurface, Scheduler,
    SpeechRecognizer,
};

use super::scripts::{
    FULLSCREEN_SCRIPT, FullscreenReply, MediaReply, PREVIEW_ELEMENT_ID, PlatformSupport,
    SUPPORT_PROBE_SCRIPT, SpeechReply, attach_preview_script, play_cue_script,
    request_media_script, speech_session_script, stop_speech_script,
};
use super::{EventSink, LessonPlatform};

/// Capabilities backed by the webview's JavaScript APIs.
pub struct BrowserPlatform;

#[async_trait(?Send)]
impl LessonPlatform for BrowserPlatform {
    async fn connect(
        &self,
        config: &LessonConfig,
        events: EventSink,
    ) -> Result<LessonPorts, LessonError> {
        let support = eval(SUPPORT_PROBE_SCRIPT)
            .join::<PlatformSupport>()
            .await
            .map_err(|err| {
                warn!(?err, "platform probe failed");
                LessonError::Platform(format!("{err:?}"))
            })?;
        info!(
            speech = support.speech,
            media = support.media,
            fullscreen = support.fullscreen,
            "platform capabilities"
        );

        Ok(LessonPorts {
            media: Box::new(BrowserMedia {
                events,
                availability: Availability::from_supported(support.media),
                requests: 0,
            }),
            speech: Box::new(BrowserSpeech {
                events,
                availability: Availability::from_supported(support.speech),
            }),
            presentation: Box::new(BrowserPresentation {
                events,
                availability: Availability::from_supported(support.fullscreen),
            }),
            feedback: Box::new(BrowserFeedback {
                cues: config.cues().clone(),
            }),
            scheduler: Box::new(TaskScheduler {
                events,
                pending: None,
            }),
        })
    }
}

struct BrowserMedia {
    events: EventSink,
    availability: Availability,
    requests: u64,
}

impl MediaCapture for BrowserMedia {
    fn availability(&self) -> Availability {
        self.availability
    }

    fn request_stream(&mut self, constraints: MediaConstraints) {
        self.requests += 1;
        let stream = StreamHandle::new(format!("camera-{}", self.requests));
        let script = request_media_script(stream.as_str(), constraints);
        let events = self.events;
        spawn(async move {
            let mut reply = eval(&script);
            let event = match reply.recv::<MediaReply>().await {
                Ok(MediaReply { granted: true, .. }) => LessonEvent::MediaGranted(stream),
                Ok(MediaReply { reason, .. }) => LessonEvent::MediaDenied {
                    reason: reason.unwrap_or_else(|| "denied".to_string()),
                },
                Err(err) => LessonEvent::MediaDenied {
                    reason: format!("{err:?}"),
                },
            };
            events.send(event);
        });
    }

    fn attach_preview(&mut self, stream: &StreamHandle) {
        let _ = eval(&attach_preview_script(PREVIEW_ELEMENT_ID, stream.as_str()));
    }
}

struct BrowserSpeech {
    events: EventSink,
    availability: Availability,
}

impl SpeechRecognizer for BrowserSpeech {
    fn availability(&self) -> Availability {
        self.availability
    }

    fn start(
        &mut self,
        ticket: ListenTicket,
        settings: &RecognitionSettings,
    ) -> Result<(), LessonError> {
        let script = speech_session_script(ticket, settings);
        let events = self.events;
        spawn(async move {
            let mut session = eval(&script);
            loop {
                match session.recv::<SpeechReply>().await {
                    Ok(reply) => {
                        let done = reply.is_end();
                        events.send(reply.into_event(ticket));
                        if done {
                            break;
                        }
                    }
                    Err(err) => {
                        debug!(?err, %ticket, "speech channel closed");
                        events.send(LessonEvent::RecognitionEnded(ticket));
                        break;
                    }
                }
            }
        });
        Ok(())
    }

    fn stop(&mut self, ticket: ListenTicket) {
        let _ = eval(&stop_speech_script(ticket));
    }
}

struct BrowserPresentation {
    events: EventSink,
    availability: Availability,
}

impl PresentationSurface for BrowserPresentation {
    fn availability(&self) -> Availability {
        self.availability
    }

    fn request_fullscreen(&mut self) {
        let events = self.events;
        spawn(async move {
            let mut reply = eval(FULLSCREEN_SCRIPT);
            let event = match reply.recv::<FullscreenReply>().await {
                Ok(FullscreenReply { ok: true, .. }) => LessonEvent::FullscreenEntered,
                Ok(FullscreenReply { reason, .. }) => LessonEvent::FullscreenFailed {
                    reason: reason.unwrap_or_else(|| "refused".to_string()),
                },
                Err(err) => LessonEvent::FullscreenFailed {
                    reason: format!("{err:?}"),
                },
            };
            events.send(event);
        });
    }
}

struct BrowserFeedback {
    cues: CueSources,
}

impl FeedbackPlayer for BrowserFeedback {
    fn play(&mut self, cue: Cue) {
        let src = match cue {
            Cue::Success => &self.cues.success,
            Cue::Fail => &self.cues.fail,
        };
        debug!(cue = cue.name(), %src, "playing cue");
        let _ = eval(&play_cue_script(src));
    }
}

/// Runs each deferred reset as a Dioxus task.
///
/// The controller keeps at most one reset pending, so only the latest task
/// is tracked.
struct TaskScheduler {
    events: EventSink,
    pending: Option<(TimerToken, Task)>,
}

impl Scheduler for TaskScheduler {
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        let events = self.events;
        let task = spawn(async move {
            tokio::time::sleep(delay).await;
            events.send(LessonEvent::TimerElapsed(token));
        });
        self.pending = Some((token, task));
    }

    fn cancel(&mut self, token: TimerToken) {
        if let Some((pending, task)) = self.pending {
            if pending == token {
                task.cancel();
                self.pending = None;
            }
        }
    }
}
