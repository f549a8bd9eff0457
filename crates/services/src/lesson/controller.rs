use std::time::Duration;

use tracing::{debug, info, warn};

use lesson_core::model::{
    Device, Feature, LessonEvent, ListenTicket, Notice, RecognitionFailure, SessionState, Status,
    StreamHandle, TimerToken, WordPair,
};
use lesson_core::{LessonConfig, LessonError};

use super::ports::{Cue, LessonPorts};

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Lesson session controller.
///
/// Owns the session state and the platform capabilities. User actions are
/// methods; everything the platform reports back arrives through `handle`.
/// All calls happen on the UI thread, so the last write to the status wins.
pub struct LessonController {
    config: LessonConfig,
    state: SessionState,
    ports: LessonPorts,
    active_ticket: Option<ListenTicket>,
    last_ticket: ListenTicket,
    pending_reset: Option<TimerToken>,
    last_token: TimerToken,
    media_requested: bool,
}

impl LessonController {
    #[must_use]
    pub fn new(config: LessonConfig, ports: LessonPorts) -> Self {
        Self {
            config,
            state: SessionState::new(),
            ports,
            active_ticket: None,
            last_ticket: ListenTicket::new(0),
            pending_reset: None,
            last_token: TimerToken::new(0),
            media_requested: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    #[must_use]
    pub fn current_word(&self) -> &WordPair {
        self.config.words().get(self.state.current_index())
    }

    /// Ticket of the recognition session the controller is waiting on.
    #[must_use]
    pub fn active_ticket(&self) -> Option<ListenTicket> {
        self.active_ticket
    }

    /// Token of the scheduled feedback reset, if one is pending.
    #[must_use]
    pub fn pending_reset(&self) -> Option<TimerToken> {
        self.pending_reset
    }

    /// Ask for camera access.
    ///
    /// Does nothing once the camera is ready or while a request is in flight.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::UnsupportedFeature` if the platform has no media
    /// capture; an unsupported notice is raised as well.
    pub fn request_media(&mut self) -> Result<(), LessonError> {
        if self.state.camera_ready() || self.media_requested {
            debug!("media already granted or requested");
            return Ok(());
        }
        if !self.ports.media.availability().is_available() {
            let err = LessonError::UnsupportedFeature(Feature::MediaCapture);
            warn!(error = %err, "cannot request camera");
            self.state.raise_notice(Notice::Unsupported(Feature::MediaCapture));
            return Err(err);
        }

        self.media_requested = true;
        let constraints = self.config.media();
        debug!(
            facing_mode = constraints.facing_mode.as_str(),
            audio = constraints.audio,
            "requesting media stream"
        );
        self.ports.media.request_stream(constraints);
        Ok(())
    }

    /// Enter demo mode and ask for fullscreen. Failure to go fullscreen is
    /// logged and otherwise ignored.
    pub fn enter_fullscreen(&mut self) {
        self.state.mark_presenting();
        if self.state.fullscreen_ready() {
            return;
        }
        if !self.ports.presentation.availability().is_available() {
            let err = LessonError::UnsupportedFeature(Feature::Fullscreen);
            warn!(error = %err, "presenting without fullscreen");
            return;
        }
        self.ports.presentation.request_fullscreen();
    }

    /// Start a recognition session for the current word.
    ///
    /// Ignored unless the status is Idle.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::UnsupportedFeature` if speech recognition is
    /// unavailable (an unsupported notice is raised), or the provider's error
    /// if it refuses to start. The status stays Idle in both cases.
    pub fn start_listening(&mut self) -> Result<(), LessonError> {
        if self.state.status() != Status::Idle {
            debug!(status = %self.state.status(), "start ignored");
            return Ok(());
        }
        if !self.ports.speech.availability().is_available() {
            let err = LessonError::UnsupportedFeature(Feature::SpeechRecognition);
            warn!(error = %err, "cannot start listening");
            self.state
                .raise_notice(Notice::Unsupported(Feature::SpeechRecognition));
            return Err(err);
        }

        let ticket = self.last_ticket.next();
        if let Err(err) = self.ports.speech.start(ticket, self.config.recognition()) {
            warn!(error = %err, %ticket, "speech provider refused to start");
            return Err(err);
        }

        self.last_ticket = ticket;
        self.active_ticket = Some(ticket);
        self.state.begin_listening();
        if matches!(
            self.state.notice(),
            Some(
                Notice::PermissionDenied(Device::Microphone)
                    | Notice::Unsupported(Feature::SpeechRecognition)
            )
        ) {
            self.state.dismiss_notice();
        }
        info!(
            %ticket,
            word = %self.current_word().foreign,
            "listening"
        );
        Ok(())
    }

    /// User cancel: stop the provider and return to Idle right away.
    ///
    /// A later end event from the provider is ignored. Calling this when not
    /// listening does nothing.
    pub fn stop_listening(&mut self) {
        if !self.state.end_listening() {
            return;
        }
        if let Some(ticket) = self.active_ticket.take() {
            self.ports.speech.stop(ticket);
            debug!(%ticket, "listening cancelled");
        }
    }

    /// Match a transcript from the active session against the current word.
    ///
    /// A match succeeds on any result. A mismatch fails only on a final
    /// result; interim mismatches just update the transcript.
    pub fn on_transcript(&mut self, text: &str, is_final: bool) {
        if self.state.status() != Status::Listening {
            debug!(status = %self.state.status(), "transcript ignored");
            return;
        }
        self.state.record_transcript(text);

        if self.current_word().is_spoken_in(text) {
            self.close_recognition(is_final);
            self.succeed();
        } else if is_final {
            self.close_recognition(is_final);
            self.fail();
        } else {
            debug!(transcript = %self.state.transcript(), "interim mismatch");
        }
    }

    pub fn dismiss_notice(&mut self) {
        if let Some(notice) = self.state.dismiss_notice() {
            debug!(?notice, "notice dismissed");
        }
    }

    /// Apply a platform callback or timer completion.
    pub fn handle(&mut self, event: LessonEvent) {
        if let Some(ticket) = event.ticket() {
            if self.active_ticket != Some(ticket) {
                debug!(%ticket, ?event, "stale recognition event");
                return;
            }
        }

        match event {
            LessonEvent::MediaGranted(stream) => self.on_media_granted(&stream),
            LessonEvent::MediaDenied { reason } => {
                self.media_requested = false;
                let err = LessonError::PermissionDenied(Device::Camera);
                warn!(error = %err, %reason, "media request denied");
                self.state.raise_notice(Notice::PermissionDenied(Device::Camera));
            }
            LessonEvent::FullscreenEntered => {
                self.state.mark_fullscreen_ready();
                debug!("fullscreen engaged");
            }
            LessonEvent::FullscreenFailed { reason } => {
                let err = LessonError::Fullscreen(reason);
                warn!(error = %err, "fullscreen not engaged");
            }
            LessonEvent::RecognitionStarted(ticket) => {
                debug!(%ticket, "recognition started");
            }
            LessonEvent::RecognitionResult {
                transcript,
                is_final,
                ..
            } => self.on_transcript(&transcript, is_final),
            LessonEvent::RecognitionEnded(ticket) => {
                self.active_ticket = None;
                if self.state.end_listening() {
                    debug!(%ticket, "recognition ended without a result");
                }
            }
            LessonEvent::RecognitionFailed { ticket, failure } => {
                self.active_ticket = None;
                self.state.end_listening();
                match failure {
                    RecognitionFailure::NotAllowed => {
                        let err = LessonError::PermissionDenied(Device::Microphone);
                        warn!(error = %err, %ticket, "recognition blocked");
                        self.state
                            .raise_notice(Notice::PermissionDenied(Device::Microphone));
                    }
                    RecognitionFailure::Other(code) => {
                        let err = LessonError::Recognition(code);
                        warn!(error = %err, %ticket, "recognition failed");
                    }
                }
            }
            LessonEvent::TimerElapsed(token) => self.on_timer(token),
        }
    }

    fn on_media_granted(&mut self, stream: &StreamHandle) {
        self.media_requested = false;
        self.state.mark_camera_ready();
        if matches!(
            self.state.notice(),
            Some(Notice::PermissionDenied(Device::Camera) | Notice::Unsupported(Feature::MediaCapture))
        ) {
            self.state.dismiss_notice();
        }
        self.ports.media.attach_preview(stream);
        info!(%stream, "camera ready");
    }

    fn on_timer(&mut self, token: TimerToken) {
        if self.pending_reset != Some(token) {
            debug!(%token, "stale timer");
            return;
        }
        self.pending_reset = None;
        let resolved = self.state.status();
        if self.state.finish_feedback(self.config.words()) {
            debug!(
                %resolved,
                index = self.state.current_index(),
                "feedback resolved"
            );
        }
    }

    /// Release the active session once a result decided the outcome.
    ///
    /// The provider only needs an explicit stop if it may still be listening.
    fn close_recognition(&mut self, is_final: bool) {
        let Some(ticket) = self.active_ticket.take() else {
            return;
        };
        if !is_final || self.config.recognition().continuous {
            self.ports.speech.stop(ticket);
        }
    }

    fn succeed(&mut self) {
        if !self.state.mark_success() {
            return;
        }
        info!(word = %self.current_word().native, "match");
        self.ports.feedback.play(Cue::Success);
        self.schedule_reset(self.config.timing().success_reset());
    }

    fn fail(&mut self) {
        if !self.state.mark_error() {
            return;
        }
        info!(
            expected = %self.current_word().native,
            heard = %self.state.transcript(),
            "mismatch"
        );
        self.ports.feedback.play(Cue::Fail);
        self.schedule_reset(self.config.timing().error_reset());
    }

    fn schedule_reset(&mut self, delay: Duration) {
        if let Some(previous) = self.pending_reset.take() {
            self.ports.scheduler.cancel(previous);
        }
        let token = self.last_token.next();
        self.last_token = token;
        self.pending_reset = Some(token);
        self.ports.scheduler.schedule(token, delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakePlatform, PortCall};

    fn listening_controller(platform: &FakePlatform) -> LessonController {
        let mut controller = LessonController::new(LessonConfig::default(), platform.ports());
        controller.start_listening().unwrap();
        controller
    }

    #[test]
    fn success_schedules_reset_with_success_delay() {
        let platform = FakePlatform::new();
        let mut controller = listening_controller(&platform);

        controller.on_transcript("яблоко", true);

        assert_eq!(controller.state().status(), Status::Success);
        assert!(platform.log().contains(&PortCall::Play(Cue::Success)));
        assert_eq!(
            platform.log().scheduled(),
            vec![(TimerToken::new(1), Duration::from_millis(1200))]
        );
        assert_eq!(controller.pending_reset(), Some(TimerToken::new(1)));
    }

    #[test]
    fn failure_schedules_reset_with_error_delay() {
        let platform = FakePlatform::new();
        let mut controller = listening_controller(&platform);

        controller.on_transcript("вода", true);

        assert_eq!(controller.state().status(), Status::Error);
        assert!(platform.log().contains(&PortCall::Play(Cue::Fail)));
        assert_eq!(
            platform.log().scheduled(),
            vec![(TimerToken::new(1), Duration::from_millis(1000))]
        );
    }

    #[test]
    fn interim_match_stops_the_provider() {
        let platform = FakePlatform::new();
        let mut controller = listening_controller(&platform);
        let ticket = controller.active_ticket().unwrap();

        controller.on_transcript("яблоко", false);

        assert!(platform.log().contains(&PortCall::StopRecognition(ticket)));
        assert_eq!(controller.active_ticket(), None);
    }

    #[test]
    fn final_result_does_not_stop_single_shot_provider() {
        let platform = FakePlatform::new();
        let mut controller = listening_controller(&platform);

        controller.on_transcript("яблоко", true);

        assert_eq!(platform.log().count_stops(), 0);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let platform = FakePlatform::new();
        let mut controller = listening_controller(&platform);
        controller.on_transcript("яблоко", true);

        controller.handle(LessonEvent::TimerElapsed(TimerToken::new(99)));

        assert_eq!(controller.state().status(), Status::Success);
        assert_eq!(controller.pending_reset(), Some(TimerToken::new(1)));
    }
}
