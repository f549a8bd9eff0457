use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Notice, WordList};

//
// ─── STATUS ───────────────────────────────────────────────────────────────────
//

/// Where the learner is in the listen, match, feedback cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Waiting for the learner to press the mic button.
    #[default]
    Idle,
    /// A recognition session is active.
    Listening,
    /// The last transcript matched; feedback is showing.
    Success,
    /// The last final transcript did not match; feedback is showing.
    Error,
}

impl Status {
    /// Stable lowercase name, also used as a CSS class hook.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Listening => "listening",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SESSION STATE ────────────────────────────────────────────────────────────
//

/// UI-facing state of a lesson session.
///
/// Transition methods return `true` when they changed the status and `false`
/// when the current status does not allow them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    current_index: usize,
    status: Status,
    transcript: String,
    camera_ready: bool,
    fullscreen_ready: bool,
    presenting: bool,
    notice: Option<Notice>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Last text heard from the recognizer, empty when nothing is pending.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    #[must_use]
    pub fn camera_ready(&self) -> bool {
        self.camera_ready
    }

    #[must_use]
    pub fn fullscreen_ready(&self) -> bool {
        self.fullscreen_ready
    }

    /// True once the learner entered demo mode, whether or not fullscreen engaged.
    #[must_use]
    pub fn presenting(&self) -> bool {
        self.presenting
    }

    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Idle -> Listening.
    pub fn begin_listening(&mut self) -> bool {
        self.transition(Status::Idle, Status::Listening)
    }

    /// Listening -> Idle, used for user cancel and provider end or error.
    pub fn end_listening(&mut self) -> bool {
        self.transition(Status::Listening, Status::Idle)
    }

    /// Listening -> Success.
    pub fn mark_success(&mut self) -> bool {
        self.transition(Status::Listening, Status::Success)
    }

    /// Listening -> Error.
    pub fn mark_error(&mut self) -> bool {
        self.transition(Status::Listening, Status::Error)
    }

    /// Resolves pending feedback back to Idle.
    ///
    /// Clears the transcript in both cases; a success also advances to the
    /// next word, wrapping at the end of `words`.
    pub fn finish_feedback(&mut self, words: &WordList) -> bool {
        match self.status {
            Status::Success => {
                self.current_index = words.next_index(self.current_index);
            }
            Status::Error => {}
            Status::Idle | Status::Listening => return false,
        }
        self.status = Status::Idle;
        self.transcript.clear();
        true
    }

    pub fn record_transcript(&mut self, text: &str) {
        self.transcript = text.trim().to_string();
    }

    pub fn mark_camera_ready(&mut self) {
        self.camera_ready = true;
    }

    pub fn mark_fullscreen_ready(&mut self) {
        self.fullscreen_ready = true;
    }

    pub fn mark_presenting(&mut self) {
        self.presenting = true;
    }

    pub fn raise_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Clears the notice, returning it if one was showing.
    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    fn transition(&mut self, from: Status, to: Status) -> bool {
        if self.status != from {
            return false;
        }
        self.status = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Device, WordPair};

    fn words() -> WordList {
        WordList::default()
    }

    #[test]
    fn initial_state_is_idle_on_first_word() {
        let state = SessionState::new();
        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.current_index(), 0);
        assert!(state.transcript().is_empty());
        assert!(!state.camera_ready());
        assert!(!state.fullscreen_ready());
        assert!(!state.presenting());
        assert_eq!(state.notice(), None);
    }

    #[test]
    fn begin_listening_requires_idle() {
        let mut state = SessionState::new();
        assert!(state.begin_listening());
        assert!(!state.begin_listening());
        assert_eq!(state.status(), Status::Listening);
    }

    #[test]
    fn end_listening_is_idempotent() {
        let mut state = SessionState::new();
        state.begin_listening();
        assert!(state.end_listening());
        assert!(!state.end_listening());
        assert_eq!(state.status(), Status::Idle);
    }

    #[test]
    fn success_resolves_by_advancing_and_clearing() {
        let mut state = SessionState::new();
        state.begin_listening();
        state.record_transcript(" яблоко ");
        assert!(state.mark_success());
        assert_eq!(state.transcript(), "яблоко");

        assert!(state.finish_feedback(&words()));
        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.current_index(), 1);
        assert!(state.transcript().is_empty());
    }

    #[test]
    fn error_resolves_without_advancing() {
        let mut state = SessionState::new();
        state.begin_listening();
        state.record_transcript("дом");
        assert!(state.mark_error());

        assert!(state.finish_feedback(&words()));
        assert_eq!(state.current_index(), 0);
        assert!(state.transcript().is_empty());
    }

    #[test]
    fn finish_feedback_outside_feedback_is_ignored() {
        let mut state = SessionState::new();
        assert!(!state.finish_feedback(&words()));
        state.begin_listening();
        assert!(!state.finish_feedback(&words()));
        assert_eq!(state.status(), Status::Listening);
    }

    #[test]
    fn successes_wrap_around_single_word_list() {
        let words = WordList::new(vec![WordPair::new("cat", "кот")]).unwrap();
        let mut state = SessionState::new();
        for _ in 0..3 {
            state.begin_listening();
            state.mark_success();
            state.finish_feedback(&words);
            assert_eq!(state.current_index(), 0);
        }
    }

    #[test]
    fn dismiss_notice_returns_previous_notice() {
        let mut state = SessionState::new();
        state.raise_notice(Notice::PermissionDenied(Device::Camera));
        assert_eq!(
            state.dismiss_notice(),
            Some(Notice::PermissionDenied(Device::Camera))
        );
        assert_eq!(state.dismiss_notice(), None);
    }

    #[test]
    fn status_names_are_css_hooks() {
        assert_eq!(Status::Listening.to_string(), "listening");
    }
}
