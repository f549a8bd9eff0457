use thiserror::Error;

use crate::model::{Device, Feature};

/// Failures surfaced by the lesson session.
///
/// Apart from `Platform`, none of these end the session. The controller
/// resets to a safe state and, for permission and support failures, raises a
/// one-shot notice. `Platform` means the capabilities could not be reached
/// at all, so no session is created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("{0} permission denied")]
    PermissionDenied(Device),
    #[error("{0} is not supported on this platform")]
    UnsupportedFeature(Feature),
    #[error("speech recognition failed: {0}")]
    Recognition(String),
    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
    #[error("platform bridge failed: {0}")]
    Platform(String),
}
