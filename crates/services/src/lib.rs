#![forbid(unsafe_code)]

pub mod config_service;
pub mod error;
pub mod fakes;
pub mod lesson;

pub use config_service::{ConfigService, ConfigSource};
pub use error::ConfigLoadError;
pub use lesson::{
    Availability, Cue, FeedbackPlayer, LessonController, LessonPorts, MediaCapture,
    PresentationSurface, Scheduler, SpeechRecognizer,
};
