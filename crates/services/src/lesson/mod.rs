mod controller;
mod ports;

// Public API of the lesson subsystem.
pub use controller::LessonController;
pub use ports::{
    Availability, Cue, FeedbackPlayer, LessonPorts, MediaCapture, PresentationSurface, Scheduler,
    SpeechRecognizer,
};
