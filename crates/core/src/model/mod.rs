mod event;
mod ids;
mod notice;
mod session;
pub mod transcript;
mod word;

pub use event::{LessonEvent, RecognitionFailure};
pub use ids::{ListenTicket, StreamHandle, TimerToken};
pub use notice::{Device, Feature, Notice};
pub use session::{SessionState, Status};
pub use word::{WordList, WordListError, WordPair, default_words};
