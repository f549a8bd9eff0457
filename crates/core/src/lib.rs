#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod model;

pub use config::{LessonConfig, LessonConfigDraft};
pub use error::LessonError;
