mod lesson_vm;

pub use lesson_vm::{LessonControls, LessonIntent, LessonVm};
