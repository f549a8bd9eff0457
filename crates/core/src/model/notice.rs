use std::fmt;

use serde::{Deserialize, Serialize};

/// Capture device a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    Camera,
    Microphone,
}

/// Platform capability the lesson depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    SpeechRecognition,
    MediaCapture,
    Fullscreen,
}

/// One-shot message shown to the learner until dismissed or superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    PermissionDenied(Device),
    Unsupported(Feature),
}

impl Notice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Notice::PermissionDenied(Device::Camera) => {
                "Camera access was denied. Allow it in your browser settings and try again."
            }
            Notice::PermissionDenied(Device::Microphone) => {
                "Microphone access was denied. Allow it in your browser settings and try again."
            }
            Notice::Unsupported(Feature::SpeechRecognition) => {
                "Speech recognition is not supported in this browser."
            }
            Notice::Unsupported(Feature::MediaCapture) => {
                "Camera capture is not supported in this browser."
            }
            Notice::Unsupported(Feature::Fullscreen) => {
                "Fullscreen is not supported in this browser."
            }
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Camera => f.write_str("camera"),
            Device::Microphone => f.write_str("microphone"),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::SpeechRecognition => f.write_str("speech recognition"),
            Feature::MediaCapture => f.write_str("media capture"),
            Feature::Fullscreen => f.write_str("fullscreen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_have_distinct_messages() {
        let camera = Notice::PermissionDenied(Device::Camera).message();
        let speech = Notice::Unsupported(Feature::SpeechRecognition).message();
        assert!(camera.contains("Camera"));
        assert!(speech.contains("Speech recognition"));
        assert_ne!(camera, speech);
    }
}
