//! Lesson configuration.
//!
//! A `LessonConfigDraft` is what a JSON file deserializes into; every field
//! has a default so an empty document is valid. `validate` turns it into a
//! `LessonConfig` that the controller can rely on.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{WordList, WordListError, WordPair, default_words};

pub const DEFAULT_LANGUAGE: &str = "ru-RU";
pub const DEFAULT_SUCCESS_RESET_MS: u64 = 1200;
pub const DEFAULT_ERROR_RESET_MS: u64 = 1000;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Words(#[from] WordListError),
    #[error("recognition language must not be blank")]
    BlankLanguage,
    #[error("{field} must be greater than zero")]
    ZeroDelay { field: &'static str },
    #[error("{cue} cue source must not be blank")]
    BlankCue { cue: &'static str },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Speech recognizer settings passed to the provider on every start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    pub language: String,
    pub interim_results: bool,
    pub continuous: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            interim_results: false,
            continuous: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    #[default]
    User,
    Environment,
}

impl FacingMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

/// Constraints for the camera request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConstraints {
    pub facing_mode: FacingMode,
    /// Also request the microphone alongside the camera.
    pub audio: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackTiming {
    pub success_reset_ms: u64,
    pub error_reset_ms: u64,
}

impl Default for FeedbackTiming {
    fn default() -> Self {
        Self {
            success_reset_ms: DEFAULT_SUCCESS_RESET_MS,
            error_reset_ms: DEFAULT_ERROR_RESET_MS,
        }
    }
}

impl FeedbackTiming {
    #[must_use]
    pub fn success_reset(&self) -> Duration {
        Duration::from_millis(self.success_reset_ms)
    }

    #[must_use]
    pub fn error_reset(&self) -> Duration {
        Duration::from_millis(self.error_reset_ms)
    }
}

/// Audio sources for the two feedback cues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueSources {
    pub success: String,
    pub fail: String,
}

impl Default for CueSources {
    fn default() -> Self {
        Self {
            success: "/sounds/success.mp3".to_string(),
            fail: "/sounds/fail.mp3".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonConfigDraft {
    pub words: Vec<WordPair>,
    pub recognition: RecognitionSettings,
    pub media: MediaConstraints,
    pub timing: FeedbackTiming,
    pub cues: CueSources,
}

impl Default for LessonConfigDraft {
    fn default() -> Self {
        Self {
            words: default_words(),
            recognition: RecognitionSettings::default(),
            media: MediaConstraints::default(),
            timing: FeedbackTiming::default(),
            cues: CueSources::default(),
        }
    }
}

impl LessonConfigDraft {
    /// Parse a draft from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an invalid word list, a blank language tag,
    /// a zero reset delay, or a blank cue source.
    pub fn validate(self) -> Result<LessonConfig, ConfigError> {
        let words = WordList::new(self.words)?;

        let language = self.recognition.language.trim().to_string();
        if language.is_empty() {
            return Err(ConfigError::BlankLanguage);
        }
        if self.timing.success_reset_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "timing.success_reset_ms",
            });
        }
        if self.timing.error_reset_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "timing.error_reset_ms",
            });
        }
        if self.cues.success.trim().is_empty() {
            return Err(ConfigError::BlankCue { cue: "success" });
        }
        if self.cues.fail.trim().is_empty() {
            return Err(ConfigError::BlankCue { cue: "fail" });
        }

        Ok(LessonConfig {
            words,
            recognition: RecognitionSettings {
                language,
                ..self.recognition
            },
            media: self.media,
            timing: self.timing,
            cues: self.cues,
        })
    }
}

/// Validated lesson configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonConfig {
    words: WordList,
    recognition: RecognitionSettings,
    media: MediaConstraints,
    timing: FeedbackTiming,
    cues: CueSources,
}

impl LessonConfig {
    #[must_use]
    pub fn words(&self) -> &WordList {
        &self.words
    }

    #[must_use]
    pub fn recognition(&self) -> &RecognitionSettings {
        &self.recognition
    }

    #[must_use]
    pub fn media(&self) -> MediaConstraints {
        self.media
    }

    #[must_use]
    pub fn timing(&self) -> FeedbackTiming {
        self.timing
    }

    #[must_use]
    pub fn cues(&self) -> &CueSources {
        &self.cues
    }

    /// Returns a copy with the recognition language replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BlankLanguage` if `language` is blank.
    pub fn with_language(mut self, language: &str) -> Result<Self, ConfigError> {
        let language = language.trim();
        if language.is_empty() {
            return Err(ConfigError::BlankLanguage);
        }
        self.recognition.language = language.to_string();
        Ok(self)
    }
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            words: WordList::default(),
            recognition: RecognitionSettings::default(),
            media: MediaConstraints::default(),
            timing: FeedbackTiming::default(),
            cues: CueSources::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = LessonConfigDraft::from_json("{}").unwrap().validate().unwrap();
        assert_eq!(config, LessonConfig::default());
        assert_eq!(config.recognition().language, "ru-RU");
        assert!(!config.recognition().interim_results);
        assert_eq!(config.timing().success_reset(), Duration::from_millis(1200));
        assert_eq!(config.timing().error_reset(), Duration::from_millis(1000));
        assert_eq!(config.words().len(), 3);
    }

    #[test]
    fn partial_document_overrides_selected_fields() {
        let raw = r#"{
            "words": [{ "foreign": "cat", "native": "кошка" }],
            "recognition": { "interim_results": true },
            "media": { "facing_mode": "environment", "audio": true }
        }"#;
        let config = LessonConfigDraft::from_json(raw).unwrap().validate().unwrap();
        assert_eq!(config.words().len(), 1);
        assert_eq!(config.words().get(0).native, "кошка");
        assert!(config.recognition().interim_results);
        assert_eq!(config.recognition().language, "ru-RU");
        assert_eq!(config.media().facing_mode, FacingMode::Environment);
        assert!(config.media().audio);
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let err = LessonConfigDraft::from_json(r#"{ "words": [] }"#)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Words(WordListError::Empty)));
    }

    #[test]
    fn zero_delay_is_rejected() {
        let mut draft = LessonConfigDraft::default();
        draft.timing.error_reset_ms = 0;
        let err = draft.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroDelay {
                field: "timing.error_reset_ms"
            }
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = LessonConfigDraft::from_json("{ words: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn language_override_is_trimmed() {
        let config = LessonConfig::default().with_language(" en-US ").unwrap();
        assert_eq!(config.recognition().language, "en-US");
        assert!(LessonConfig::default().with_language("  ").is_err());
    }
}
