use std::path::{Path, PathBuf};

use lesson_core::{LessonConfig, LessonConfigDraft};
use tracing::{debug, info};

use crate::error::ConfigLoadError;

/// Where the lesson configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    /// Built-in word list and settings.
    #[default]
    Defaults,
    /// A JSON file on disk.
    File(PathBuf),
}

/// Loads and validates lesson configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    source: ConfigSource,
    language_override: Option<String>,
}

impl ConfigService {
    #[must_use]
    pub fn new(source: ConfigSource) -> Self {
        Self {
            source,
            language_override: None,
        }
    }

    /// Replace the recognition language after loading.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language_override = language;
        self
    }

    /// Load the configuration (or defaults) and apply overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoadError::Io` if the file cannot be read and
    /// `ConfigLoadError::Invalid` if it fails to parse or validate.
    pub fn load(&self) -> Result<LessonConfig, ConfigLoadError> {
        let config = match &self.source {
            ConfigSource::Defaults => {
                debug!("using built-in lesson configuration");
                LessonConfig::default()
            }
            ConfigSource::File(path) => load_file(path)?,
        };

        let config = match self.language_override.as_deref() {
            Some(language) => config.with_language(language)?,
            None => config,
        };

        info!(
            words = config.words().len(),
            language = %config.recognition().language,
            "lesson configuration loaded"
        );
        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<LessonConfig, ConfigLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "parsing lesson configuration");
    let config = LessonConfigDraft::from_json(&raw)?.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use lesson_core::config::ConfigError;

    use super::*;

    #[test]
    fn defaults_source_uses_builtin_words() {
        let config = ConfigService::default().load().unwrap();
        assert_eq!(config.words().get(1).native, "дом");
    }

    #[test]
    fn file_source_is_parsed_and_validated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "words": [{{ "foreign": "bread", "native": "хлеб" }}] }}"#
        )
        .unwrap();

        let config = ConfigService::new(ConfigSource::File(file.path().to_path_buf()))
            .load()
            .unwrap();
        assert_eq!(config.words().len(), 1);
        assert_eq!(config.words().get(0).foreign, "bread");
    }

    #[test]
    fn missing_file_reports_path() {
        let path = PathBuf::from("/definitely/not/here/lesson.json");
        let err = ConfigService::new(ConfigSource::File(path.clone()))
            .load()
            .unwrap_err();
        match err {
            ConfigLoadError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "words": [] }}"#).unwrap();

        let err = ConfigService::new(ConfigSource::File(file.path().to_path_buf()))
            .load()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Invalid(ConfigError::Words(_))
        ));
    }

    #[test]
    fn language_override_applies_after_load() {
        let config = ConfigService::default()
            .with_language(Some("uk-UA".into()))
            .load()
            .unwrap();
        assert_eq!(config.recognition().language, "uk-UA");
    }
}
