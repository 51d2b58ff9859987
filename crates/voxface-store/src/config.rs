//! Recording configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use voxface_core::{FaceLayout, RecordingError, RecordingResult, WavFormat};

/// Naming convention and defaults for saved recordings.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordingConfig {
    /// Suffix appended to the base name of the audio asset.
    pub audio_suffix: String,
    /// Suffix appended to the base name of the face asset.
    pub face_suffix: String,
    /// Package path that registered assets live under.
    pub package_path: String,
    /// Whitespace layout of face documents.
    pub face_layout: FaceLayout,
    /// Sample rate used when the caller does not supply one.
    pub sample_rate: u32,
    /// Channel count used when the caller does not supply one.
    pub channels: u16,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            audio_suffix: "_Audio".to_string(),
            face_suffix: "_Face".to_string(),
            package_path: "Recordings".to_string(),
            face_layout: FaceLayout::Pretty,
            sample_rate: 16000,
            channels: 1,
        }
    }
}

impl RecordingConfig {
    /// Parse a config from a JSON file.
    pub fn from_file(path: &Path) -> RecordingResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the suffixes can tell the two assets apart and the
    /// default format is usable.
    pub fn validate(&self) -> RecordingResult<()> {
        if self.audio_suffix == self.face_suffix {
            return Err(RecordingError::invalid_param(
                "face_suffix",
                format!("must differ from audio_suffix '{}'", self.audio_suffix),
            ));
        }
        self.default_format()?;
        Ok(())
    }

    /// Default WAV format from `sample_rate` and `channels`.
    pub fn default_format(&self) -> RecordingResult<WavFormat> {
        WavFormat::new(self.sample_rate, self.channels)
    }

    /// Name of the audio asset for `base_name`.
    pub fn audio_asset_name(&self, base_name: &str) -> String {
        format!("{}{}", base_name, self.audio_suffix)
    }

    /// Name of the face asset for `base_name`.
    pub fn face_asset_name(&self, base_name: &str) -> String {
        format!("{}{}", base_name, self.face_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = RecordingConfig::default();
        assert_eq!(config.audio_asset_name("Greeting"), "Greeting_Audio");
        assert_eq!(config.face_asset_name("Greeting"), "Greeting_Face");
        assert_eq!(config.face_layout, FaceLayout::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file_partial() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("voxface.json");
        fs::write(
            &path,
            r#"{ "face_layout": "compact", "sample_rate": 24000, "package_path": "Game/Takes" }"#,
        )
        .unwrap();

        let config = RecordingConfig::from_file(&path).unwrap();
        assert_eq!(config.face_layout, FaceLayout::Compact);
        assert_eq!(config.sample_rate, 24000);
        assert_eq!(config.package_path, "Game/Takes");
        assert_eq!(config.audio_suffix, "_Audio");
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("voxface.json");
        fs::write(&path, r#"{ "bit_depth": 24 }"#).unwrap();
        assert!(matches!(
            RecordingConfig::from_file(&path),
            Err(RecordingError::Json(_))
        ));
    }

    #[test]
    fn test_config_rejects_identical_suffixes() {
        let config = RecordingConfig {
            face_suffix: "_Audio".to_string(),
            ..RecordingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_channels() {
        let config = RecordingConfig {
            channels: 0,
            ..RecordingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RecordingError::InvalidParameter { .. })
        ));
    }
}
