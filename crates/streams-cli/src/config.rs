use anyhow::{Context, Result};
use dirs::config_dir;
use hls_streams::SelectOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default output format
    pub output_format: OutputFormat,

    /// Audio languages or rendition names to prefer
    pub audio_select: Vec<String>,

    /// Requested locale; the environment locale is used when unset
    pub locale: Option<String>,

    /// Path to the ffmpeg executable
    pub ffmpeg_path: Option<PathBuf>,

    /// Never mux external audio
    pub mux_disabled: bool,

    /// Request timeout in seconds for stream checks
    pub timeout: u64,

    /// User agent string for requests
    pub user_agent: Option<String>,

    /// Enable colored output
    pub colored_output: bool,

    /// Naming, playback and transport defaults
    pub select: SelectOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Pretty,
            audio_select: Vec::new(),
            locale: None,
            ffmpeg_path: None,
            mux_disabled: false,
            timeout: 30,
            user_agent: Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36".to_string()),
            colored_output: true,
            select: SelectOptions::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file, defaults when the file does not exist
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::default_config_path);

        match path {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).context("Failed to read configuration file")?;
                toml::from_str(&content).context("Failed to parse configuration file")
            }
            _ => Ok(Self::default()),
        }
    }

    /// Get default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("hls-streams").join("config.toml"))
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, toml_string).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Reset configuration to defaults and save
    pub fn reset(config_path: Option<&Path>) -> Result<()> {
        let path = config_path
            .map(|p| p.to_path_buf())
            .or_else(Self::default_config_path)
            .context("No configuration path available")?;

        let default_config = Self::default();
        default_config.save(&path)?;

        Ok(())
    }

    /// Show current configuration as a formatted string
    pub fn show(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration for display")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hls_streams::NameKey;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
locale = "ja_JP"
audio_select = ["ja", "en"]
output_format = "json"

[select]
name_key = "pixels"
name_prefix = "gch_"
force_restart = true
"#,
        )
        .unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.locale.as_deref(), Some("ja_JP"));
        assert_eq!(config.audio_select, vec!["ja", "en"]);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.select.name_key, NameKey::Pixels);
        assert_eq!(config.select.name_prefix, "gch_");
        assert!(config.select.playback.force_restart);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        AppConfig::reset(Some(&path)).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
