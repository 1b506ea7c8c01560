//! Layered configuration.
//!
//! Values are resolved from, lowest to highest precedence: built-in
//! defaults, the JSON config file, environment variables, then command-line
//! flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use echoes_spec::DEFAULT_PLACEHOLDER_ART_URL;
use serde::{Deserialize, Serialize};

use crate::flows::DEFAULT_VOICE;
use crate::model::GeminiSettings;

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "emotional-echoes";

/// Default Gemini API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default image model.
pub const DEFAULT_ART_MODEL: &str = "imagen-4.0-fast-generate-001";

/// Default speech model.
pub const DEFAULT_SOUND_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Log level used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EchoesConfig {
    /// Gemini API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Gemini API base URL.
    pub api_base_url: String,
    /// Image model id.
    pub art_model: String,
    /// Speech model id.
    pub sound_model: String,
    /// Prebuilt voice for soundscapes.
    pub voice_name: String,
    /// Directory holding saved compositions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Image shown before art is generated.
    pub placeholder_art_url: String,
    /// Log level filter (`trace`..`error`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Per-request timeout for model calls, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for EchoesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            art_model: DEFAULT_ART_MODEL.to_string(),
            sound_model: DEFAULT_SOUND_MODEL.to_string(),
            voice_name: DEFAULT_VOICE.to_string(),
            data_dir: None,
            placeholder_art_url: DEFAULT_PLACEHOLDER_ART_URL.to_string(),
            log_level: None,
            request_timeout_secs: None,
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `--data-dir`
    pub data_dir: Option<PathBuf>,
    /// `--log-level`
    pub log_level: Option<String>,
}

impl EchoesConfig {
    /// `<config_dir>/emotional-echoes/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.json"))
    }

    /// `<data_dir>/emotional-echoes`
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR))
    }

    /// Resolves the full configuration from every layer.
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn resolve(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Reads a JSON config file. Unset fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Applies environment variables looked up through `var`.
    ///
    /// `GEMINI_API_KEY` wins over `GOOGLE_API_KEY`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(dir) = non_empty("ECHOES_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = non_empty("ECHOES_LOG") {
            self.log_level = Some(level);
        }
    }

    /// Applies command-line flags.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = Some(dir.clone());
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = Some(level.clone());
        }
    }

    /// Effective log level.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Effective data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir()
                .context("Failed to determine data directory; pass --data-dir"),
        }
    }

    /// Effective request timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// True if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Connection settings for the Gemini client.
    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: self.api_key.clone().unwrap_or_default(),
            base_url: self.api_base_url.clone(),
            art_model: self.art_model.clone(),
            sound_model: self.sound_model.clone(),
            request_timeout: self.request_timeout(),
        }
    }
}
