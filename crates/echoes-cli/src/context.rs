//! Wiring from configuration to concrete adapters.

use anyhow::{Context, Result};
use echoes_store::{CompositionStore, FileStorage};

use crate::canvas::Canvas;
use crate::config::EchoesConfig;
use crate::model::GeminiClient;

/// The composition store used by the CLI.
pub type LibraryStore = CompositionStore<FileStorage>;

/// The canvas used by the CLI.
pub type AppCanvas = Canvas<GeminiClient, LibraryStore>;

/// Opens the file-backed composition store under the configured data dir.
pub fn open_store(config: &EchoesConfig) -> Result<LibraryStore> {
    let dir = config.data_dir()?;
    let storage = FileStorage::open(&dir)
        .with_context(|| format!("Failed to open data directory: {}", dir.display()))?;
    Ok(CompositionStore::new(storage))
}

/// Builds the Gemini client from the configured settings.
pub fn open_model(config: &EchoesConfig) -> Result<GeminiClient> {
    GeminiClient::new(config.gemini_settings()).context("Failed to build model client")
}

/// Builds a canvas with the configured voice, placeholder, and library.
pub fn open_canvas(config: &EchoesConfig) -> Result<AppCanvas> {
    Ok(Canvas::new(open_model(config)?, open_store(config)?)
        .with_voice(config.voice_name.clone())
        .with_placeholder_art(config.placeholder_art_url.clone()))
}

/// Fails unless an API key is configured.
pub fn require_api_key(config: &EchoesConfig) -> Result<()> {
    if !config.has_api_key() {
        anyhow::bail!(
            "no API key configured; set GEMINI_API_KEY or add \"api_key\" to {}",
            EchoesConfig::default_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".to_string())
        );
    }
    Ok(())
}
