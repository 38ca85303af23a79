//! Persistent defaults stored in the user's config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use treeguess_analyze::{AnalyzeConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL, PromptLanguage};
use treeguess_core::DEFAULT_MAX_DEPTH;

/// Environment variable overriding the configured model.
pub const MODEL_ENV: &str = "TREEGUESS_MODEL";

/// Environment variable overriding the configured endpoint.
pub const ENDPOINT_ENV: &str = "TREEGUESS_ENDPOINT";

/// Defaults applied when the command line leaves a value unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model named in analysis requests.
    pub model: String,
    /// URL analysis requests are sent to.
    pub endpoint: String,
    /// Maximum scan depth below the root.
    pub depth: u32,
    /// Regex patterns of names to leave out.
    pub ignore: Vec<String>,
    /// Prompt language.
    pub language: PromptLanguage,
    /// Descend into symbolic links to directories while scanning.
    pub follow_symlinks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            depth: DEFAULT_MAX_DEPTH,
            ignore: Vec::new(),
            language: PromptLanguage::default(),
            follow_symlinks: false,
        }
    }
}

impl Settings {
    /// Get the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("treeguess").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load settings from `path`. A missing or invalid file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&content).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "ignoring invalid settings file");
            Self::default()
        })
    }

    /// Save settings to the config file.
    pub fn save(&self) -> std::io::Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No config directory")
        })?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(path, content)
    }

    /// Apply model and endpoint overrides from the environment.
    ///
    /// `lookup` resolves a variable name; empty values are ignored.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(model) = lookup(MODEL_ENV) {
            self.model = model;
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
        self
    }

    /// Analysis client configuration from these settings.
    pub fn analyze_config(&self) -> AnalyzeConfig {
        AnalyzeConfig {
            endpoint: self.endpoint.clone(),
            language: self.language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.depth, 2);
        assert!(settings.ignore.is_empty());
        assert_eq!(settings.language, PromptLanguage::English);
        assert!(!settings.follow_symlinks);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: Settings =
            toml::from_str("depth = 5\nlanguage = \"zh\"\nfollow_symlinks = true\n").unwrap();
        assert_eq!(settings.depth, 5);
        assert!(settings.follow_symlinks);
        assert_eq!(settings.language, PromptLanguage::Chinese);
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_env_overrides() {
        let settings = Settings::default().with_env(|key| match key {
            MODEL_ENV => Some("local/model".to_string()),
            ENDPOINT_ENV => Some("  ".to_string()),
            _ => None,
        });

        assert_eq!(settings.model, "local/model");
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_analyze_config() {
        let settings = Settings {
            endpoint: "http://localhost:1".to_string(),
            language: PromptLanguage::Chinese,
            ..Settings::default()
        };
        let config = settings.analyze_config();
        assert_eq!(config.endpoint, "http://localhost:1");
        assert_eq!(config.language, PromptLanguage::Chinese);
    }
}
