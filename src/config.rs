//! Configuration management for SkinSnap
//!
//! TOML-based configuration with defaults and validation.
//! Location: ~/.skinsnap/config.toml

use crate::errors::{Result, SkinError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default classifier artifact, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "final_model.safetensors";

/// Complete configuration for SkinSnap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Classifier artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_output: bool,
    pub show_disclaimer: bool,
    pub show_progress: bool,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub state_dir: String,
    pub history_file: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            show_disclaimer: true,
            show_progress: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.skinsnap".to_string(),
            history_file: "~/.skinsnap/history".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(config_path) => Self::load_from_file(config_path),
            None => Self::load_default(),
        }
    }

    /// Load configuration from specific file
    ///
    /// Parses only; values are checked by [`Config::validate`].
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SkinError::Config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| SkinError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Load from the standard location, falling back to built-in defaults
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_path();
        if config_path.exists() {
            return Self::load_from_file(&config_path);
        }

        Ok(Config::default())
    }

    /// Standard config file path
    pub fn default_path() -> PathBuf {
        Self::expand_path("~/.skinsnap/config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let model_path = self.model.path.trim();
        if model_path.is_empty() {
            return Err(SkinError::Config("model.path must not be empty".to_string()));
        }

        if !model_path.ends_with(".safetensors") {
            return Err(SkinError::Config(format!(
                "model.path must point to a .safetensors file: {}",
                model_path
            )));
        }

        if self.paths.history_file.trim().is_empty() {
            return Err(SkinError::Config("paths.history_file must not be empty".to_string()));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SkinError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SkinError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SkinError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Override the model path (CLI flag wins over the file)
    pub fn with_model_path(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.model.path = path.to_string_lossy().into_owned();
        }
        self
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    pub fn model_path(&self) -> PathBuf {
        Self::expand_path(&self.model.path)
    }

    pub fn state_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.state_dir)
    }

    pub fn history_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.history_file)
    }
}
