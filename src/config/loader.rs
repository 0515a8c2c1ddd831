//! Configuration loading with layered merge
//!
//! Settings come from an optional TOML file; the credential comes from the
//! process environment (with `.env` support). Everything has a default, so
//! no file is required.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the completion endpoint credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// A fatal configuration problem, reported before any work starts
#[derive(Debug, Clone, Error)]
#[error("configuration error: {message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Top-level wikigen configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WikigenConfig {
    /// Completion endpoint settings
    #[serde(default)]
    pub completion: CompletionSettings,
}

/// Settings for the completion endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionSettings {
    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model ID sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, must stay in [0, 2]
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_model() -> String {
    "gpt-4".into()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WikigenConfig {
    /// Load configuration from the standard hierarchy
    ///
    /// Load order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. ~/.config/wikigen/config.toml
    /// 3. .wikigen/config.toml (project)
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                config.merge(Self::load_file(&user_config_path)?);
            }
        }

        let project_config_path = project_dir
            .map(|p| p.join(".wikigen/config.toml"))
            .unwrap_or_else(|| PathBuf::from(".wikigen/config.toml"));

        if project_config_path.exists() {
            config.merge(Self::load_file(&project_config_path)?);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("reading {}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::new(format!("parsing {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Get the user config path (~/.config/wikigen/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wikigen/config.toml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        let defaults = CompletionSettings::default();

        if other.completion.base_url != defaults.base_url {
            self.completion.base_url = other.completion.base_url;
        }
        if other.completion.model != defaults.model {
            self.completion.model = other.completion.model;
        }
        if other.completion.temperature != defaults.temperature {
            self.completion.temperature = other.completion.temperature;
        }
        if other.completion.timeout_secs != defaults.timeout_secs {
            self.completion.timeout_secs = other.completion.timeout_secs;
        }
    }

    /// Reject settings the completion endpoint would misbehave on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.completion.temperature;
        if !(0.0..=2.0).contains(&t) {
            return Err(ConfigError::new(format!(
                "temperature must be between 0 and 2, got {}",
                t
            )));
        }
        if self.completion.base_url.trim().is_empty() {
            return Err(ConfigError::new("completion base_url must not be empty"));
        }
        Ok(())
    }
}

/// Resolve the API credential from the environment.
///
/// `dotenvy::dotenv()` should already have run by the time this is called,
/// so a key in a local `.env` file counts as configured.
pub fn api_key() -> Result<String, ConfigError> {
    api_key_from(|name| std::env::var(name).ok())
}

fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    match lookup(API_KEY_VAR) {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::new(format!(
            "{} not set; export it or add it to a .env file",
            API_KEY_VAR
        ))),
    }
}
