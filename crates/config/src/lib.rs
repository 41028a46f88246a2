//! Configuration loading, validation, and management for kinrelay.
//!
//! Loads configuration from `~/.kinrelay/config.toml` with environment
//! variable overrides. The augmentation context is additionally re-read from
//! the file and the environment on every call through [`LiveContextSource`],
//! so operators can change persona and memory text without a restart.

use kinrelay_core::context::{AugmentationContext, ContextSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Bearer credential for the inference service.
pub const ENV_API_KEY: &str = "KINDROID_API_KEY";
/// Inference endpoint URL.
pub const ENV_INFER_URL: &str = "KINDROID_INFER_URL";
/// Transport timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "KINDROID_TIMEOUT_SECS";
pub const ENV_PREAMBLE: &str = "KINDROID_PREAMBLE";
pub const ENV_GLOBAL_MEMORY: &str = "KINDROID_GLOBAL_MEMORY";
pub const ENV_DYNAMIC_MEMORY: &str = "KINDROID_DYNAMIC_MEMORY";

/// The root configuration structure.
///
/// Maps directly to `~/.kinrelay/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bearer credential (required before invoking)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Inference endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Persona and memory text injected ahead of every conversation
    #[serde(default)]
    pub augmentation: AugmentationContext,
}

fn default_endpoint() -> String {
    "https://api.kindroid.ai/v1/discord-bot".into()
}
fn default_timeout_secs() -> u64 {
    120
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("augmentation", &self.augmentation)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.kinrelay/config.toml),
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production). Set variables win over file values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_INFER_URL) {
            self.endpoint = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }
        self.augmentation = overlay(&self.augmentation, &lookup);
        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".kinrelay")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// The API key, or an error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            augmentation: AugmentationContext::default(),
        }
    }
}

/// Start from `base` and replace every block whose variable is set.
fn overlay<F>(base: &AugmentationContext, lookup: &F) -> AugmentationContext
where
    F: Fn(&str) -> Option<String>,
{
    AugmentationContext {
        preamble: lookup(ENV_PREAMBLE).or_else(|| base.preamble.clone()),
        global_memory: lookup(ENV_GLOBAL_MEMORY).or_else(|| base.global_memory.clone()),
        dynamic_memory: lookup(ENV_DYNAMIC_MEMORY).or_else(|| base.dynamic_memory.clone()),
    }
}

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Context source that re-reads the config file's `[augmentation]` table and
/// the augmentation variables on every call.
///
/// Environment variables win over file values. A missing file means no file
/// context; an unreadable or invalid file keeps the last good value.
pub struct LiveContextSource {
    path: Option<PathBuf>,
    last_good: Mutex<AugmentationContext>,
    lookup: Lookup,
}

impl LiveContextSource {
    /// Watch `path` and the process environment.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_lookup(
            Some(path.into()),
            Arc::new(|key: &str| std::env::var(key).ok()),
        )
    }

    /// Watch the default config file (`~/.kinrelay/config.toml`).
    pub fn from_default_path() -> Self {
        Self::new(AppConfig::config_path())
    }

    /// Read an optional file and a custom variable lookup.
    pub fn with_lookup(path: Option<PathBuf>, lookup: Lookup) -> Self {
        Self {
            path,
            last_good: Mutex::new(AugmentationContext::default()),
            lookup,
        }
    }

    fn file_context(&self) -> AugmentationContext {
        let mut last_good = self
            .last_good
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match &self.path {
            None => {}
            Some(path) if !path.exists() => *last_good = AugmentationContext::default(),
            Some(path) => match AppConfig::load_from(path) {
                Ok(config) => *last_good = config.augmentation,
                Err(e) => {
                    tracing::warn!(error = %e, "Keeping previous augmentation context");
                }
            },
        }

        last_good.clone()
    }
}

impl ContextSource for LiveContextSource {
    fn load(&self) -> AugmentationContext {
        overlay(&self.file_context(), &|key: &str| (self.lookup)(key))
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No API key configured; set KINDROID_API_KEY or api_key in the config file")]
    MissingApiKey,
}
