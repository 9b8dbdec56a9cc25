use std::path::{Path, PathBuf};

use parley_core::{ConfigurationError, ContextSource, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Generation provider API key.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Search provider API key.
pub const SERPAPI_API_KEY: &str = "SERPAPI_API_KEY";
/// Override for the generation endpoint.
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
/// Override for the default model.
pub const PARLEY_MODEL: &str = "PARLEY_MODEL";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AgentsConfig {
    #[serde(default)]
    pub defaults: AgentDefaults,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AgentDefaults {
    #[serde(default = "AgentDefaults::default_model")]
    pub model: String,
    /// Temperature for factual answers
    #[serde(default)]
    pub temperature: f32,
    /// Temperature for restaurant naming
    #[serde(default = "AgentDefaults::default_creative_temperature")]
    pub creative_temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Turns kept in conversation memory
    #[serde(default = "AgentDefaults::default_memory_window")]
    pub memory_window: usize,
    #[serde(default)]
    pub context: ContextSource,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            temperature: 0.0,
            creative_temperature: Self::default_creative_temperature(),
            max_tokens: None,
            memory_window: Self::default_memory_window(),
            context: ContextSource::None,
        }
    }
}

impl AgentDefaults {
    fn default_model() -> String {
        DEFAULT_MODEL.to_string()
    }

    const fn default_creative_temperature() -> f32 {
        0.7
    }

    const fn default_memory_window() -> usize {
        5
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
    #[serde(default)]
    pub serpapi: ProviderConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    #[serde(default = "ProvidersConfig::default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::default(),
            serpapi: ProviderConfig::default(),
            wikipedia: WikipediaConfig::default(),
            request_timeout_secs: Self::default_timeout(),
        }
    }
}

impl ProvidersConfig {
    const fn default_timeout() -> u64 {
        30
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WikipediaConfig {
    #[serde(default = "WikipediaConfig::default_language")]
    pub language: String,
    #[serde(default = "WikipediaConfig::default_top_k")]
    pub top_k: usize,
    #[serde(default = "WikipediaConfig::default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            language: Self::default_language(),
            top_k: Self::default_top_k(),
            preview_chars: Self::default_preview_chars(),
        }
    }
}

impl WikipediaConfig {
    fn default_language() -> String {
        "en".to_string()
    }

    const fn default_top_k() -> usize {
        3
    }

    const fn default_preview_chars() -> usize {
        500
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "agents": {
    "defaults": {
      "model": "gpt-4o-mini",
      "temperature": 0.0,
      "creative_temperature": 0.7,
      "memory_window": 5,
      "context": "none"
    }
  },
  "providers": {
    "openai": {
      "api_key": ""
    },
    "serpapi": {
      "api_key": ""
    },
    "wikipedia": {
      "language": "en",
      "top_k": 3,
      "preview_chars": 500
    },
    "request_timeout_secs": 30
  }
}"#;

impl Config {
    /// Load `~/parley/config.json` if present, then `.env` and the process
    /// environment on top of it.
    pub fn load() -> Result<Self, ConfigurationError> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            info!("Loading config from {}", path.display());
            Self::load_from(&path)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", env_file.display());
        }
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse a config file without consulting the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overlay key/value settings; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(OPENAI_API_KEY) {
            self.providers.openai.api_key = key;
        }
        if let Some(key) = get(SERPAPI_API_KEY) {
            self.providers.serpapi.api_key = key;
        }
        if let Some(url) = get(OPENAI_BASE_URL) {
            self.providers.openai.base_url = Some(url);
        }
        if let Some(model) = get(PARLEY_MODEL) {
            self.agents.defaults.model = model;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Some(base_url) = &self.providers.openai.base_url {
            url::Url::parse(base_url).map_err(|e| {
                ConfigurationError::Invalid(format!("openai base_url '{base_url}': {e}"))
            })?;
        }
        if self.providers.request_timeout_secs == 0 {
            return Err(ConfigurationError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The generation key; every answering path needs it.
    pub fn openai_api_key(&self) -> Result<&str, ConfigurationError> {
        non_empty(&self.providers.openai.api_key)
            .ok_or(ConfigurationError::MissingCredential(OPENAI_API_KEY))
    }

    /// The search key; only the search path needs it.
    pub fn serpapi_api_key(&self) -> Result<&str, ConfigurationError> {
        non_empty(&self.providers.serpapi.api_key)
            .ok_or(ConfigurationError::MissingCredential(SERPAPI_API_KEY))
    }

    #[must_use]
    pub fn search_enabled(&self) -> bool {
        self.serpapi_api_key().is_ok()
    }

    pub fn config_dir() -> Result<PathBuf, ConfigurationError> {
        dirs::home_dir()
            .map(|home| home.join("parley"))
            .ok_or_else(|| ConfigurationError::Invalid("Cannot find home directory".to_string()))
    }

    pub fn config_path() -> Result<PathBuf, ConfigurationError> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Write the config template to `~/parley/config.json`.
    pub fn create_config() -> Result<PathBuf, ConfigurationError> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;
        Ok(config_path)
    }

    /// Write the template to `path`, refusing to overwrite an existing file.
    pub fn write_template(path: &Path) -> Result<(), ConfigurationError> {
        if path.exists() {
            return Err(ConfigurationError::Invalid(format!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            )));
        }
        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
