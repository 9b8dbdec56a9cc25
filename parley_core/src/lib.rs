#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod util;

pub use error::{ConfigurationError, GenerationError, ProviderError};

/// Model used when neither the config nor the command line names one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Sampling options sent with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl GenerationOptions {
    pub fn new(model: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens: None,
        }
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Which external service, if any, is consulted before generation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContextSource {
    #[default]
    None,
    Search,
    Encyclopedia,
}

impl ContextSource {
    /// How the fetched context is introduced in the prompt.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "context",
            Self::Search => "web search result",
            Self::Encyclopedia => "Wikipedia information",
        }
    }

    /// Inline text that replaces the context when the provider fails.
    #[must_use]
    pub fn failure_text(self, error: &ProviderError) -> String {
        match self {
            Self::None => format!("Error fetching context: {error}"),
            Self::Search => format!("Error searching web: {error}"),
            Self::Encyclopedia => format!("Error searching Wikipedia: {error}"),
        }
    }
}

impl fmt::Display for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Search => "search",
            Self::Encyclopedia => "encyclopedia",
        };
        f.write_str(name)
    }
}

impl FromStr for ContextSource {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "search" | "web" | "serpapi" => Ok(Self::Search),
            "encyclopedia" | "wiki" | "wikipedia" => Ok(Self::Encyclopedia),
            other => Err(ConfigurationError::Invalid(format!(
                "unknown context source '{other}' (expected none, search or encyclopedia)"
            ))),
        }
    }
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<LLMResponse, ProviderError>;

    fn get_default_model(&self) -> &str;

    /// Single-prompt completion, sent as one user message.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<LLMResponse, ProviderError> {
        self.chat(&[ChatMessage::user(prompt)], options).await
    }
}

/// A service consulted for extra context before the generation call.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    fn source(&self) -> ContextSource;

    async fn fetch(&self, query: &str) -> Result<String, ProviderError>;
}
