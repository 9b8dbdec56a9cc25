use async_trait::async_trait;
use parley_core::{
    ChatMessage, DEFAULT_MODEL, GenerationOptions, LLMProvider, LLMResponse, ProviderError, Usage,
};
use reqwest::Client;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::http::{read_json, request_error};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat completions client for OpenAI and compatible endpoints.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating OpenAiProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    async fn try_send(&self, request: &Value) -> Result<LLMResponse, ProviderError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(request_error)?;
        let response = read_json(response).await?;

        if let Some(message) = response["error"]["message"].as_str() {
            return Err(ProviderError::Api(message.to_string()));
        }

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse("missing content".to_string()))?
            .to_string();

        let usage = response["usage"].as_object().map(|u| Usage {
            prompt_tokens: token_count(u, "prompt_tokens"),
            completion_tokens: token_count(u, "completion_tokens"),
            total_tokens: token_count(u, "total_tokens"),
        });

        Ok(LLMResponse { content, usage })
    }
}

/// Missing or out-of-range counts read as zero.
fn token_count(usage: &Map<String, Value>, key: &str) -> u32 {
    usage
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &GenerationOptions,
    ) -> Result<LLMResponse, ProviderError> {
        let mut request = json!({
            "model": options.model,
            "messages": messages,
            "temperature": options.temperature,
        });
        if let Some(max_tokens) = options.max_tokens {
            request["max_tokens"] = json!(max_tokens);
        }

        info!("Sending request to OpenAI API: model={}", options.model);
        let response = self.try_send(&request).await?;
        info!("Received response from OpenAI API");

        Ok(response)
    }

    fn get_default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }
}
