//! Question answering with optional context augmentation.
//!
//! The `AugmentedAnswerer` fetches context from at most one provider, folds
//! it into a prompt together with the conversation transcript, asks the
//! generation provider and records the turn in the shared memory.

use std::sync::Arc;

use parley_core::{
    ContextProvider, ContextSource, GenerationError, GenerationOptions, LLMProvider,
};
use tracing::{debug, info, warn};

use crate::memory::SharedMemory;
use crate::prompt::{FetchedContext, build_prompt};

/// Configuration for an answerer.
#[derive(Debug, Clone)]
pub struct AnswererConfig {
    /// Options forwarded to the generation provider. A blank model means the
    /// provider's default.
    pub options: GenerationOptions,
}

impl Default for AnswererConfig {
    fn default() -> Self {
        Self {
            options: GenerationOptions::new(String::new(), 0.0),
        }
    }
}

/// `model`, or the provider's default when blank.
pub fn resolve_model(generator: &dyn LLMProvider, model: String) -> String {
    if model.trim().is_empty() {
        generator.get_default_model().to_string()
    } else {
        model
    }
}

impl AnswererConfig {
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.options.model = model.into();
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = temperature;
        self
    }
}

pub struct AugmentedAnswerer {
    generator: Arc<dyn LLMProvider>,
    context: Option<Arc<dyn ContextProvider>>,
    memory: SharedMemory,
    config: AnswererConfig,
}

impl AugmentedAnswerer {
    /// Create an answerer without a context provider.
    pub fn new(
        generator: Arc<dyn LLMProvider>,
        memory: SharedMemory,
        mut config: AnswererConfig,
    ) -> Self {
        config.options.model = resolve_model(generator.as_ref(), config.options.model);
        Self {
            generator,
            context: None,
            memory,
            config,
        }
    }

    /// Consult `provider` before every generation call.
    #[must_use]
    pub fn with_context_provider(mut self, provider: Arc<dyn ContextProvider>) -> Self {
        self.context = Some(provider);
        self
    }

    /// The context source consulted by this answerer.
    #[must_use]
    pub fn source(&self) -> ContextSource {
        self.context
            .as_ref()
            .map_or(ContextSource::None, |provider| provider.source())
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.options.model
    }

    #[must_use]
    pub fn memory(&self) -> &SharedMemory {
        &self.memory
    }

    /// Answer `question` and record the turn.
    ///
    /// Context failures are folded into the prompt as text. Generation
    /// failures are returned and leave the memory untouched.
    pub async fn answer(&self, question: &str) -> Result<String, GenerationError> {
        info!("Answering question (context: {})", self.source());

        let context = self.fetch_context(question).await;
        let transcript = self.memory.lock().await.render();
        let prompt = build_prompt(&transcript, context.as_ref(), question);
        debug!(
            "Prompt built: {} chars, transcript {} chars",
            prompt.len(),
            transcript.len()
        );

        let response = self.generator.generate(&prompt, &self.config.options).await?;
        if let Some(usage) = &response.usage {
            debug!(
                "Tokens: {} prompt + {} completion = {} total",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let answer = response.content;
        if answer.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        self.memory.lock().await.append(question, answer.clone());
        Ok(answer)
    }

    async fn fetch_context(&self, question: &str) -> Option<FetchedContext> {
        let provider = self.context.as_ref()?;
        let source = provider.source();

        let text = match provider.fetch(question).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Context fetch from {source} failed, continuing with error text: {e}");
                source.failure_text(&e)
            }
        };

        Some(FetchedContext { source, text })
    }
}
